use crate::Tag;

mod snbt;
mod wrap;

#[test]
fn exhaustive_tag_check() {
    let tags = [
        (0u8, Tag::End),
        (1, Tag::Byte),
        (2, Tag::Short),
        (3, Tag::Int),
        (4, Tag::Long),
        (5, Tag::Float),
        (6, Tag::Double),
        (7, Tag::ByteArray),
        (8, Tag::String),
        (9, Tag::List),
        (10, Tag::Compound),
        (11, Tag::IntArray),
    ];
    for (id, tag) in tags {
        assert_eq!(tag as u8, id);
        assert_eq!(Tag::try_from(id), Ok(tag));
    }
    // LongArray and anything above are outside the model.
    assert!(Tag::try_from(12).is_err());
    assert!(Tag::try_from(255).is_err());
}
