use crate::error::ErrorKind;
use crate::{from_snbt, from_snbt_with_limit, nbt, to_snbt, Value};

#[test]
fn encode_scalars() {
    assert_eq!("10b", to_snbt(&Value::Byte(10)));
    assert_eq!("-12b", to_snbt(&Value::Byte(-12)));
    assert_eq!("10s", to_snbt(&Value::Short(10)));
    assert_eq!("-10", to_snbt(&Value::Int(-10)));
    assert_eq!("10l", to_snbt(&Value::Long(10)));
    assert_eq!("10.4f", to_snbt(&Value::Float(10.4)));
    assert_eq!("1.5f", to_snbt(&Value::Float(1.5)));
    assert_eq!("10.4d", to_snbt(&Value::Double(10.4)));
    assert_eq!("5.0d", to_snbt(&Value::Double(5.0)));
}

#[test]
fn encode_string_escapes() {
    let s = Value::String("this str \" contains \" quotes".into());
    assert_eq!("\"this str \\\" contains \\\" quotes\"", to_snbt(&s));

    let s = Value::String("str \\\" with \" quotes \\ & backslashes".into());
    assert_eq!(
        "\"str \\\\\\\" with \\\" quotes \\\\ & backslashes\"",
        to_snbt(&s)
    );

    let s = Value::String("line\nbreak\tand\rmore".into());
    assert_eq!("\"line\\nbreak\\tand\\rmore\"", to_snbt(&s));

    // Non-ASCII goes out as UTF-16 units, astral plane as surrogate pairs.
    assert_eq!("\"h\\u00e9llo\"", to_snbt(&Value::String("héllo".into())));
    assert_eq!("\"\\ud83d\\ude00\"", to_snbt(&Value::String("😀".into())));
    assert_eq!("\"\\u0001\"", to_snbt(&Value::String("\u{1}".into())));
}

#[test]
fn encode_key_quoting_boundary() {
    assert_eq!("{plain_key:1}", to_snbt(&nbt!({"plain_key": 1})));
    assert_eq!("{k.e-y+9:1}", to_snbt(&nbt!({"k.e-y+9": 1})));
    assert_eq!("{\"has space\":1}", to_snbt(&nbt!({"has space": 1})));
    assert_eq!("{\"a:b\":1}", to_snbt(&nbt!({"a:b": 1})));
    // An empty key has no unquoted form.
    assert_eq!("{\"\":1}", to_snbt(&nbt!({"": 1})));
}

#[test]
fn encode_empty_containers() {
    assert_eq!("{}", to_snbt(&nbt!({})));
    assert_eq!("[]", to_snbt(&nbt!([])));
    assert_eq!("[B;]", to_snbt(&nbt!([B;])));
    assert_eq!("[I;]", to_snbt(&nbt!([I;])));
}

#[test]
fn encode_typed_arrays() {
    assert_eq!("[B;1b,2b,3b]", to_snbt(&nbt!([B; 1, 2, 3])));
    assert_eq!("[B;-1b,2b,-3b,4b]", to_snbt(&nbt!([B; -1, 2, -3, 4])));
    assert_eq!("[I;1,2,3]", to_snbt(&nbt!([I; 1, 2, 3])));
    assert_eq!("[I;-1,2,-3,4]", to_snbt(&nbt!([I; -1, 2, -3, 4])));
}

#[test]
fn encode_nested_example() {
    let doc = nbt!({"a": 1, "b": "hi"});
    assert_eq!("{a:1,b:\"hi\"}", to_snbt(&doc));
    assert_eq!(doc, from_snbt("{a:1,b:\"hi\"}").unwrap());
}

#[test]
fn parse_number_suffix_inference() {
    assert_eq!(Value::Int(5), from_snbt("5").unwrap());
    assert_eq!(Value::Int(5), from_snbt("+5").unwrap());
    assert_eq!(Value::Int(-5), from_snbt("-5").unwrap());
    assert_eq!(Value::Double(5.0), from_snbt("5.0").unwrap());
    assert_eq!(Value::Double(50.0), from_snbt("50.").unwrap());
    assert_eq!(Value::Double(0.5), from_snbt(".5").unwrap());
    assert_eq!(Value::Double(5000.0), from_snbt("5e3").unwrap());
    assert_eq!(Value::Double(1500.0), from_snbt("1.5e+3").unwrap());
    assert_eq!(Value::Byte(5), from_snbt("5b").unwrap());
    assert_eq!(Value::Byte(5), from_snbt("5B").unwrap());
    assert_eq!(Value::Short(5), from_snbt("5s").unwrap());
    assert_eq!(Value::Long(5), from_snbt("5L").unwrap());
    assert_eq!(Value::Long(5), from_snbt("5l").unwrap());
    assert_eq!(Value::Float(5.0), from_snbt("5f").unwrap());
    assert_eq!(Value::Float(-50.0), from_snbt("-5000.e-2f").unwrap());
    assert_eq!(Value::Double(5.0), from_snbt("5d").unwrap());
    assert_eq!(Value::Double(5.5), from_snbt("5.5D").unwrap());
}

#[test]
fn parse_nonfinite_suffixed() {
    assert_eq!(Value::Float(f32::INFINITY), from_snbt("inff").unwrap());
    assert_eq!(Value::Float(f32::NEG_INFINITY), from_snbt("-Inff").unwrap());
    assert_eq!(
        Value::Double(f64::INFINITY),
        from_snbt("Infinityd").unwrap()
    );
    match from_snbt("NaNf").unwrap() {
        Value::Float(f) => assert!(f.is_nan()),
        other => panic!("expected float, got {:?}", other),
    }
    // Without a suffix these are not number literals.
    assert_eq!(Value::String("nan".into()), from_snbt("nan").unwrap());
    assert_eq!(Value::String("inf".into()), from_snbt("inf").unwrap());
}

#[test]
fn parse_bare_strings() {
    assert_eq!(Value::String("hello".into()), from_snbt("hello").unwrap());
    assert_eq!(
        Value::String("no+.quo0tes".into()),
        from_snbt("no+.quo0tes").unwrap()
    );
    // Out of range for a byte, so not a number literal at all.
    assert_eq!(Value::String("300b".into()), from_snbt("300b").unwrap());
    assert_eq!(Value::String("1ef".into()), from_snbt("1ef").unwrap());
}

#[test]
fn parse_quoted_strings() {
    assert_eq!(Value::String("simple".into()), from_snbt("\"simple\"").unwrap());
    assert_eq!(
        Value::String("this'is a string".into()),
        from_snbt("'this\\'is a string'").unwrap()
    );
    assert_eq!(
        Value::String("yet\"ano\\\"ther".into()),
        from_snbt("\"yet\\\"ano\\\\\\\"ther\"").unwrap()
    );
    // A quote of the other kind needs no escape.
    assert_eq!(Value::String("a\"b".into()), from_snbt("'a\"b'").unwrap());
    assert_eq!(Value::String("héllo".into()), from_snbt("\"h\\u00e9llo\"").unwrap());
    assert_eq!(Value::String("😀".into()), from_snbt("\"\\ud83d\\ude00\"").unwrap());
    assert_eq!(Value::String("a/b".into()), from_snbt("\"a\\/b\"").unwrap());
    // Raw non-ASCII is fine too, escaping it is the encoder's choice.
    assert_eq!(Value::String("héllo".into()), from_snbt("\"héllo\"").unwrap());
}

#[test]
fn parse_compound() {
    let doc = from_snbt("{x:-10,s:test}").unwrap();
    assert_eq!(nbt!({"x": -10, "s": "test"}), doc);

    let doc = from_snbt("{\"has space\":1b,'single quoted':2b}").unwrap();
    assert_eq!(
        nbt!({"has space": Value::Byte(1), "single quoted": Value::Byte(2)}),
        doc
    );

    // Numeric-looking keys stay keys.
    assert_eq!(nbt!({"5b": 1}), from_snbt("{5b:1}").unwrap());
}

#[test]
fn parse_preserves_compound_order() {
    let doc = from_snbt("{z:1,a:2,m:3}").unwrap();
    let keys: Vec<&str> = doc
        .as_compound()
        .unwrap()
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(vec!["z", "a", "m"], keys);
    assert_eq!("{z:1,a:2,m:3}", to_snbt(&doc));
}

#[test]
fn parse_duplicate_keys_last_wins() {
    let doc = from_snbt("{a:1,a:2}").unwrap();
    let compound = doc.as_compound().unwrap();
    assert_eq!(1, compound.len());
    assert_eq!(Some(&Value::Int(2)), compound.get("a"));
}

#[test]
fn parse_typed_arrays() {
    assert_eq!(nbt!([B; 1, -2, 3]), from_snbt("[B;1b,-2b,3B]").unwrap());
    // The byte suffix is optional on the way in.
    assert_eq!(nbt!([B; 12, 13, 14]), from_snbt("[B;12, 13, 14]").unwrap());
    assert_eq!(nbt!([I; 1, 2, -3]), from_snbt("[I;1,2,-3]").unwrap());
    assert_eq!(nbt!([B;]), from_snbt("[B;]").unwrap());
    assert_eq!(nbt!([I;]), from_snbt("[I;]").unwrap());
}

#[test]
fn parse_array_lookahead() {
    // No semicolon after the letter, so these are plain lists of strings.
    assert_eq!(nbt!(["B"]), from_snbt("[B]").unwrap());
    assert_eq!(nbt!(["I", "x"]), from_snbt("[I,x]").unwrap());
}

#[test]
fn parse_heterogeneous_list() {
    let doc = from_snbt("[1,hello,2b]").unwrap();
    assert_eq!(
        Value::List(vec![
            Value::Int(1),
            Value::String("hello".into()),
            Value::Byte(2)
        ]),
        doc
    );
    // And it encodes right back.
    assert_eq!("[1,\"hello\",2b]", to_snbt(&doc));
}

#[test]
fn parse_skips_whitespace_between_tokens() {
    let doc = from_snbt(" {\n  a : 1 ,\t\"b\" : [ 1 , 2b ] ,\r\n c : { } }  ").unwrap();
    assert_eq!(
        nbt!({"a": 1, "b": [1, Value::Byte(2)], "c": {}}),
        doc
    );
}

#[test]
fn round_trip_all_variants() {
    let doc = nbt!({
        "byte": Value::Byte(-12),
        "short": Value::Short(-1234),
        "int": 34567,
        "long": Value::Long(1234567890123),
        "float": Value::Float(1.5),
        "double": 0.25,
        "text": "with \"quotes\", \\backslashes\\ and héllo",
        "has space": "quoted key",
        "bytes": [B; 1, -2, 3],
        "ints": [I; 1, 2, -3],
        "list": ["a", "b"],
        "nested": {"inner": [{"x": 1}, {"y": 2}]},
        "empty_list": [],
        "empty_compound": {},
    });
    assert_eq!(doc, from_snbt(&to_snbt(&doc)).unwrap());
}

#[test]
fn malformed_input_rejected_with_offset() {
    let err = from_snbt("{a:1").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Syntax { offset: 4 }));
    assert_eq!(Some(4), err.offset());

    let err = from_snbt("").unwrap_err();
    assert_eq!(Some(0), err.offset());

    let err = from_snbt("{a 1}").unwrap_err();
    assert_eq!(Some(3), err.offset());

    let err = from_snbt("[1,2").unwrap_err();
    assert_eq!(Some(4), err.offset());

    let err = from_snbt("{} x").unwrap_err();
    assert_eq!(Some(3), err.offset());
    assert!(err.to_string().contains("trailing data"));

    let err = from_snbt("\"not closed").unwrap_err();
    assert_eq!(Some(0), err.offset());
    assert!(err.to_string().contains("unterminated"));

    let err = from_snbt("[L;1l]").unwrap_err();
    assert_eq!(Some(1), err.offset());

    let err = from_snbt("[B;hello]").unwrap_err();
    assert_eq!(Some(3), err.offset());

    // Suffixed elements are not valid in an int array.
    assert!(from_snbt("[I;1b]").is_err());
}

#[test]
fn trailing_commas_rejected() {
    assert!(from_snbt("{a:1,}").unwrap_err().offset() == Some(5));
    assert!(from_snbt("[1,]").unwrap_err().offset() == Some(3));
    assert!(from_snbt("[B;1b,]").is_err());
    assert!(from_snbt("[I;1, ]").is_err());
}

#[test]
fn bad_escapes_rejected() {
    assert!(from_snbt("\"\\q\"").is_err());
    assert!(from_snbt("\"\\u12\"").is_err());
    assert!(from_snbt("\"\\ud83d\"").is_err()); // unpaired high surrogate
    assert!(from_snbt("\"\\ude00\"").is_err()); // unpaired low surrogate
}

#[test]
fn depth_limit_enforced() {
    assert!(from_snbt_with_limit("[[[]]]", 3).is_ok());
    let err = from_snbt_with_limit("[[[[]]]]", 3).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::DepthExceeded));

    let mut deep = "[".repeat(600);
    deep.push_str(&"]".repeat(600));
    let err = from_snbt(&deep).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::DepthExceeded));

    // Scalars do not count towards nesting.
    assert!(from_snbt_with_limit("{a:{b:1}}", 2).is_ok());
}
