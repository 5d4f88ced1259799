//! nbtser converts NBT tag trees to and from several representations: SNBT
//! text (compact and pretty-printed), big-endian binary NBT, and base64 or
//! hex wrappings of that binary form.
//!
//! * For the owned tree type see [`Value`] and the [`nbt!`] literal macro.
//! * For the text codec see [`to_snbt`], [`to_snbt_pretty`] and
//!   [`from_snbt`].
//! * For the binary codec and its text wrappings see [`to_bytes`],
//!   [`to_base64`] and [`to_hex`] with their `from_` counterparts.
//!
//! Every entry point is a pure function: no I/O, no shared state, safe to
//! call concurrently. Decoding is strict throughout; malformed input of any
//! representation surfaces as a typed [`error::Error`] rather than being
//! skipped or repaired.
//!
//! # Quick example
//!
//! ```
//! use nbtser::{from_snbt, nbt, to_snbt};
//!
//! let doc = nbt!({
//!     "name": "dragon",
//!     "health": 20,
//!     "tags": ["boss", "flying"],
//! });
//!
//! let text = to_snbt(&doc);
//! assert_eq!(text, "{name:\"dragon\",health:20,tags:[\"boss\",\"flying\"]}");
//! assert_eq!(from_snbt(&text).unwrap(), doc);
//! ```

pub mod error;

mod bin_codec;
mod macros;
mod snbt;
mod value;

#[cfg(test)]
mod test;

pub use bin_codec::{from_bytes, from_bytes_with_limit, to_bytes};
pub use snbt::{
    from_snbt, from_snbt_with_limit, to_snbt, to_snbt_pretty, to_snbt_pretty_with, PrettyConfig,
};
pub use value::{Compound, Value};

use error::{Error, Result};

/// Containers nested deeper than this fail with a depth error unless the
/// caller raises the limit through one of the `*_with_limit` entry points.
/// Bounds stack use on adversarial input; any realistic document is far
/// shallower.
pub const DEFAULT_DEPTH_LIMIT: usize = 512;

/// An NBT tag type id. This does not carry the value or the name of the
/// data.
///
/// `LongArray` (id 12) is outside this model's variant set; binary input
/// using it is rejected as malformed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents an array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other values, elements are not required to be
    /// the same type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents an array of Int (i32).
    IntArray = 11,
}

// Crates exist to generate this code for us, but would add to our compile
// times, so we instead write it out manually, the tags will very rarely
// change so isn't a massive burden.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> std::result::Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            _ => return Err(()),
        })
    }
}

/// Serialize a value to binary NBT wrapped in base64 text, safe to embed
/// where raw bytes would be corrupted.
pub fn to_base64(value: &Value) -> Result<String> {
    Ok(base64::encode(to_bytes(value)?))
}

/// Deserialize a value from base64-wrapped binary NBT.
///
/// Decoding is strict: any character outside the base64 alphabet fails with
/// an invalid-base64 error, never skipped.
pub fn from_base64(input: &str) -> Result<Value> {
    let bytes = base64::decode(input).map_err(Error::invalid_base64)?;
    from_bytes(&bytes)
}

/// Serialize a value to binary NBT wrapped in lowercase hex text.
pub fn to_hex(value: &Value) -> Result<String> {
    Ok(hex::encode(to_bytes(value)?))
}

/// Deserialize a value from hex-wrapped binary NBT.
///
/// Decoding is strict: odd-length input and non-hex characters fail with an
/// invalid-hex error.
pub fn from_hex(input: &str) -> Result<Value> {
    let bytes = hex::decode(input).map_err(|e| Error::invalid_hex(e, input.len()))?;
    from_bytes(&bytes)
}
