//! Big-endian binary NBT reading and writing.
//!
//! A document is a root entry: type id, name (written empty here, discarded
//! on read) and payload. Strings are length-prefixed modified UTF-8, arrays
//! and lists carry an `i32` count, compounds run until an `End` id.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::{Error, Result},
    value::Compound,
    Tag, Value, DEFAULT_DEPTH_LIMIT,
};

/// Serialize a value to binary NBT.
///
/// Fails with an invariant violation if the tree holds something the wire
/// format cannot express: a list whose elements are not all the same
/// variant, a string longer than a `u16` length prefix, or a sequence
/// longer than an `i32` count.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.write_u8(value.tag() as u8)?;
    write_str(&mut out, "")?;
    write_payload(&mut out, value)?;
    Ok(out)
}

/// Deserialize a value from binary NBT, with the default depth limit.
pub fn from_bytes(input: &[u8]) -> Result<Value> {
    from_bytes_with_limit(input, DEFAULT_DEPTH_LIMIT)
}

/// Deserialize a value from binary NBT, refusing to nest containers more
/// than `depth_limit` levels deep.
pub fn from_bytes_with_limit(input: &[u8], depth_limit: usize) -> Result<Value> {
    let mut reader = input;
    let tag = read_tag(&mut reader)?;
    read_str(&mut reader)?; // root name, conventionally empty
    let value = read_payload(&mut reader, tag, 0, depth_limit)?;
    if !reader.is_empty() {
        return Err(Error::malformed("trailing data after root tag"));
    }
    Ok(value)
}

fn write_payload<W: Write>(w: &mut W, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => w.write_i8(*v)?,
        Value::Short(v) => w.write_i16::<BigEndian>(*v)?,
        Value::Int(v) => w.write_i32::<BigEndian>(*v)?,
        Value::Long(v) => w.write_i64::<BigEndian>(*v)?,
        Value::Float(v) => w.write_f32::<BigEndian>(*v)?,
        Value::Double(v) => w.write_f64::<BigEndian>(*v)?,
        Value::String(v) => write_str(w, v)?,
        Value::ByteArray(xs) => {
            write_len(w, xs.len())?;
            for b in xs {
                w.write_i8(*b)?;
            }
        }
        Value::IntArray(xs) => {
            write_len(w, xs.len())?;
            for n in xs {
                w.write_i32::<BigEndian>(*n)?;
            }
        }
        Value::List(xs) => {
            let element = xs.first().map(Value::tag).unwrap_or(Tag::End);
            for v in xs {
                if v.tag() != element {
                    return Err(Error::invariant(
                        "list elements do not share a single tag type",
                    ));
                }
            }
            w.write_u8(element as u8)?;
            write_len(w, xs.len())?;
            for v in xs {
                write_payload(w, v)?;
            }
        }
        Value::Compound(m) => {
            for (name, v) in m {
                w.write_u8(v.tag() as u8)?;
                write_str(w, name)?;
                write_payload(w, v)?;
            }
            w.write_u8(Tag::End as u8)?;
        }
    }
    Ok(())
}

fn write_str<W: Write>(w: &mut W, s: &str) -> Result<()> {
    let encoded = cesu8::to_java_cesu8(s);
    let len = u16::try_from(encoded.len()).map_err(|_| {
        Error::invariant(format!(
            "string of {} bytes does not fit a u16 length prefix",
            encoded.len()
        ))
    })?;
    w.write_u16::<BigEndian>(len)?;
    w.write_all(&encoded)?;
    Ok(())
}

fn write_len<W: Write>(w: &mut W, len: usize) -> Result<()> {
    let len = i32::try_from(len)
        .map_err(|_| Error::invariant(format!("sequence of {} elements is too long", len)))?;
    w.write_i32::<BigEndian>(len)?;
    Ok(())
}

fn read_tag<R: Read>(r: &mut R) -> Result<Tag> {
    let b = r.read_u8()?;
    Tag::try_from(b).map_err(|_| Error::malformed(format!("invalid nbt tag value: {}", b)))
}

fn read_str<R: Read>(r: &mut R) -> Result<String> {
    let len = r.read_u16::<BigEndian>()? as usize;
    let buf = read_exact(r, len)?;
    let s = cesu8::from_java_cesu8(&buf).map_err(|_| {
        Error::malformed(format!(
            "invalid nbt string: nonunicode: {}",
            String::from_utf8_lossy(&buf)
        ))
    })?;
    Ok(s.into_owned())
}

fn read_len<R: Read>(r: &mut R) -> Result<usize> {
    let len = r.read_i32::<BigEndian>()?;
    usize::try_from(len).map_err(|_| Error::malformed(format!("negative length: {}", len)))
}

// Grows the buffer as bytes arrive rather than trusting the claimed length,
// so a hostile length field fails at end of input instead of allocating.
fn read_exact<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    r.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(Error::malformed("eof: unexpectedly ran out of input"));
    }
    Ok(buf)
}

fn read_payload<R: Read>(r: &mut R, tag: Tag, depth: usize, depth_limit: usize) -> Result<Value> {
    Ok(match tag {
        Tag::End => return Err(Error::malformed("unexpected End tag")),
        Tag::Byte => Value::Byte(r.read_i8()?),
        Tag::Short => Value::Short(r.read_i16::<BigEndian>()?),
        Tag::Int => Value::Int(r.read_i32::<BigEndian>()?),
        Tag::Long => Value::Long(r.read_i64::<BigEndian>()?),
        Tag::Float => Value::Float(r.read_f32::<BigEndian>()?),
        Tag::Double => Value::Double(r.read_f64::<BigEndian>()?),
        Tag::String => Value::String(read_str(r)?),
        Tag::ByteArray => {
            let len = read_len(r)?;
            let buf = read_exact(r, len)?;
            Value::ByteArray(buf.into_iter().map(|b| b as i8).collect())
        }
        Tag::IntArray => {
            let len = read_len(r)?;
            let mut xs = Vec::new();
            for _ in 0..len {
                xs.push(r.read_i32::<BigEndian>()?);
            }
            Value::IntArray(xs)
        }
        Tag::List => {
            if depth >= depth_limit {
                return Err(Error::depth_exceeded(depth_limit));
            }
            let element = read_tag(r)?;
            let len = read_len(r)?;
            if element == Tag::End && len > 0 {
                return Err(Error::malformed("non-empty list of End tags"));
            }
            let mut xs = Vec::new();
            for _ in 0..len {
                xs.push(read_payload(r, element, depth + 1, depth_limit)?);
            }
            Value::List(xs)
        }
        Tag::Compound => {
            if depth >= depth_limit {
                return Err(Error::depth_exceeded(depth_limit));
            }
            let mut compound = Compound::new();
            loop {
                let tag = read_tag(r)?;
                if tag == Tag::End {
                    break;
                }
                let name = read_str(r)?;
                let value = read_payload(r, tag, depth + 1, depth_limit)?;
                compound.insert(name, value);
            }
            Value::Compound(compound)
        }
    })
}
