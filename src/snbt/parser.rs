//! Token-level parsers for SNBT scalars.
//!
//! The document reader in [`de`](super::de) scans the maximal run of bare
//! bytes (`[A-Za-z0-9._+-]`) and hands the whole token here. A token is a
//! number only if one of these parsers consumes it entirely; everything
//! else, including out-of-range numerics like `300b`, is a bare string.

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, terminated, tuple},
    IResult,
};

use crate::Value;

/// Classify a complete bare token. `None` means the token is not a valid
/// number literal.
///
/// Inference for unsuffixed tokens: plain digits parse as Int; a literal
/// with a decimal point or exponent parses as Double. `inf`/`nan` without a
/// suffix are not number literals (they fall through to bare strings), but
/// with an `f`/`d` suffix they are accepted so that encoded non-finite
/// values reparse.
pub(crate) fn classify(token: &str) -> Option<Value> {
    if let Ok((_, v)) = all_consuming(byte)(token) {
        return Some(Value::Byte(v));
    }
    if let Ok((_, v)) = all_consuming(short)(token) {
        return Some(Value::Short(v));
    }
    if let Ok((_, v)) = all_consuming(long)(token) {
        return Some(Value::Long(v));
    }
    if let Ok((_, v)) = all_consuming(float)(token) {
        return Some(Value::Float(v));
    }
    if let Ok((_, v)) = all_consuming(double_suffixed)(token) {
        return Some(Value::Double(v));
    }
    if let Ok((_, v)) = all_consuming(int)(token) {
        return Some(Value::Int(v));
    }
    if let Ok((_, v)) = all_consuming(double_bare)(token) {
        return Some(Value::Double(v));
    }
    None
}

/// `[B;…]` elements: the `b` suffix the encoder emits is optional, plain
/// integers appear in hand-written documents.
pub(crate) fn byte_array_element(token: &str) -> Option<i8> {
    all_consuming(alt((byte, plain_byte)))(token)
        .ok()
        .map(|(_, v)| v)
}

/// `[I;…]` elements are plain integers, never suffixed.
pub(crate) fn int_array_element(token: &str) -> Option<i32> {
    all_consuming(int)(token).ok().map(|(_, v)| v)
}

fn byte(input: &str) -> IResult<&str, i8> {
    map_res(terminated(decimal, one_of("bB")), |s: &str| s.parse())(input)
}

fn plain_byte(input: &str) -> IResult<&str, i8> {
    map_res(decimal, |s: &str| s.parse())(input)
}

fn short(input: &str) -> IResult<&str, i16> {
    map_res(terminated(decimal, one_of("sS")), |s: &str| s.parse())(input)
}

fn int(input: &str) -> IResult<&str, i32> {
    map_res(decimal, |s: &str| s.parse())(input)
}

fn long(input: &str) -> IResult<&str, i64> {
    map_res(terminated(decimal, one_of("lL")), |s: &str| s.parse())(input)
}

fn float(input: &str) -> IResult<&str, f32> {
    map_res(terminated(float_literal, one_of("fF")), |s: &str| s.parse())(input)
}

fn double_suffixed(input: &str) -> IResult<&str, f64> {
    map_res(terminated(float_literal, one_of("dD")), |s: &str| s.parse())(input)
}

fn double_bare(input: &str) -> IResult<&str, f64> {
    map_res(double_literal, |s: &str| s.parse())(input)
}

// an optionally signed run of digits
fn decimal(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(one_of("+-")), digit1))(input)
}

// every float shape a suffix can follow, including the non-finite names
fn float_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((
            tag_no_case("infinity"),
            tag_no_case("inf"),
            tag_no_case("nan"),
            recognize(tuple((digit1, opt(pair(char('.'), digit0)), opt(exponent)))),
            recognize(tuple((char('.'), digit1, opt(exponent)))),
        )),
    ))(input)
}

// unsuffixed doubles must carry a decimal point or an exponent, otherwise
// the token is an Int
fn double_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((
            recognize(tuple((digit1, char('.'), digit0, opt(exponent)))),
            recognize(tuple((char('.'), digit1, opt(exponent)))),
            recognize(pair(digit1, exponent)),
        )),
    ))(input)
}

fn exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}
