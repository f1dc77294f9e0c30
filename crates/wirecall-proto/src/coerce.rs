//! Structural accessors over [`rmpv::Value`].
//!
//! Decoded frames arrive as generic value trees; these helpers pull typed
//! fields out of them, failing with [`ProtoError::Malformed`] instead of
//! panicking when the shape is wrong.

use rmpv::Value;

use crate::error::{ProtoError, Result};

/// Coerce an integer of any encoded width or signedness to `i64`.
///
/// Unsigned values above `i64::MAX` wrap; tag and id fields never reach
/// that range in practice.
pub fn as_int(value: &Value) -> Result<i64> {
    let Value::Integer(n) = value else {
        return Err(ProtoError::Malformed("expected an integer"));
    };
    if let Some(v) = n.as_i64() {
        Ok(v)
    } else if let Some(v) = n.as_u64() {
        Ok(v as i64)
    } else {
        Err(ProtoError::Malformed("expected an integer"))
    }
}

/// Coerce a value to the 32-bit message id space, truncating wider integers.
pub fn as_message_id(value: &Value) -> Result<u32> {
    as_int(value)
        .map(|v| v as u32)
        .map_err(|_| ProtoError::Malformed("message id is not an integer"))
}

/// Take a string out of a value.
pub fn into_string(value: Value) -> Result<String> {
    let Value::String(s) = value else {
        return Err(ProtoError::Malformed("expected a string"));
    };
    s.into_str()
        .ok_or(ProtoError::Malformed("string is not valid UTF-8"))
}

/// Take an array out of a value.
pub fn into_array(value: Value) -> Result<Vec<Value>> {
    let Value::Array(items) = value else {
        return Err(ProtoError::Malformed("expected an array"));
    };
    Ok(items)
}
