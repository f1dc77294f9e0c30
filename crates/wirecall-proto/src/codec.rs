use std::io::{Read, Write};

use rmpv::Value;
use tracing::debug;

use crate::coerce;
use crate::error::{ProtoError, Result};
use crate::message::{Message, RESPONSE};

/// Encode one message into `wr` as a single frame.
///
/// The container-length marker goes out first, committing the element count;
/// the fields follow in wire order. Arity therefore cannot drift from the
/// message kind on the send path.
pub fn write_message<W: Write>(wr: &mut W, msg: &Message) -> Result<()> {
    rmpv::encode::write_value(wr, &msg.to_value())?;
    Ok(())
}

/// Decode one frame from `rd` into a [`Message`] of any kind.
///
/// This is the symmetric counterpart to [`write_message`], used by servers
/// and test harnesses. Clients awaiting a reply should use
/// [`read_response`], which enforces the response shape.
pub fn read_message<R: Read>(rd: &mut R) -> Result<Message> {
    let value = rmpv::decode::read_value(rd)?;
    Message::from_value(value)
}

/// Decode one frame from `rd` and interpret it as a response.
///
/// Validation order follows the wire layout: the frame must be a 4-element
/// array, element 0 must integer-coerce to the response tag, element 1 is
/// the message id. A non-nil element 2 fails the call with
/// [`ProtoError::Remote`] carrying that value's string rendering, and
/// element 3 is ignored in that case. Otherwise element 3 is returned
/// verbatim as the result.
pub fn read_response<R: Read>(rd: &mut R) -> Result<(u32, Value)> {
    let value = rmpv::decode::read_value(rd)?;

    let Value::Array(items) = value else {
        return Err(reject("frame is not an array"));
    };
    let [tag, id, error, result]: [Value; 4] = items
        .try_into()
        .map_err(|_| reject("response frame must have exactly four elements"))?;

    let tag = coerce::as_int(&tag).map_err(|_| reject("type tag is not an integer"))?;
    if tag != RESPONSE {
        return Err(reject("unexpected type tag for a response frame"));
    }
    let id = coerce::as_message_id(&id)?;

    if !error.is_nil() {
        let rendered = error
            .as_str()
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string());
        return Err(ProtoError::Remote(rendered));
    }

    Ok((id, result))
}

fn reject(reason: &'static str) -> ProtoError {
    debug!(reason, "rejecting incoming frame");
    ProtoError::Malformed(reason)
}
