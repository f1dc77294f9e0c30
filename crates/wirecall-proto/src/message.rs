use rmpv::Value;

use crate::coerce;
use crate::error::{ProtoError, Result};

/// Wire type tag of a request frame.
pub const REQUEST: i64 = 0;
/// Wire type tag of a response frame.
pub const RESPONSE: i64 = 1;
/// Wire type tag of a notification frame.
pub const NOTIFICATION: i64 = 2;

/// One complete protocol message.
///
/// Requests and notifications are what a client writes; responses are what
/// it reads back. All three are carried for the benefit of test harnesses
/// and mock servers, which need both directions.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A call that expects a correlated [`Message::Response`].
    Request {
        id: u32,
        method: String,
        params: Vec<Value>,
    },
    /// The reply to a [`Message::Request`] with the same `id`.
    Response {
        id: u32,
        /// `None` on the happy path; any non-nil value signals failure.
        error: Option<Value>,
        result: Value,
    },
    /// A one-way message with no reply.
    Notification { method: String, params: Vec<Value> },
}

impl Message {
    /// Build a request frame.
    pub fn request(id: u32, method: impl Into<String>, params: Vec<Value>) -> Self {
        Message::Request {
            id,
            method: method.into(),
            params,
        }
    }

    /// Build a successful response frame.
    pub fn response(id: u32, result: Value) -> Self {
        Message::Response {
            id,
            error: None,
            result,
        }
    }

    /// Build an error response frame.
    pub fn response_error(id: u32, error: Value) -> Self {
        Message::Response {
            id,
            error: Some(error),
            result: Value::Nil,
        }
    }

    /// Build a notification frame.
    pub fn notification(method: impl Into<String>, params: Vec<Value>) -> Self {
        Message::Notification {
            method: method.into(),
            params,
        }
    }

    /// The wire representation: a fixed-arity array led by the type tag.
    ///
    /// Params are always nested in their own array, even when empty.
    pub(crate) fn to_value(&self) -> Value {
        match self {
            Message::Request { id, method, params } => Value::Array(vec![
                Value::from(REQUEST),
                Value::from(*id),
                Value::from(method.as_str()),
                Value::Array(params.clone()),
            ]),
            Message::Response { id, error, result } => Value::Array(vec![
                Value::from(RESPONSE),
                Value::from(*id),
                error.clone().unwrap_or(Value::Nil),
                result.clone(),
            ]),
            Message::Notification { method, params } => Value::Array(vec![
                Value::from(NOTIFICATION),
                Value::from(method.as_str()),
                Value::Array(params.clone()),
            ]),
        }
    }

    /// Interpret a decoded value tree as a message.
    pub(crate) fn from_value(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(ProtoError::Malformed("frame is not an array"));
        };
        let Some(tag_value) = items.first() else {
            return Err(ProtoError::Malformed("frame is empty"));
        };
        let tag = coerce::as_int(tag_value)
            .map_err(|_| ProtoError::Malformed("type tag is not an integer"))?;

        match (tag, items.len()) {
            (REQUEST, 4) => {
                let [_, id, method, params] = into_fields(items)?;
                Ok(Message::Request {
                    id: coerce::as_message_id(&id)?,
                    method: coerce::into_string(method)
                        .map_err(|_| ProtoError::Malformed("method is not a string"))?,
                    params: coerce::into_array(params)
                        .map_err(|_| ProtoError::Malformed("params is not an array"))?,
                })
            }
            (RESPONSE, 4) => {
                let [_, id, error, result] = into_fields(items)?;
                Ok(Message::Response {
                    id: coerce::as_message_id(&id)?,
                    error: if error.is_nil() { None } else { Some(error) },
                    result,
                })
            }
            (NOTIFICATION, 3) => {
                let [_, method, params] = into_fields(items)?;
                Ok(Message::Notification {
                    method: coerce::into_string(method)
                        .map_err(|_| ProtoError::Malformed("method is not a string"))?,
                    params: coerce::into_array(params)
                        .map_err(|_| ProtoError::Malformed("params is not an array"))?,
                })
            }
            _ => Err(ProtoError::Malformed(
                "unexpected type tag or element count",
            )),
        }
    }
}

fn into_fields<const N: usize>(items: Vec<Value>) -> Result<[Value; N]> {
    items
        .try_into()
        .map_err(|_| ProtoError::Malformed("unexpected element count"))
}
