//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_message;

pub use send_message::{
    SEND_MESSAGE_PATH, TransportError, decode_error_response, encode_send_message_body,
    request_headers,
};
