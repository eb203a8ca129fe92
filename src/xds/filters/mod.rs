//! Filter utilities shared by the HTTP filter builders.
//!
//! Envoy carries filter configuration as `google.protobuf.Any`. The helpers
//! here pack prost messages into that form, either infallibly for payloads
//! whose encoding cannot fail, or through the fallible path that surfaces
//! [`crate::Error::PayloadEncoding`].

pub mod http;

use envoy_types::pb::google::protobuf::Any;
use prost::Message;

/// Helper for building Envoy `Any` values from prost messages.
///
/// Encoding into a growable buffer never fails, so this is used for the
/// static marker payloads (e.g. the router filter).
pub fn any_from_message<M: Message>(type_url: impl Into<String>, msg: &M) -> Any {
    Any { type_url: type_url.into(), value: msg.encode_to_vec() }
}

/// Encode a prost message into an Envoy `Any`, reporting encoding failures.
pub fn encode_any<M: Message>(type_url: impl Into<String>, msg: &M) -> crate::Result<Any> {
    let type_url = type_url.into();
    let mut buf = Vec::with_capacity(msg.encoded_len());
    if let Err(source) = msg.encode(&mut buf) {
        return Err(crate::Error::payload_encoding(type_url, source));
    }
    Ok(Any { type_url, value: buf })
}

/// Error helper for invalid filter configuration.
pub fn invalid_config(msg: impl Into<String>) -> crate::Error {
    crate::Error::config(msg.into())
}
