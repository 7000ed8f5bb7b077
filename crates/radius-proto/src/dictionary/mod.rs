//! Attribute dictionary and codec capabilities
//!
//! A [`Dictionary`] gives attribute type tags their meaning: a name, and a
//! [`Codec`] that turns the raw value bytes into a [`Value`] and back. The
//! packet decoder and encoder only ever talk to attributes through this
//! interface, so alternative dictionaries (vendor tables, files) plug in by
//! implementing the two traits.
//!
//! Codecs may additionally expose two narrow capabilities, queried at use
//! time through [`Codec::stringer`] and [`Codec::transformer`]:
//!
//! - [`AttributeStringer`]: a custom textual rendering, used by
//!   [`Packet::string`](crate::Packet::string)
//! - [`AttributeTransformer`]: normalization of an incoming value, applied by
//!   [`Dictionary::attr`] and [`Packet::set`](crate::Packet::set)

mod codecs;
mod standard;

pub use codecs::{AddressCodec, IntegerCodec, OctetsCodec, TextCodec, UserPasswordCodec};
pub use standard::{StandardDictionary, builtin};

use crate::attributes::{Attribute, Value, ValueKind};
use crate::packet::Packet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid value length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Unexpected value kind: expected {expected:?}, got {actual:?}")]
    UnexpectedValue { expected: ValueKind, actual: ValueKind },
    #[error("Invalid UTF-8 in text value")]
    InvalidUtf8,
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),
    #[error("Invalid integer: {0}")]
    InvalidInteger(String),
    #[error("Invalid hidden password length: {0} bytes")]
    InvalidPasswordLength(usize),
    #[error("Shared secret required to hide or reveal User-Password")]
    MissingSecret,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("Unknown attribute name: {0}")]
    InvalidName(String),
    #[error("Invalid value for {name}: {source}")]
    InvalidValue {
        name: String,
        #[source]
        source: CodecError,
    },
}

/// Converts between raw attribute bytes and decoded values
///
/// Both directions receive the packet being decoded or encoded, so codecs
/// that key off packet fields (User-Password hiding uses the shared secret
/// and the authenticator) can reach them.
pub trait Codec: Send + Sync {
    /// The value kind this codec produces
    fn kind(&self) -> ValueKind;

    fn decode(&self, packet: &Packet<'_>, raw: &[u8]) -> Result<Value, CodecError>;

    fn encode(&self, packet: &Packet<'_>, value: &Value) -> Result<Vec<u8>, CodecError>;

    fn stringer(&self) -> Option<&dyn AttributeStringer> {
        None
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        None
    }
}

/// Custom textual rendering of a codec's values
pub trait AttributeStringer {
    fn render(&self, value: &Value) -> String;
}

/// Normalizes a value before it is stored in a packet
pub trait AttributeTransformer {
    fn transform(&self, value: Value) -> Result<Value, CodecError>;
}

/// Name and codec registry for attribute type tags
pub trait Dictionary: Send + Sync {
    /// Codec for `attr_type`. Unregistered tags get an octets codec, so any
    /// well-framed attribute can be decoded and re-encoded.
    fn codec(&self, attr_type: u8) -> &dyn Codec;

    fn name(&self, attr_type: u8) -> Option<&str>;

    /// Resolve `name` to a type tag and build an attribute from `value`,
    /// normalizing or rejecting the value through the codec.
    fn attr(&self, name: &str, value: Value) -> Result<Attribute, DictionaryError>;
}
