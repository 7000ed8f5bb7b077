use super::{AttributeStringer, AttributeTransformer, Codec, CodecError};
use crate::attributes::{Value, ValueKind};
use crate::auth::{decrypt_user_password, encrypt_user_password};
use crate::packet::Packet;
use std::net::Ipv4Addr;

fn unexpected(expected: ValueKind, value: &Value) -> CodecError {
    CodecError::UnexpectedValue {
        expected,
        actual: value.kind(),
    }
}

fn four_bytes(raw: &[u8]) -> Result<[u8; 4], CodecError> {
    raw.try_into().map_err(|_| CodecError::InvalidLength {
        expected: 4,
        actual: raw.len(),
    })
}

fn into_text(value: Value) -> Result<Value, CodecError> {
    match value {
        Value::Text(_) => Ok(value),
        Value::Bytes(bytes) => String::from_utf8(bytes)
            .map(Value::Text)
            .map_err(|_| CodecError::InvalidUtf8),
        other => Err(unexpected(ValueKind::Text, &other)),
    }
}

/// RFC 2865 `text`: UTF-8 strings
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCodec;

impl Codec for TextCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn decode(&self, _packet: &Packet<'_>, raw: &[u8]) -> Result<Value, CodecError> {
        std::str::from_utf8(raw)
            .map(|text| Value::Text(text.to_string()))
            .map_err(|_| CodecError::InvalidUtf8)
    }

    fn encode(&self, _packet: &Packet<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Text(text) => Ok(text.as_bytes().to_vec()),
            Value::Bytes(bytes) => Ok(bytes.clone()),
            other => Err(unexpected(ValueKind::Text, other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for TextCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        into_text(value)
    }
}

/// RFC 2865 `string`: opaque octets
#[derive(Debug, Default, Clone, Copy)]
pub struct OctetsCodec;

impl Codec for OctetsCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Bytes
    }

    fn decode(&self, _packet: &Packet<'_>, raw: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::Bytes(raw.to_vec()))
    }

    fn encode(&self, _packet: &Packet<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Bytes(bytes) => Ok(bytes.clone()),
            Value::Text(text) => Ok(text.as_bytes().to_vec()),
            other => Err(unexpected(ValueKind::Bytes, other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for OctetsCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Bytes(_) => Ok(value),
            Value::Text(text) => Ok(Value::Bytes(text.into_bytes())),
            other => Err(unexpected(ValueKind::Bytes, &other)),
        }
    }
}

/// RFC 2865 `integer` and `time`: 32-bit big-endian
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerCodec;

impl Codec for IntegerCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn decode(&self, _packet: &Packet<'_>, raw: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::Integer(u32::from_be_bytes(four_bytes(raw)?)))
    }

    fn encode(&self, _packet: &Packet<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Integer(number) => Ok(number.to_be_bytes().to_vec()),
            other => Err(unexpected(ValueKind::Integer, other)),
        }
    }

    fn stringer(&self) -> Option<&dyn AttributeStringer> {
        Some(self)
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeStringer for IntegerCodec {
    fn render(&self, value: &Value) -> String {
        value
            .as_integer()
            .map(|number| number.to_string())
            .unwrap_or_default()
    }
}

impl AttributeTransformer for IntegerCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Integer(_) => Ok(value),
            Value::Text(text) => text
                .trim()
                .parse::<u32>()
                .map(Value::Integer)
                .map_err(|_| CodecError::InvalidInteger(text)),
            other => Err(unexpected(ValueKind::Integer, &other)),
        }
    }
}

/// RFC 2865 `address`: IPv4, 4 octets
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressCodec;

impl Codec for AddressCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Address
    }

    fn decode(&self, _packet: &Packet<'_>, raw: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::Address(Ipv4Addr::from(four_bytes(raw)?)))
    }

    fn encode(&self, _packet: &Packet<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Address(addr) => Ok(addr.octets().to_vec()),
            other => Err(unexpected(ValueKind::Address, other)),
        }
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for AddressCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        match value {
            Value::Address(_) => Ok(value),
            Value::Text(text) => text
                .trim()
                .parse::<Ipv4Addr>()
                .map(Value::Address)
                .map_err(|_| CodecError::InvalidAddress(text)),
            Value::Bytes(bytes) => Ok(Value::Address(Ipv4Addr::from(four_bytes(&bytes)?))),
            other => Err(unexpected(ValueKind::Address, &other)),
        }
    }
}

/// User-Password (RFC 2865 Section 5.2)
///
/// On the wire the password is hidden with `MD5(secret + authenticator)`
/// keystream blocks; in memory it is plain text. Decoding therefore needs the
/// packet's secret and authenticator, which is why codecs receive the packet.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserPasswordCodec;

impl Codec for UserPasswordCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn decode(&self, packet: &Packet<'_>, raw: &[u8]) -> Result<Value, CodecError> {
        if packet.secret.is_empty() {
            return Err(CodecError::MissingSecret);
        }
        decrypt_user_password(raw, packet.secret, &packet.authenticator).map(Value::Text)
    }

    fn encode(&self, packet: &Packet<'_>, value: &Value) -> Result<Vec<u8>, CodecError> {
        if packet.secret.is_empty() {
            return Err(CodecError::MissingSecret);
        }
        let password = match value {
            Value::Text(text) => text.as_bytes(),
            Value::Bytes(bytes) => bytes.as_slice(),
            other => return Err(unexpected(ValueKind::Text, other)),
        };
        Ok(encrypt_user_password(
            password,
            packet.secret,
            &packet.authenticator,
        ))
    }

    fn transformer(&self) -> Option<&dyn AttributeTransformer> {
        Some(self)
    }
}

impl AttributeTransformer for UserPasswordCodec {
    fn transform(&self, value: Value) -> Result<Value, CodecError> {
        into_text(value)
    }
}
