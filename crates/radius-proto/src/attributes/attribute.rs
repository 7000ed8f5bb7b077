use std::net::Ipv4Addr;

/// Shape of a decoded attribute value
///
/// Every codec declares the kind it produces so callers can check values
/// without guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Bytes,
    Integer,
    Address,
}

/// Decoded attribute value, as produced by a dictionary codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// UTF-8 text (User-Name, Reply-Message, decrypted User-Password, ...)
    Text(String),
    /// Opaque octets (State, Class, Proxy-State, unknown attributes)
    Bytes(Vec<u8>),
    /// 32-bit big-endian integer
    Integer(u32),
    /// IPv4 address
    Address(Ipv4Addr),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Integer(_) => ValueKind::Integer,
            Value::Address(_) => ValueKind::Address,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            Value::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Textual form the value carries by itself, independent of any codec.
    ///
    /// Only addresses have one; text and octets are rendered by the caller.
    pub fn rendered(&self) -> Option<String> {
        match self {
            Value::Address(addr) => Some(addr.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value)
    }
}

impl From<Ipv4Addr> for Value {
    fn from(value: Ipv4Addr) -> Self {
        Value::Address(value)
    }
}

/// RADIUS Attribute-Value pair as defined in RFC 2865 Section 5
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      |    Length     |  Value ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The value is held in decoded form; its wire bytes are produced by the
/// dictionary codec registered for `attr_type` when the packet is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute type (1 byte)
    pub attr_type: u8,
    /// Decoded value
    pub value: Value,
}

impl Attribute {
    /// Minimum attribute length (type + length fields = 2 bytes)
    pub const MIN_LENGTH: usize = 2;
    /// Maximum attribute length (255 bytes including type and length)
    pub const MAX_LENGTH: usize = 255;
    /// Maximum value length (253 bytes)
    pub const MAX_VALUE_LENGTH: usize = 253;

    pub fn new(attr_type: u8, value: impl Into<Value>) -> Self {
        Attribute {
            attr_type,
            value: value.into(),
        }
    }

    /// Create a text attribute
    pub fn string(attr_type: u8, value: impl Into<String>) -> Self {
        Self::new(attr_type, Value::Text(value.into()))
    }

    /// Create an octets attribute
    pub fn octets(attr_type: u8, value: impl Into<Vec<u8>>) -> Self {
        Self::new(attr_type, Value::Bytes(value.into()))
    }

    /// Create an integer attribute
    pub fn integer(attr_type: u8, value: u32) -> Self {
        Self::new(attr_type, Value::Integer(value))
    }

    /// Create an IPv4 address attribute
    pub fn ipv4(attr_type: u8, value: Ipv4Addr) -> Self {
        Self::new(attr_type, Value::Address(value))
    }
}
