use super::Code;
use crate::attributes::{Attribute, Value};
use crate::auth::{AUTHENTICATOR_LENGTH, fill_random};
use crate::dictionary::{CodecError, Dictionary, DictionaryError, builtin};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("Packet too short: {0} bytes (minimum 20)")]
    TooShort(usize),
    #[error("Invalid packet length: {0}")]
    InvalidLength(usize),
    #[error("Attribute record too short: {0} bytes remaining")]
    RecordTooShort(usize),
    #[error("Invalid attribute length: {0}")]
    InvalidAttributeLength(u8),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("Encoded attribute {attr_type} too long: {length} bytes (max 253)")]
    AttributeTooLong { attr_type: u8, length: usize },
    #[error("Encoded packet too long: {0} bytes (max 4095)")]
    PacketTooLong(usize),
    #[error("Unknown packet code: {0}")]
    UnknownCode(u8),
    #[error("Not enough entropy to generate identifier and authenticator")]
    EntropyUnavailable,
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// RADIUS Packet structure as defined in RFC 2865 Section 3
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Code      |  Identifier   |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// |                         Authenticator                         |
/// |                                                               |
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attributes ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The shared secret, the dictionary and (for decoded packets) the original
/// wire buffer are borrowed for the packet's lifetime `'a`.
#[derive(Clone)]
pub struct Packet<'a> {
    /// Packet type (1 byte)
    pub code: Code,
    /// Packet identifier for matching requests/responses (1 byte)
    pub identifier: u8,
    /// Request entropy for Access-Request/Status-Server, keyed digest otherwise
    pub authenticator: [u8; AUTHENTICATOR_LENGTH],
    /// Shared secret, never written to the wire
    pub secret: &'a [u8],
    /// Buffer this packet was decoded from
    pub raw: Option<&'a [u8]>,
    /// Names and codecs for the attributes
    pub dictionary: &'a dyn Dictionary,
    /// Attributes, in wire order
    pub attributes: Vec<Attribute>,
}

impl<'a> Packet<'a> {
    /// Minimum RADIUS packet size (20 bytes: 1 code + 1 id + 2 length + 16 authenticator)
    pub const MIN_PACKET_SIZE: usize = 20;
    /// Maximum RADIUS packet size (RFC 2865 Section 3)
    pub const MAX_PACKET_SIZE: usize = 4095;

    /// New packet with a random identifier and authenticator, using the
    /// builtin dictionary. `None` if the system CSPRNG fails.
    pub fn new(code: Code, secret: &'a [u8]) -> Option<Self> {
        Self::with_dictionary(code, secret, builtin())
    }

    /// Like [`Packet::new`], with an explicit dictionary
    pub fn with_dictionary(
        code: Code,
        secret: &'a [u8],
        dictionary: &'a dyn Dictionary,
    ) -> Option<Self> {
        Self::try_new(code, secret, dictionary).ok()
    }

    /// Like [`Packet::with_dictionary`], reporting why construction failed
    pub fn try_new(
        code: Code,
        secret: &'a [u8],
        dictionary: &'a dyn Dictionary,
    ) -> Result<Self, PacketError> {
        let mut random = [0u8; 1 + AUTHENTICATOR_LENGTH];
        fill_random(&mut random)?;

        let mut authenticator = [0u8; AUTHENTICATOR_LENGTH];
        authenticator.copy_from_slice(&random[1..]);
        Ok(Self::from_parts(
            code,
            random[0],
            authenticator,
            secret,
            dictionary,
        ))
    }

    /// Packet with caller-chosen identifier and authenticator
    pub fn from_parts(
        code: Code,
        identifier: u8,
        authenticator: [u8; AUTHENTICATOR_LENGTH],
        secret: &'a [u8],
        dictionary: &'a dyn Dictionary,
    ) -> Self {
        Packet {
            code,
            identifier,
            authenticator,
            secret,
            raw: None,
            dictionary,
            attributes: Vec::new(),
        }
    }

    /// Reply skeleton for this request.
    ///
    /// The reply keeps the request's identifier, secret and dictionary, and
    /// carries the request authenticator, which seeds the reply's digest
    /// when it is encoded.
    pub fn response(&self, code: Code) -> Packet<'a> {
        Self::from_parts(
            code,
            self.identifier,
            self.authenticator,
            self.secret,
            self.dictionary,
        )
    }

    fn has_name(&self, attr: &Attribute, name: &str) -> bool {
        self.dictionary.name(attr.attr_type) == Some(name)
    }

    /// First attribute whose dictionary name is `name`
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| self.has_name(attr, name))
    }

    /// Value of the first attribute whose dictionary name is `name`
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.attr(name).map(|attr| &attr.value)
    }

    /// Values of every attribute whose dictionary name is `name`, in order
    pub fn values(&self, name: &str) -> Vec<&Value> {
        self.attributes
            .iter()
            .filter(|attr| self.has_name(attr, name))
            .map(|attr| &attr.value)
            .collect()
    }

    /// Text form of the first attribute named `name`, see [`Packet::render`].
    /// A missing attribute gives an empty string.
    pub fn string(&self, name: &str) -> String {
        self.attr(name)
            .map(|attr| self.render(attr))
            .unwrap_or_default()
    }

    /// Text form of one attribute.
    ///
    /// Uses, in order: the codec's [`AttributeStringer`], the value's own
    /// rendering (addresses), text as-is, octets as lossy UTF-8. Anything
    /// else gives an empty string.
    ///
    /// [`AttributeStringer`]: crate::dictionary::AttributeStringer
    pub fn render(&self, attr: &Attribute) -> String {
        if let Some(stringer) = self.dictionary.codec(attr.attr_type).stringer() {
            return stringer.render(&attr.value);
        }
        if let Some(rendered) = attr.value.rendered() {
            return rendered;
        }
        match &attr.value {
            Value::Text(text) => text.clone(),
            Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        }
    }

    /// Add an attribute by dictionary name. The dictionary validates and
    /// normalizes `value`.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PacketError> {
        let attr = self.dictionary.attr(name, value.into())?;
        self.add_attr(attr);
        Ok(())
    }

    pub fn add_attr(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn add_attrs(&mut self, attributes: impl IntoIterator<Item = Attribute>) {
        self.attributes.extend(attributes);
    }

    /// Replace the value of the first attribute named `name`, or add one if
    /// there is none. Replacement goes through the codec's transformer when
    /// it has one, so `set` normalizes values the same way `add` does.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PacketError> {
        let value = value.into();
        let dictionary = self.dictionary;

        let existing = self
            .attributes
            .iter_mut()
            .find(|attr| dictionary.name(attr.attr_type) == Some(name));
        if let Some(attr) = existing {
            attr.value = match dictionary.codec(attr.attr_type).transformer() {
                Some(transformer) => {
                    transformer
                        .transform(value)
                        .map_err(|source| DictionaryError::InvalidValue {
                            name: name.to_string(),
                            source,
                        })?
                }
                None => value,
            };
            return Ok(());
        }

        self.add(name, value)
    }

    /// Remove all attributes
    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    /// User-Name and User-Password of an Access-Request (PAP).
    ///
    /// `None` unless the packet is an Access-Request carrying both
    /// attributes as text.
    pub fn pap(&self) -> Option<(&str, &str)> {
        if self.code != Code::AccessRequest {
            return None;
        }
        let username = self.value("User-Name")?.as_str()?;
        let password = self.value("User-Password")?.as_str()?;
        Some((username, password))
    }
}

impl fmt::Debug for Packet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("code", &self.code)
            .field("identifier", &self.identifier)
            .field("authenticator", &self.authenticator)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeType;
    use crate::dictionary::StandardDictionary;
    use std::net::Ipv4Addr;

    const SECRET: &[u8] = b"sharedsecret";

    fn request() -> Packet<'static> {
        Packet::from_parts(Code::AccessRequest, 1, [9u8; 16], SECRET, builtin())
    }

    #[test]
    fn test_new_packet_is_random() {
        let first = Packet::new(Code::AccessRequest, SECRET).unwrap();
        let second = Packet::new(Code::AccessRequest, SECRET).unwrap();
        assert_ne!(first.authenticator, second.authenticator);
        assert!(first.attributes.is_empty());
        assert!(first.raw.is_none());
    }

    #[test]
    fn test_value_and_values() {
        let mut packet = request();
        packet.add("Reply-Message", "first").unwrap();
        packet.add("Reply-Message", "second").unwrap();
        packet.add_attr(Attribute::octets(200, vec![1, 2, 3]));

        assert_eq!(packet.value("Reply-Message"), Some(&Value::from("first")));
        assert_eq!(
            packet.values("Reply-Message"),
            vec![&Value::from("first"), &Value::from("second")]
        );
        assert!(packet.value("User-Name").is_none());
        assert!(packet.values("User-Name").is_empty());
        // Unnamed tags can't be reached by name
        assert_eq!(packet.attributes.len(), 3);
    }

    #[test]
    fn test_string_rendering_rules() {
        let mut packet = request();
        packet.add("Session-Timeout", 3600u32).unwrap();
        packet.add("NAS-IP-Address", Ipv4Addr::new(10, 1, 2, 3)).unwrap();
        packet.add("Class", vec![b'o', b'k']).unwrap();
        packet.add("User-Name", "alice").unwrap();

        assert_eq!(packet.string("Session-Timeout"), "3600");
        assert_eq!(packet.string("NAS-IP-Address"), "10.1.2.3");
        assert_eq!(packet.string("Class"), "ok");
        assert_eq!(packet.string("User-Name"), "alice");
        assert_eq!(packet.string("Reply-Message"), "");
    }

    #[test]
    fn test_render_each_duplicate() {
        let mut packet = request();
        packet.add("NAS-Port", 1u32).unwrap();
        packet.add("NAS-Port", 2u32).unwrap();

        let rendered: Vec<String> = packet
            .attributes
            .iter()
            .map(|attr| packet.render(attr))
            .collect();
        assert_eq!(rendered, vec!["1", "2"]);
        assert_eq!(packet.string("NAS-Port"), "1");
    }

    #[test]
    fn test_add_rejects_unknown_name() {
        let mut packet = request();
        let err = packet.add("No-Such-Attribute", "x").unwrap_err();
        assert_eq!(
            err,
            PacketError::Dictionary(DictionaryError::InvalidName(
                "No-Such-Attribute".to_string()
            ))
        );
        assert!(packet.attributes.is_empty());
    }

    #[test]
    fn test_set_replaces_first_and_normalizes() {
        let mut packet = request();
        packet.add("NAS-Port", 1u32).unwrap();
        packet.add("NAS-Port", 2u32).unwrap();

        packet.set("NAS-Port", "42").unwrap();
        assert_eq!(
            packet.values("NAS-Port"),
            vec![&Value::Integer(42), &Value::Integer(2)]
        );

        assert!(packet.set("NAS-Port", "forty-two").is_err());
        assert_eq!(packet.value("NAS-Port"), Some(&Value::Integer(42)));
    }

    #[test]
    fn test_set_adds_when_missing() {
        let mut packet = request();
        packet.set("Framed-IP-Address", "192.0.2.1").unwrap();
        assert_eq!(
            packet.attributes,
            vec![Attribute::ipv4(
                AttributeType::FramedIpAddress.as_u8(),
                Ipv4Addr::new(192, 0, 2, 1)
            )]
        );
    }

    #[test]
    fn test_add_attrs_and_clear() {
        let mut packet = request();
        packet.add_attrs([Attribute::string(1, "bob"), Attribute::integer(5, 7)]);
        assert_eq!(packet.attributes.len(), 2);
        packet.clear_attributes();
        assert!(packet.attributes.is_empty());
    }

    #[test]
    fn test_pap() {
        let mut packet = request();
        packet.add("User-Name", "alice").unwrap();
        packet.add("User-Password", "secret123").unwrap();
        assert_eq!(packet.pap(), Some(("alice", "secret123")));

        let mut reply = packet.clone();
        reply.code = Code::AccessAccept;
        assert_eq!(reply.pap(), None);

        let mut no_password = request();
        no_password.add("User-Name", "alice").unwrap();
        assert_eq!(no_password.pap(), None);
    }

    #[test]
    fn test_pap_requires_text_values() {
        let mut packet = request();
        packet.add_attr(Attribute::octets(1, b"alice".to_vec()));
        packet.add("User-Password", "secret123").unwrap();
        assert_eq!(packet.pap(), None);
    }

    #[test]
    fn test_response_shares_request_fields() {
        let mut request = request();
        request.add("User-Name", "alice").unwrap();
        let reply = request.response(Code::AccessAccept);
        assert_eq!(reply.identifier, request.identifier);
        assert_eq!(reply.authenticator, request.authenticator);
        assert_eq!(reply.secret, request.secret);
        assert!(reply.attributes.is_empty());
    }

    #[test]
    fn test_explicit_dictionary() {
        let mut dictionary = StandardDictionary::empty();
        dictionary.register(1, "Login", Box::new(crate::dictionary::TextCodec));
        let mut packet = Packet::with_dictionary(Code::AccessRequest, SECRET, &dictionary).unwrap();
        packet.add("Login", "carol").unwrap();
        assert_eq!(packet.string("Login"), "carol");
        assert!(packet.add("User-Name", "carol").is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", request());
        assert!(!rendered.contains("sharedsecret"));
        assert!(!rendered.contains("115, 104, 97"));
    }
}
