//! RADIUS Protocol Implementation
//!
//! This crate provides the wire-format core of the RADIUS protocol as
//! defined in RFC 2865, 2866 and 5176.
//!
//! # Features
//!
//! - Packet encoding and decoding with strict framing checks
//! - Request/Response Authenticator calculation and verification,
//!   including Accounting and CoA/Disconnect rules
//! - Pluggable attribute dictionaries and codecs, with a builtin
//!   RFC 2865/2866/5176 dictionary
//! - MD5-based User-Password hiding
//!
//! # Example
//!
//! ```rust
//! use radius_proto::{Code, Packet, StandardDictionary};
//!
//! let dictionary = StandardDictionary::new();
//! let secret = b"secret";
//!
//! // Create an Access-Request packet
//! let mut request = Packet::with_dictionary(Code::AccessRequest, secret, &dictionary)
//!     .expect("system RNG available");
//! request.add("User-Name", "alice").unwrap();
//! request.add("User-Password", "password").unwrap();
//!
//! // Encode to bytes and decode on the other side
//! let bytes = request.encode().unwrap();
//! let received = Packet::decode(&bytes, secret, &dictionary).unwrap();
//! assert_eq!(received.pap(), Some(("alice", "password")));
//!
//! // Reply and verify
//! let mut reply = received.response(Code::AccessAccept);
//! let reply_bytes = reply.encode().unwrap();
//! let reply = Packet::decode(&reply_bytes, secret, &dictionary).unwrap();
//! assert!(reply.is_authentic(&request));
//! ```

pub mod attributes;
pub mod auth;
pub mod dictionary;
pub mod packet;

pub use attributes::{Attribute, AttributeType, Value, ValueKind};
pub use auth::{
    AUTHENTICATOR_LENGTH, decrypt_user_password, encrypt_user_password,
    generate_request_authenticator,
};
pub use dictionary::{
    AttributeStringer, AttributeTransformer, Codec, CodecError, Dictionary, DictionaryError,
    StandardDictionary,
};
pub use packet::{Code, Packet, PacketError, PacketParser};
