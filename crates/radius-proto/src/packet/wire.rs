//! Wire encoding and decoding of RADIUS packets

use super::{Code, Packet, PacketError};
use crate::attributes::Attribute;
use crate::auth::{AUTHENTICATOR_LENGTH, ZERO_SEED, authenticator_digest};
use crate::dictionary::Dictionary;

const HEADER_LENGTH: usize = 4;

/// Shape shared by every packet decoder, so servers can swap the default
/// decoder for an alternative one.
pub type PacketParser = for<'a> fn(
    data: &'a [u8],
    secret: &'a [u8],
    dictionary: &'a dyn Dictionary,
) -> Result<Packet<'a>, PacketError>;

/// Validate the fixed header and return the declared length
fn declared_length(data: &[u8]) -> Result<usize, PacketError> {
    if data.len() < Packet::MIN_PACKET_SIZE {
        return Err(PacketError::TooShort(data.len()));
    }

    let length = u16::from_be_bytes([data[2], data[3]]) as usize;
    if !(Packet::MIN_PACKET_SIZE..=Packet::MAX_PACKET_SIZE).contains(&length) {
        return Err(PacketError::InvalidLength(length));
    }
    Ok(length)
}

fn decode_body<'a>(
    packet_bytes: &'a [u8],
    secret: &'a [u8],
    dictionary: &'a dyn Dictionary,
) -> Result<Packet<'a>, PacketError> {
    let mut authenticator = [0u8; AUTHENTICATOR_LENGTH];
    authenticator.copy_from_slice(&packet_bytes[HEADER_LENGTH..Packet::MIN_PACKET_SIZE]);

    let mut packet = Packet::from_parts(
        Code::from_u8(packet_bytes[0]),
        packet_bytes[1],
        authenticator,
        secret,
        dictionary,
    );
    packet.raw = Some(packet_bytes);

    let mut remaining = &packet_bytes[Packet::MIN_PACKET_SIZE..];
    while !remaining.is_empty() {
        if remaining.len() < Attribute::MIN_LENGTH {
            return Err(PacketError::RecordTooShort(remaining.len()));
        }

        let attr_type = remaining[0];
        let length = remaining[1];
        if (length as usize) < Attribute::MIN_LENGTH || length as usize > remaining.len() {
            return Err(PacketError::InvalidAttributeLength(length));
        }

        let raw_value = &remaining[Attribute::MIN_LENGTH..length as usize];
        let value = dictionary.codec(attr_type).decode(&packet, raw_value)?;
        packet.attributes.push(Attribute { attr_type, value });

        remaining = &remaining[length as usize..];
    }

    Ok(packet)
}

/// Decode a packet from wire data.
///
/// The declared length is range-checked, and every byte after the header is
/// parsed as attributes. The authenticator is copied verbatim; use
/// [`Packet::is_authentic`] to check it.
pub fn decode<'a>(
    data: &'a [u8],
    secret: &'a [u8],
    dictionary: &'a dyn Dictionary,
) -> Result<Packet<'a>, PacketError> {
    declared_length(data)?;
    decode_body(data, secret, dictionary)
}

/// Decode a packet, honouring the declared length as RFC 2865 Section 3
/// requires: a shorter buffer is rejected and octets past the declared
/// length are treated as padding.
pub fn decode_strict<'a>(
    data: &'a [u8],
    secret: &'a [u8],
    dictionary: &'a dyn Dictionary,
) -> Result<Packet<'a>, PacketError> {
    let length = declared_length(data)?;
    if data.len() < length {
        return Err(PacketError::InvalidLength(length));
    }
    decode_body(&data[..length], secret, dictionary)
}

impl<'a> Packet<'a> {
    /// Decode a packet from wire data, see [`decode`]
    pub fn decode(
        data: &'a [u8],
        secret: &'a [u8],
        dictionary: &'a dyn Dictionary,
    ) -> Result<Self, PacketError> {
        decode(data, secret, dictionary)
    }

    /// Encode attributes as `type, length, value` records, in list order
    pub(crate) fn encode_attributes(&self) -> Result<Vec<u8>, PacketError> {
        let mut buffer = Vec::new();

        for attr in &self.attributes {
            let wire = self.dictionary.codec(attr.attr_type).encode(self, &attr.value)?;
            if wire.len() > Attribute::MAX_VALUE_LENGTH {
                return Err(PacketError::AttributeTooLong {
                    attr_type: attr.attr_type,
                    length: wire.len(),
                });
            }

            buffer.push(attr.attr_type);
            buffer.push((wire.len() + Attribute::MIN_LENGTH) as u8);
            buffer.extend_from_slice(&wire);
        }

        Ok(buffer)
    }

    /// Code, identifier and length for a packet carrying `attributes_len`
    /// attribute bytes
    pub(crate) fn header(&self, attributes_len: usize) -> Result<[u8; HEADER_LENGTH], PacketError> {
        let length = Self::MIN_PACKET_SIZE + attributes_len;
        if length > Self::MAX_PACKET_SIZE {
            return Err(PacketError::PacketTooLong(length));
        }

        let [high, low] = (length as u16).to_be_bytes();
        Ok([self.code.as_u8(), self.identifier, high, low])
    }

    /// Authenticator field for the wire, chosen by code
    pub(crate) fn wire_authenticator(
        &self,
        header: &[u8; HEADER_LENGTH],
        attributes: &[u8],
    ) -> Result<[u8; AUTHENTICATOR_LENGTH], PacketError> {
        match self.code {
            Code::AccessRequest | Code::StatusServer => Ok(self.authenticator),
            code if code.has_computed_authenticator() => {
                let seed = if code.has_zero_seed() {
                    &ZERO_SEED
                } else {
                    &self.authenticator
                };
                Ok(authenticator_digest(header, seed, attributes, self.secret))
            }
            other => Err(PacketError::UnknownCode(other.as_u8())),
        }
    }

    /// Encode without touching the packet
    pub(crate) fn to_wire(&self) -> Result<Vec<u8>, PacketError> {
        let attributes = self.encode_attributes()?;
        let header = self.header(attributes.len())?;
        let authenticator = self.wire_authenticator(&header, &attributes)?;

        let mut buffer = Vec::with_capacity(Self::MIN_PACKET_SIZE + attributes.len());
        buffer.extend_from_slice(&header);
        buffer.extend_from_slice(&authenticator);
        buffer.extend_from_slice(&attributes);
        Ok(buffer)
    }

    /// Encode packet to wire format.
    ///
    /// Access-Request and Status-Server carry the stored authenticator.
    /// Other known codes carry `MD5(header + seed + attributes + secret)`,
    /// seeded with zeros for Accounting-Request, CoA-Request and
    /// Disconnect-Request and with the stored authenticator otherwise.
    ///
    /// For CoA-Request and Disconnect-Request the computed digest is also
    /// written back to `self.authenticator`, so that replies can later be
    /// checked against this request with [`Packet::is_authentic`]. Encoding
    /// is not side-effect free for these codes: whatever authenticator the
    /// packet held before is lost.
    pub fn encode(&mut self) -> Result<Vec<u8>, PacketError> {
        let wire = self.to_wire()?;
        if self.code.overwrites_authenticator() {
            self.authenticator
                .copy_from_slice(&wire[HEADER_LENGTH..Self::MIN_PACKET_SIZE]);
        }
        Ok(wire)
    }
}
