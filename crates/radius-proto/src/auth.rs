//! Authenticator computation and verification
//!
//! RADIUS integrity rests on a keyed MD5 digest over the encoded packet
//! (RFC 2865 Section 3, RFC 2866 Section 3, RFC 5176 Section 3.5):
//!
//! ```text
//! Authenticator = MD5(Code + Identifier + Length + Seed + Attributes + Secret)
//! ```
//!
//! where `Seed` is sixteen zero octets for Accounting-Request, CoA-Request
//! and Disconnect-Request, and the Request Authenticator for replies.

use crate::dictionary::CodecError;
use crate::packet::{Code, Packet, PacketError};
use rand::TryRngCore;
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;

/// Length of the Authenticator field
pub const AUTHENTICATOR_LENGTH: usize = 16;

/// Seed used in place of the authenticator for accounting and RFC 5176 requests
pub(crate) const ZERO_SEED: [u8; AUTHENTICATOR_LENGTH] = [0u8; AUTHENTICATOR_LENGTH];

/// Fill `buffer` from the operating system CSPRNG
pub(crate) fn fill_random(buffer: &mut [u8]) -> Result<(), PacketError> {
    OsRng
        .try_fill_bytes(buffer)
        .map_err(|_| PacketError::EntropyUnavailable)
}

/// Generate a random Request Authenticator (16 bytes) per RFC 2865 Section 3
pub fn generate_request_authenticator() -> Result<[u8; AUTHENTICATOR_LENGTH], PacketError> {
    let mut authenticator = [0u8; AUTHENTICATOR_LENGTH];
    fill_random(&mut authenticator)?;
    Ok(authenticator)
}

/// `MD5(header + seed + attributes + secret)`
pub(crate) fn authenticator_digest(
    header: &[u8],
    seed: &[u8; AUTHENTICATOR_LENGTH],
    attributes: &[u8],
    secret: &[u8],
) -> [u8; AUTHENTICATOR_LENGTH] {
    let mut context = md5::Context::new();
    context.consume(header);
    context.consume(seed);
    context.consume(attributes);
    context.consume(secret);
    context.compute().0
}

impl Packet<'_> {
    /// Whether this packet is an authentic reply to `request`.
    ///
    /// Only defined for Access-Accept, Access-Reject, Accounting-Request,
    /// Access-Challenge, CoA-ACK, CoA-NAK, Disconnect-ACK and Disconnect-NAK;
    /// any other code yields `false`. The packet is re-encoded and the digest
    /// is keyed with the request's secret and seeded with the request's
    /// authenticator (zeros for Accounting-Request), then compared with the
    /// stored authenticator. Encoding failures also yield `false`.
    ///
    /// For CoA-ACK/NAK and Disconnect-ACK/NAK, `request` must hold the
    /// authenticator its own encoding computed, which [`Packet::encode`]
    /// writes back for CoA-Request and Disconnect-Request.
    pub fn is_authentic(&self, request: &Packet<'_>) -> bool {
        let seed = match self.code {
            Code::AccountingRequest => ZERO_SEED,
            Code::AccessAccept
            | Code::AccessReject
            | Code::AccessChallenge
            | Code::CoaAck
            | Code::CoaNak
            | Code::DisconnectAck
            | Code::DisconnectNak => request.authenticator,
            _ => return false,
        };

        // None of the accepted codes rewrite the authenticator on encode
        let wire = match self.to_wire() {
            Ok(wire) => wire,
            Err(_) => return false,
        };

        let expected = authenticator_digest(&wire[0..4], &seed, &wire[20..], request.secret);
        expected[..].ct_eq(&self.authenticator[..]).into()
    }

    /// Compute the authenticator this packet's encoding would carry, without
    /// encoding it or touching the stored authenticator.
    ///
    /// Only CoA-Request, CoA-ACK, CoA-NAK, Disconnect-Request, Disconnect-ACK
    /// and Disconnect-NAK are handled; every other code, including
    /// Access-Accept, Access-Reject, Accounting-Request and Access-Challenge,
    /// returns [`PacketError::UnknownCode`].
    pub fn response_authenticator(&self) -> Result<[u8; AUTHENTICATOR_LENGTH], PacketError> {
        match self.code {
            Code::CoaRequest
            | Code::CoaAck
            | Code::CoaNak
            | Code::DisconnectRequest
            | Code::DisconnectAck
            | Code::DisconnectNak => {
                let attributes = self.encode_attributes()?;
                let header = self.header(attributes.len())?;
                self.wire_authenticator(&header, &attributes)
            }
            other => Err(PacketError::UnknownCode(other.as_u8())),
        }
    }
}

fn keystream_block(secret: &[u8], previous: &[u8]) -> [u8; 16] {
    let mut context = md5::Context::new();
    context.consume(secret);
    context.consume(previous);
    context.compute().0
}

/// Hide a User-Password value per RFC 2865 Section 5.2
///
/// The password is NUL-padded to a multiple of 16 bytes, then each block is
/// XORed with `MD5(secret + previous)`, where `previous` is the Request
/// Authenticator for the first block and the prior ciphertext block after.
pub fn encrypt_user_password(
    password: &[u8],
    secret: &[u8],
    authenticator: &[u8; AUTHENTICATOR_LENGTH],
) -> Vec<u8> {
    let blocks = password.len().div_ceil(16).max(1);
    let mut padded = password.to_vec();
    padded.resize(blocks * 16, 0);

    let mut result = Vec::with_capacity(padded.len());
    let mut previous = *authenticator;
    for chunk in padded.chunks(16) {
        let keystream = keystream_block(secret, &previous);
        for (i, byte) in previous.iter_mut().enumerate() {
            *byte = chunk[i] ^ keystream[i];
        }
        result.extend_from_slice(&previous);
    }
    result
}

/// Reveal a hidden User-Password value per RFC 2865 Section 5.2
pub fn decrypt_user_password(
    encrypted: &[u8],
    secret: &[u8],
    authenticator: &[u8; AUTHENTICATOR_LENGTH],
) -> Result<String, CodecError> {
    if encrypted.is_empty() || encrypted.len() % 16 != 0 {
        return Err(CodecError::InvalidPasswordLength(encrypted.len()));
    }

    let mut result = Vec::with_capacity(encrypted.len());
    let mut previous: &[u8] = authenticator;
    for chunk in encrypted.chunks(16) {
        let keystream = keystream_block(secret, previous);
        result.extend(chunk.iter().zip(keystream).map(|(c, k)| c ^ k));
        previous = chunk;
    }

    // Strip NUL padding
    while result.last() == Some(&0) {
        result.pop();
    }

    String::from_utf8(result).map_err(|_| CodecError::InvalidUtf8)
}
