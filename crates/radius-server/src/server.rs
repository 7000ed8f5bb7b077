use crate::config::Config;
use radius_proto::packet::{decode, decode_strict};
use radius_proto::{Dictionary, Packet, PacketError, PacketParser, StandardDictionary};
use std::net::IpAddr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),
    #[error("Invalid client: {0}")]
    InvalidClient(IpAddr),
    #[error("Reply {identifier} does not authenticate against its request")]
    NotAuthentic { identifier: u8 },
}

/// RADIUS packet handling configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Shared secret for clients (used if no client config provided)
    pub secret: Vec<u8>,
    /// Decoder applied to every incoming datagram
    pub packet_parser: PacketParser,
    /// Optional full configuration with client validation
    pub config: Option<Arc<Config>>,
}

impl ServerConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        ServerConfig {
            secret: secret.into(),
            packet_parser: decode,
            config: None,
        }
    }

    /// Replace the packet decoder
    pub fn with_packet_parser(mut self, parser: PacketParser) -> Self {
        self.packet_parser = parser;
        self
    }

    /// Restore the default packet decoder
    pub fn with_default_packet_parser(self) -> Self {
        self.with_packet_parser(decode)
    }

    /// Create server config from a full Config object
    ///
    /// `strict_length_check` selects the length-honouring decoder.
    pub fn from_config(config: Config) -> Self {
        let server_config = ServerConfig::new(config.secret.clone().into_bytes());
        let server_config = if config.strict_length_check {
            server_config.with_packet_parser(decode_strict)
        } else {
            server_config
        };

        ServerConfig {
            config: Some(Arc::new(config)),
            ..server_config
        }
    }

    /// Get the appropriate shared secret for a client IP address
    pub fn secret_for_client(&self, source_ip: IpAddr) -> &[u8] {
        match &self.config {
            Some(config) => config.secret_for(source_ip),
            None => &self.secret,
        }
    }

    /// Check if a client is authorized
    fn is_client_authorized(&self, source_ip: IpAddr) -> bool {
        match &self.config {
            // An empty client list admits everyone
            Some(config) if !config.clients.is_empty() => config.client_for(source_ip).is_some(),
            _ => true,
        }
    }
}

/// Transport-agnostic RADIUS endpoint
///
/// Turns datagrams into packets with the configured decoder, dictionary and
/// per-client secret, and checks replies against the requests they answer.
/// Socket handling is left to the caller.
pub struct RadiusServer {
    config: Arc<ServerConfig>,
    dictionary: Box<dyn Dictionary>,
}

impl RadiusServer {
    /// Create a server using the standard attribute dictionary
    pub fn new(config: ServerConfig) -> Self {
        Self::with_dictionary(config, Box::new(StandardDictionary::new()))
    }

    pub fn with_dictionary(config: ServerConfig, dictionary: Box<dyn Dictionary>) -> Self {
        RadiusServer {
            config: Arc::new(config),
            dictionary,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &dyn Dictionary {
        self.dictionary.as_ref()
    }

    /// Decode a datagram received from `source`
    ///
    /// The packet is keyed with the secret of the matching client, or the
    /// default secret. Sources outside a non-empty client list are refused
    /// before any decoding takes place.
    pub fn parse_request<'s>(
        &'s self,
        data: &'s [u8],
        source: IpAddr,
    ) -> Result<Packet<'s>, ServerError> {
        let request_id = data.get(1).copied().unwrap_or(0);

        if !self.config.is_client_authorized(source) {
            warn!(
                client_ip = %source,
                request_id = request_id,
                "Rejected request from unauthorized client"
            );
            return Err(ServerError::InvalidClient(source));
        }

        let secret = self.config.secret_for_client(source);
        let packet = (self.config.packet_parser)(data, secret, self.dictionary.as_ref())
            .inspect_err(|e| {
                warn!(
                    client_ip = %source,
                    request_id = request_id,
                    error = %e,
                    "Rejected malformed packet"
                );
            })?;

        debug!(
            packet_type = %packet.code,
            client_ip = %source,
            request_id = packet.identifier,
            attributes = packet.attributes.len(),
            "Received RADIUS packet"
        );

        Ok(packet)
    }

    /// Decode a reply to `request` and check its authenticator
    ///
    /// The reply is decoded with the request's secret. For CoA and
    /// Disconnect exchanges `request` must be the packet as it was sent,
    /// after encoding.
    pub fn verify_reply<'p>(
        &'p self,
        data: &'p [u8],
        request: &Packet<'p>,
    ) -> Result<Packet<'p>, ServerError> {
        let reply = (self.config.packet_parser)(data, request.secret, self.dictionary.as_ref())?;

        if !reply.is_authentic(request) {
            warn!(
                packet_type = %reply.code,
                request_id = reply.identifier,
                "Reply failed authenticator check"
            );
            return Err(ServerError::NotAuthentic {
                identifier: reply.identifier,
            });
        }

        debug!(
            packet_type = %reply.code,
            request_id = reply.identifier,
            "Verified RADIUS reply"
        );

        Ok(reply)
    }
}
