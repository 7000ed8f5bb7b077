//! RADIUS Server Implementation
//!
//! This crate provides the transport-agnostic request side of a RADIUS
//! endpoint built on top of the `radius-proto` protocol implementation.
//!
//! # Features
//!
//! - JSON configuration with per-client shared secrets (CIDR matching)
//! - Selectable packet decoder
//! - Reply authenticator verification
//! - Structured logging via `tracing`
//!
//! # Example
//!
//! ```rust
//! use radius_proto::{Code, Packet};
//! use radius_server::{RadiusServer, ServerConfig};
//!
//! let server = RadiusServer::new(ServerConfig::new(b"secret".to_vec()));
//!
//! let mut request = Packet::new(Code::AccessRequest, b"secret").unwrap();
//! request.add("User-Name", "alice").unwrap();
//! request.add("User-Password", "password").unwrap();
//! let datagram = request.encode().unwrap();
//!
//! let received = server
//!     .parse_request(&datagram, "127.0.0.1".parse().unwrap())
//!     .unwrap();
//! assert_eq!(received.pap(), Some(("alice", "password")));
//! ```

pub mod config;
pub mod server;

pub use config::{Client, Config, ConfigError};
pub use server::{RadiusServer, ServerConfig, ServerError};
