//! Typed Rust client for sending SMS through the Sergel HTTP API.
//!
//! The crate is split into a domain layer of strong types (validation and receiver
//! normalization, no I/O), a transport layer for the JSON wire format, and a small client
//! layer that performs one authenticated `POST {base_url}/sms/send` per message.
//!
//! ```rust,no_run
//! use sergel::{ClientConfig, GatewayErrorKind, SergelClient, SergelError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SergelError> {
//!     let client = SergelClient::builder(ClientConfig {
//!         username: "user".to_owned(),
//!         password: "secret".to_owned(),
//!         platform_id: "platform".to_owned(),
//!         platform_partner_id: "partner".to_owned(),
//!         base_url: "https://api.example.com/".to_owned(),
//!         country_code: None,
//!     })
//!     .country_code("+46")
//!     .build()?;
//!
//!     match client.send("Acme", "070-123 45 67", "hello").await {
//!         Err(err) if err.gateway_kind() == Some(GatewayErrorKind::NoGatesAvailable) => {
//!             eprintln!("try again later: {err}");
//!         }
//!         other => other?,
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxFuture, ClientConfig, SergelClient, SergelClientBuilder, SergelError, SmsSender,
};
pub use domain::{
    BaseUrl, CountryCode, GatewayErrorKind, GatewayErrorResponse, MessageText, OutboundMessage,
    Password, PlatformId, PlatformPartnerId, Receiver, Sender, StatusCode, Username,
    ValidationError,
};
