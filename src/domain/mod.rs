//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::OutboundMessage;
pub use response::GatewayErrorResponse;
pub use validation::ValidationError;
pub use value::{
    BaseUrl, CountryCode, GatewayErrorKind, MessageText, Password, PlatformId, PlatformPartnerId,
    Receiver, Sender, StatusCode, Username,
};
