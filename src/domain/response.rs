use crate::domain::value::{GatewayErrorKind, StatusCode};

/// Error body returned by Sergel for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayErrorResponse {
    pub status: StatusCode,
    pub description: String,
}

impl GatewayErrorResponse {
    /// Error kind for the reported status, [`GatewayErrorKind::Unknown`] if unmapped.
    pub fn kind(&self) -> GatewayErrorKind {
        self.status.kind()
    }
}
