use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::domain::{
    GatewayErrorResponse, OutboundMessage, Password, PlatformId, PlatformPartnerId, StatusCode,
    Username,
};

/// Path of the mobile-terminated send endpoint, relative to the base URL.
pub const SEND_MESSAGE_PATH: &str = "/sms/send";

const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid JSON error response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("empty error response body")]
    EmptyBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GatewayRequest<'a> {
    source: &'a str,
    destination: &'a str,
    user_data: &'a str,
    platform_id: &'a str,
    platform_partner_id: &'a str,
    use_delivery_report: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorJsonResponse {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    description: Option<String>,
}

pub fn encode_send_message_body(
    message: &OutboundMessage,
    platform_id: &PlatformId,
    platform_partner_id: &PlatformPartnerId,
) -> Result<String, TransportError> {
    let payload = GatewayRequest {
        source: message.sender().as_str(),
        destination: message.receiver().as_str(),
        user_data: message.text().as_str(),
        platform_id: platform_id.as_str(),
        platform_partner_id: platform_partner_id.as_str(),
        // Delivery reports are never consumed by this client.
        use_delivery_report: false,
    };
    serde_json::to_string(&payload).map_err(TransportError::Encode)
}

/// Decode the first JSON value of a non-2xx body.
///
/// Data after the first value is ignored. `null`, `{}` and missing or `null` fields decode to
/// status `0` with an empty description, which the client reports as an unknown error.
pub fn decode_error_response(json: &str) -> Result<GatewayErrorResponse, TransportError> {
    let parsed = serde_json::Deserializer::from_str(json)
        .into_iter::<Option<ErrorJsonResponse>>()
        .next()
        .ok_or(TransportError::EmptyBody)?
        .map_err(TransportError::Decode)?
        .unwrap_or_default();
    Ok(GatewayErrorResponse {
        status: StatusCode::new(parsed.status.unwrap_or(0)),
        description: parsed.description.unwrap_or_default(),
    })
}

/// `Authorization` header value for HTTP Basic authentication.
pub fn basic_authorization(username: &Username, password: &Password) -> String {
    let credentials = format!("{}:{}", username.as_str(), password.as_str());
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Headers sent with every send request.
pub fn request_headers(username: &Username, password: &Password) -> Vec<(String, String)> {
    vec![
        (
            "Authorization".to_owned(),
            basic_authorization(username, password),
        ),
        ("Content-Type".to_owned(), CONTENT_TYPE_JSON.to_owned()),
    ]
}
