//! Client layer: orchestrates validation, normalization and the transport call.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    BaseUrl, CountryCode, GatewayErrorKind, OutboundMessage, Password, PlatformId,
    PlatformPartnerId, StatusCode, Username, ValidationError,
};
use crate::transport::{self, TransportError};

/// Boxed future returned by the object-safe traits of this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.body(body).send().await?;
            let status = response.status().as_u16();
            // Reading the body consumes the response, so the connection is released on
            // every path below, decode failures included.
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Clone, Default, Deserialize)]
/// Raw client settings, validated by [`SergelClient::new`] or [`SergelClientBuilder::build`].
///
/// All fields except `country_code` are required. The struct derives `Deserialize` so it can
/// be embedded in an application's own configuration file.
pub struct ClientConfig {
    pub username: String,
    pub password: String,
    pub platform_id: String,
    pub platform_partner_id: String,
    pub base_url: String,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("platform_id", &self.platform_id)
            .field("platform_partner_id", &self.platform_partner_id)
            .field("base_url", &self.base_url)
            .field("country_code", &self.country_code)
            .finish()
    }
}

#[derive(Debug, Clone)]
struct Credentials {
    username: Username,
    password: Password,
    platform_id: PlatformId,
    platform_partner_id: PlatformPartnerId,
    base_url: BaseUrl,
}

impl Credentials {
    fn validate(config: ClientConfig) -> Result<(Self, Option<CountryCode>), ValidationError> {
        let credentials = Self {
            username: Username::new(config.username)?,
            password: Password::new(config.password)?,
            platform_id: PlatformId::new(config.platform_id)?,
            platform_partner_id: PlatformPartnerId::new(config.platform_partner_id)?,
            base_url: BaseUrl::new(config.base_url)?,
        };
        let country_code = config.country_code.map(CountryCode::new).transpose()?;
        Ok((credentials, country_code))
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SergelClient`].
///
/// Callers can branch on the variant (and on [`GatewayErrorKind`] for gateway failures):
/// - configuration and input problems are caught before any network call,
/// - transport, encode and parse failures are distinct from errors Sergel reports itself.
pub enum SergelError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A non-2xx response carried a body that is not a Sergel error object.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Sergel rejected the message with a status code.
    #[error("gateway error {}: {kind}", .status.as_i64())]
    Gateway {
        kind: GatewayErrorKind,
        status: StatusCode,
        http_status: u16,
        description: String,
    },
}

impl SergelError {
    /// The gateway-reported kind, if this error came from Sergel.
    pub fn gateway_kind(&self) -> Option<GatewayErrorKind> {
        match self {
            Self::Gateway { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// `true` when the error was raised before any request was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }
}

impl From<TransportError> for SergelError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Encode(err) => Self::Encode(err),
            err @ (TransportError::Decode(_) | TransportError::EmptyBody) => {
                Self::Parse(Box::new(err))
            }
        }
    }
}

/// Capability set of an SMS client: send one message, get one result.
///
/// [`SergelClient`] is the concrete implementation; the trait exists so callers can hold an
/// `Arc<dyn SmsSender>` and substitute a fake in their own tests.
pub trait SmsSender: Send + Sync {
    /// Send `message` from `sender` to `receiver`.
    fn send<'a>(
        &'a self,
        sender: &'a str,
        receiver: &'a str,
        message: &'a str,
    ) -> BoxFuture<'a, Result<(), SergelError>>;
}

#[derive(Debug, Clone)]
/// Builder for [`SergelClient`].
///
/// Use this when you need a country code, a timeout, or a custom user-agent.
pub struct SergelClientBuilder {
    config: ClientConfig,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SergelClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            timeout: None,
            user_agent: None,
        }
    }

    /// Prefix local receiver numbers with this code (must start with `+`).
    pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
        self.config.country_code = Some(country_code.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the configuration and build a [`SergelClient`].
    ///
    /// No network activity happens here.
    pub fn build(self) -> Result<SergelClient, SergelError> {
        let (credentials, country_code) = Credentials::validate(self.config)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SergelError::Transport(Box::new(err)))?;

        Ok(SergelClient {
            credentials: Arc::new(credentials),
            country_code,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Sergel client.
///
/// Each [`SergelClient::send`] validates its input, normalizes the receiver, and makes
/// exactly one `POST {base_url}/sms/send` request. Nothing is retried.
///
/// The optional country code is the only mutable state. Changing it takes `&mut self`, so a
/// client shared between tasks cannot have it changed mid-send; configure it before sharing.
pub struct SergelClient {
    credentials: Arc<Credentials>,
    country_code: Option<CountryCode>,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for SergelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SergelClient")
            .field("credentials", &self.credentials)
            .field("country_code", &self.country_code)
            .finish_non_exhaustive()
    }
}

impl SergelClient {
    /// Validate `config` and create a client with default HTTP settings.
    ///
    /// Fails with [`ValidationError::Empty`] naming the first missing field, checked in the
    /// order username, password, platform id, platform partner id, base URL.
    pub fn new(config: ClientConfig) -> Result<Self, SergelError> {
        let (credentials, country_code) = Credentials::validate(config)?;
        Ok(Self {
            credentials: Arc::new(credentials),
            country_code,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        })
    }

    /// Start building a client with custom settings.
    pub fn builder(config: ClientConfig) -> SergelClientBuilder {
        SergelClientBuilder::new(config)
    }

    /// Base URL with its trailing slash stripped.
    pub fn base_url(&self) -> &str {
        self.credentials.base_url.as_str()
    }

    pub fn country_code(&self) -> Option<&CountryCode> {
        self.country_code.as_ref()
    }

    /// Set the country code used for subsequent sends.
    ///
    /// Fails with [`ValidationError::BadCountryCode`] unless `code` starts with `+`; the
    /// previous value is kept in that case.
    pub fn set_country_code(&mut self, code: impl Into<String>) -> Result<(), ValidationError> {
        self.country_code = Some(CountryCode::new(code)?);
        Ok(())
    }

    /// Send an SMS message through Sergel.
    ///
    /// Errors:
    /// - [`SergelError::Validation`] when `sender`, `receiver` or `message` is empty,
    /// - [`SergelError::Transport`] when the request could not be completed,
    /// - [`SergelError::Parse`] for a non-2xx response without a Sergel error body,
    /// - [`SergelError::Gateway`] when Sergel reports an error status.
    pub async fn send(
        &self,
        sender: &str,
        receiver: &str,
        message: &str,
    ) -> Result<(), SergelError> {
        let message = OutboundMessage::parse(sender, receiver, message)?;
        self.send_message(message).await
    }

    /// Send an already validated message. The receiver is normalized before sending.
    pub async fn send_message(&self, message: OutboundMessage) -> Result<(), SergelError> {
        let message = message.normalized(self.country_code.as_ref());
        let credentials = &*self.credentials;

        let body = transport::encode_send_message_body(
            &message,
            &credentials.platform_id,
            &credentials.platform_partner_id,
        )?;
        let url = credentials.base_url.join(transport::SEND_MESSAGE_PATH);
        let headers = transport::request_headers(&credentials.username, &credentials.password);

        debug!(url = %url, "sending message");
        let response = self
            .http
            .post(&url, headers, body)
            .await
            .map_err(SergelError::Transport)?;
        debug!(status = response.status, "gateway responded");

        if (200..=299).contains(&response.status) {
            return Ok(());
        }

        let parsed = transport::decode_error_response(&response.body)?;
        Err(SergelError::Gateway {
            kind: parsed.kind(),
            status: parsed.status,
            http_status: response.status,
            description: parsed.description,
        })
    }
}

impl SmsSender for SergelClient {
    fn send<'a>(
        &'a self,
        sender: &'a str,
        receiver: &'a str,
        message: &'a str,
    ) -> BoxFuture<'a, Result<(), SergelError>> {
        Box::pin(SergelClient::send(self, sender, receiver, message))
    }
}
