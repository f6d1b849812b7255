use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sergel API username used for Basic authentication.
///
/// Invariant: non-empty. The value is kept exactly as provided.
pub struct Username(String);

impl Username {
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Sergel API password used for Basic authentication.
///
/// Invariant: non-empty. `Debug` output is redacted.
pub struct Password(String);

impl Password {
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Tenant identifier required by Sergel to route and bill a message (`platformId` on the wire).
pub struct PlatformId(String);

impl PlatformId {
    pub const FIELD: &'static str = "platform_id";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Partner identifier paired with [`PlatformId`] (`platformPartnerId` on the wire).
pub struct PlatformPartnerId(String);

impl PlatformPartnerId {
    pub const FIELD: &'static str = "platform_partner_id";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Root URL of the Sergel API, e.g. `https://api.example.com`.
///
/// Invariants:
/// - parses as an absolute URL,
/// - exactly one trailing `/` is stripped on construction (`"https://a//"` keeps one),
/// - non-empty after stripping.
pub struct BaseUrl(String);

impl BaseUrl {
    pub const FIELD: &'static str = "base_url";

    /// Create a validated [`BaseUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let stripped = value.strip_suffix('/').unwrap_or(&value);
        if stripped.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if url::Url::parse(stripped).is_err() {
            return Err(ValidationError::InvalidBaseUrl { input: value });
        }
        Ok(Self(stripped.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join an absolute API path (starting with `/`) onto this base URL.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// International dialing prefix prepended to local receiver numbers, e.g. `+46`.
///
/// Invariant: starts with `+`.
pub struct CountryCode(String);

impl CountryCode {
    pub const FIELD: &'static str = "country_code";

    /// Create a validated [`CountryCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !value.starts_with('+') {
            return Err(ValidationError::BadCountryCode { input: value });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message originator (`source`): an alphanumeric sender name or a phone number.
///
/// Invariant: non-empty. No length or charset checks are made; the gateway decides.
pub struct Sender(String);

impl Sender {
    /// Argument name reported in validation errors; sent as `source`.
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`Sender`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message recipient (`destination`) as provided by the caller.
///
/// Invariant: non-empty when built with [`Receiver::new`]. [`Receiver::normalize`] may yield
/// an empty value; the gateway decides whether it is acceptable.
pub struct Receiver(String);

impl Receiver {
    /// Argument name reported in validation errors; sent as `destination`.
    pub const FIELD: &'static str = "receiver";

    /// Create a validated (non-empty) receiver.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rewrite the receiver into a gateway-safe token.
    ///
    /// When `country_code` is set and the number does not already start with `+`, the first
    /// character (usually a trunk prefix `0`) is replaced by the country code. Afterwards every
    /// character other than an ASCII digit, `+` or `,` is removed.
    ///
    /// `"0701234567"` with `+46` becomes `"+46701234567"`; `"070-123 45 67"` without a
    /// country code becomes `"0701234567"`. Input without any digits normalizes to `""`.
    pub fn normalize(&self, country_code: Option<&CountryCode>) -> Self {
        let prefixed = match country_code {
            Some(code) if !self.0.starts_with('+') => {
                let mut chars = self.0.chars();
                chars.next();
                format!("{}{}", code.as_str(), chars.as_str())
            }
            _ => self.0.clone(),
        };

        let normalized: String = prefixed
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '+' | ','))
            .collect();
        Self(normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`userData`).
///
/// Invariant: non-empty. The original value, including whitespace, is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Argument name reported in validation errors; sent as `userData`.
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Integer `status` reported by Sergel in an error body.
///
/// A body without a `status` is reported as `0`.
pub struct StatusCode(i64);

impl StatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Sergel.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Map this code to a known error kind, if one exists.
    ///
    /// Unlike [`StatusCode::kind`] this tells a documented `106000` apart from a code missing
    /// from the table.
    pub fn known(self) -> Option<GatewayErrorKind> {
        GatewayErrorKind::from_code(self.0)
    }

    /// Map this code to an error kind, falling back to [`GatewayErrorKind::Unknown`].
    pub fn kind(self) -> GatewayErrorKind {
        self.known().unwrap_or(GatewayErrorKind::Unknown)
    }

    /// Returns `true` if this status code represents an authentication/authorization error.
    ///
    /// Callers use this to tell "fix your credentials" apart from failures worth retrying.
    pub fn is_auth_error(self) -> bool {
        self.kind().is_auth_error()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Semantic error kinds reported by Sergel.
///
/// Codes missing from [`GatewayErrorKind::from_code`] are reported as [`GatewayErrorKind::Unknown`]
/// by the client, with the raw [`StatusCode`] preserved alongside.
pub enum GatewayErrorKind {
    Unknown,
    InvalidAuthentication,
    AccessDenied,
    UnableToAccessCredentials,
    InvalidOrMissingPlatformId,
    InvalidOrMissingPlatformPartnerId,
    InvalidOrMissingCurrencyForPremiumMessage,
    NoGatesAvailable,
    SpecifiedGateUnavailable,
}

impl GatewayErrorKind {
    /// Convert a raw Sergel integer code into a known variant.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            106000 => Self::Unknown,
            106100 => Self::InvalidAuthentication,
            106101 => Self::AccessDenied,
            106102 => Self::UnableToAccessCredentials,
            106200 => Self::InvalidOrMissingPlatformId,
            106201 => Self::InvalidOrMissingPlatformPartnerId,
            106202 => Self::InvalidOrMissingCurrencyForPremiumMessage,
            106300 => Self::NoGatesAvailable,
            106301 => Self::SpecifiedGateUnavailable,
            _ => return None,
        })
    }

    /// The documented code for this kind, e.g. for support tickets or metrics labels.
    pub fn code(self) -> i64 {
        match self {
            Self::Unknown => 106000,
            Self::InvalidAuthentication => 106100,
            Self::AccessDenied => 106101,
            Self::UnableToAccessCredentials => 106102,
            Self::InvalidOrMissingPlatformId => 106200,
            Self::InvalidOrMissingPlatformPartnerId => 106201,
            Self::InvalidOrMissingCurrencyForPremiumMessage => 106202,
            Self::NoGatesAvailable => 106300,
            Self::SpecifiedGateUnavailable => 106301,
        }
    }

    /// Whether the caller's credentials were rejected.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::InvalidAuthentication | Self::AccessDenied | Self::UnableToAccessCredentials
        )
    }

    /// Human-readable description suitable for end users.
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => {
                "unknown error, please contact support and include your whole transaction"
            }
            Self::InvalidAuthentication => {
                "invalid authentication, please check your username and password"
            }
            Self::AccessDenied => "access denied, please check your username and password",
            Self::UnableToAccessCredentials => "unable to access SMSC credentials",
            Self::InvalidOrMissingPlatformId => "invalid or missing platform id",
            Self::InvalidOrMissingPlatformPartnerId => "invalid or missing platform partner id",
            Self::InvalidOrMissingCurrencyForPremiumMessage => {
                "invalid or missing currency for premium message"
            }
            Self::NoGatesAvailable => {
                "no gates available, contact support and include your whole transaction"
            }
            Self::SpecifiedGateUnavailable => "specified gate unavailable",
        }
    }
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_types_reject_empty_and_keep_whitespace() {
        assert!(matches!(
            Username::new(""),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
        assert_eq!(Username::new(" user ").unwrap().as_str(), " user ");

        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
        assert!(PlatformId::new("").is_err());
        assert!(PlatformPartnerId::new("").is_err());
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn base_url_strips_exactly_one_trailing_slash() {
        let url = BaseUrl::new("https://api.example.com/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com");

        let url = BaseUrl::new("https://api.example.com").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com");

        let url = BaseUrl::new("https://api.example.com//").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/");

        assert_eq!(
            BaseUrl::new("https://api.example.com/").unwrap().join("/sms/send"),
            "https://api.example.com/sms/send"
        );
    }

    #[test]
    fn base_url_rejects_empty_and_relative_values() {
        assert!(matches!(
            BaseUrl::new(""),
            Err(ValidationError::Empty {
                field: BaseUrl::FIELD
            })
        ));
        assert!(matches!(
            BaseUrl::new("/"),
            Err(ValidationError::Empty {
                field: BaseUrl::FIELD
            })
        ));
        assert!(matches!(
            BaseUrl::new("api.example.com"),
            Err(ValidationError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn country_code_requires_leading_plus() {
        assert!(matches!(
            CountryCode::new("46"),
            Err(ValidationError::BadCountryCode { .. })
        ));
        assert!(matches!(
            CountryCode::new(""),
            Err(ValidationError::BadCountryCode { .. })
        ));
        assert_eq!(CountryCode::new("+46").unwrap().as_str(), "+46");
    }

    #[test]
    fn message_parts_reject_empty() {
        assert!(matches!(
            Sender::new(""),
            Err(ValidationError::Empty {
                field: Sender::FIELD
            })
        ));
        assert!(matches!(
            Receiver::new(""),
            Err(ValidationError::Empty {
                field: Receiver::FIELD
            })
        ));
        assert!(matches!(
            MessageText::new(""),
            Err(ValidationError::Empty {
                field: MessageText::FIELD
            })
        ));
        assert_eq!(MessageText::new(" hi ").unwrap().as_str(), " hi ");
    }

    #[test]
    fn normalize_replaces_first_char_with_country_code() {
        let code = CountryCode::new("+46").unwrap();
        let receiver = Receiver::new("0701234567").unwrap();
        assert_eq!(
            receiver.normalize(Some(&code)).as_str(),
            "+46701234567"
        );
    }

    #[test]
    fn normalize_keeps_numbers_that_already_have_a_prefix() {
        let code = CountryCode::new("+46").unwrap();
        let receiver = Receiver::new("+4570123456").unwrap();
        assert_eq!(
            receiver.normalize(Some(&code)).as_str(),
            "+4570123456"
        );
    }

    #[test]
    fn normalize_prefixes_before_stripping() {
        let code = CountryCode::new("+46").unwrap();
        let receiver = Receiver::new(" 070-123").unwrap();
        // The leading space is the dropped character, not the trunk zero.
        assert_eq!(
            receiver.normalize(Some(&code)).as_str(),
            "+46070123"
        );
    }

    #[test]
    fn normalize_strips_everything_but_digits_plus_and_comma() {
        let receiver = Receiver::new("070-123 45 67").unwrap();
        assert_eq!(receiver.normalize(None).as_str(), "0701234567");

        let receiver = Receiver::new("(+46) 70,+47 9x").unwrap();
        assert_eq!(receiver.normalize(None).as_str(), "+4670,+479");
    }

    #[test]
    fn normalize_handles_multibyte_first_character() {
        let code = CountryCode::new("+46").unwrap();
        let receiver = Receiver::new("é701234567").unwrap();
        assert_eq!(
            receiver.normalize(Some(&code)).as_str(),
            "+46701234567"
        );
    }

    #[test]
    fn normalize_passes_receivers_without_digits_through_as_empty() {
        let receiver = Receiver::new("abc").unwrap();
        assert_eq!(receiver.normalize(None).as_str(), "");
    }

    #[test]
    fn field_names_match_config_and_argument_names() {
        assert_eq!(Username::FIELD, "username");
        assert_eq!(PlatformId::FIELD, "platform_id");
        assert_eq!(PlatformPartnerId::FIELD, "platform_partner_id");
        assert_eq!(BaseUrl::FIELD, "base_url");
        assert_eq!(Sender::FIELD, "sender");
        assert_eq!(Receiver::FIELD, "receiver");
        assert_eq!(MessageText::FIELD, "message");
    }

    #[test]
    fn status_code_accepts_values_beyond_i32() {
        let code = StatusCode::new(i64::from(i32::MAX) + 1);
        assert_eq!(code.as_i64(), 2_147_483_648);
        assert_eq!(code.kind(), GatewayErrorKind::Unknown);
    }

    #[test]
    fn status_code_maps_known_codes_and_falls_back_to_unknown() {
        assert_eq!(
            StatusCode::new(106100).known(),
            Some(GatewayErrorKind::InvalidAuthentication)
        );
        assert_eq!(
            StatusCode::new(106000).known(),
            Some(GatewayErrorKind::Unknown)
        );
        assert_eq!(StatusCode::new(106999).known(), None);
        assert_eq!(StatusCode::new(106999).kind(), GatewayErrorKind::Unknown);
    }

    #[test]
    fn error_kind_codes_round_trip_through_table() {
        let kinds = [
            GatewayErrorKind::Unknown,
            GatewayErrorKind::InvalidAuthentication,
            GatewayErrorKind::AccessDenied,
            GatewayErrorKind::UnableToAccessCredentials,
            GatewayErrorKind::InvalidOrMissingPlatformId,
            GatewayErrorKind::InvalidOrMissingPlatformPartnerId,
            GatewayErrorKind::InvalidOrMissingCurrencyForPremiumMessage,
            GatewayErrorKind::NoGatesAvailable,
            GatewayErrorKind::SpecifiedGateUnavailable,
        ];
        for kind in kinds {
            assert_eq!(GatewayErrorKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn auth_error_helper_covers_credential_kinds() {
        assert!(StatusCode::new(106100).is_auth_error());
        assert!(StatusCode::new(106101).is_auth_error());
        assert!(StatusCode::new(106102).is_auth_error());
        assert!(!StatusCode::new(106300).is_auth_error());
        assert!(!StatusCode::new(1).is_auth_error());
    }
}
