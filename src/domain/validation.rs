use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    BadCountryCode { input: String },
    InvalidBaseUrl { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::BadCountryCode { input } => {
                write!(f, "bad country code: {input:?} (must start with '+')")
            }
            Self::InvalidBaseUrl { input } => write!(f, "invalid base URL: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "username" };
        assert_eq!(err.to_string(), "username must not be empty");

        let err = ValidationError::BadCountryCode {
            input: "46".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "bad country code: \"46\" (must start with '+')"
        );

        let err = ValidationError::InvalidBaseUrl {
            input: "nope".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid base URL: nope");
    }
}
