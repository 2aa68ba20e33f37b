//! Error types for configuration validation.
//!
//! Engine operations never fail; only user-supplied constants can be wrong.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{key}` must be positive, got {value}")]
    NonPositive { key: String, value: f64 },

    #[error("`{key}` must be within {min}..={max}, got {value}")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("`{key}` has an unparsable value `{value}`")]
    Unparsable { key: String, value: String },

    #[error("unknown config key `{0}`")]
    UnknownKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key() {
        let err = ConfigError::NonPositive {
            key: "glyph_height".into(),
            value: 0.0,
        };
        assert_eq!(err.to_string(), "`glyph_height` must be positive, got 0");

        let err = ConfigError::UnknownKey("wobble".into());
        assert_eq!(err.to_string(), "unknown config key `wobble`");
    }
}
