//! # Error Handling
//!
//! Error types for assembling ingress xDS resources, defined with `thiserror`.

/// Custom result type for ingress-xds operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for resource assembly and configuration loading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A typed protobuf payload could not be encoded into its `Any` form
    #[error("Payload encoding error for {type_url}: {source}")]
    PayloadEncoding {
        type_url: String,
        #[source]
        source: prost::EncodeError,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new payload encoding error for the given type URL
    pub fn payload_encoding<S: Into<String>>(type_url: S, source: prost::EncodeError) -> Self {
        Self::PayloadEncoding { type_url: type_url.into(), source }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::config(format!("Validation failed: {}", message))
    }
}
