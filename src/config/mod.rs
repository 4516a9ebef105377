//! Configuration for the dispatch facility.
//!
//! `TransportOptions` carries the relay endpoint, credentials, and the
//! concurrency cap. Validation is eager: it runs when the options are built
//! (and again when a dispatcher is constructed), naming the first invalid
//! field, so a misconfigured facility never reaches a send call.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::errors::{DispatchError, DispatchResult};

/// Default SMTP submission port.
pub const DEFAULT_PORT: u16 = 587;

/// Default cap on concurrently in-flight sends.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Connection options for the mail relay, shared read-only by all workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportOptions {
    /// Relay hostname.
    pub host: String,
    /// Relay port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Authentication username.
    pub username: String,
    /// Authentication password (serialization skipped for security).
    #[serde(skip)]
    pub password: Option<SecretString>,
    /// Use an encrypted transport (TLS) for the connection.
    #[serde(default = "default_true")]
    pub use_tls: bool,
    /// Maximum number of sends in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_true() -> bool {
    true
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl TransportOptions {
    /// Creates a new options builder.
    pub fn builder() -> TransportOptionsBuilder {
        TransportOptionsBuilder::default()
    }

    /// Validates the options, reporting the first invalid field.
    pub fn validate(&self) -> DispatchResult<()> {
        if self.username.trim().is_empty() {
            return Err(DispatchError::configuration("username cannot be blank"));
        }

        let password_blank = self
            .password
            .as_ref()
            .map(|p| p.expose_secret().trim().is_empty())
            .unwrap_or(true);
        if password_blank {
            return Err(DispatchError::configuration("password cannot be blank"));
        }

        if self.host.trim().is_empty() {
            return Err(DispatchError::configuration("host cannot be blank"));
        }

        if self.port == 0 {
            return Err(DispatchError::configuration("port must be positive"));
        }

        if self.max_concurrency == 0 {
            return Err(DispatchError::configuration(
                "max_concurrency must be positive",
            ));
        }

        Ok(())
    }

    /// Returns the full relay address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for [`TransportOptions`].
#[derive(Debug, Default)]
pub struct TransportOptionsBuilder {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<SecretString>,
    use_tls: Option<bool>,
    max_concurrency: Option<usize>,
}

impl TransportOptionsBuilder {
    /// Sets the relay host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the relay port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the authentication credentials.
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Sets whether to use an encrypted transport.
    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = Some(use_tls);
        self
    }

    /// Sets the cap on concurrently in-flight sends.
    pub fn max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = Some(max);
        self
    }

    /// Builds and validates the options.
    ///
    /// Unset fields fall back to defaults; an explicitly set zero is not
    /// "unset" and fails validation.
    pub fn build(self) -> DispatchResult<TransportOptions> {
        let options = TransportOptions {
            host: self.host.unwrap_or_default(),
            port: self.port.unwrap_or(DEFAULT_PORT),
            username: self.username.unwrap_or_default(),
            password: self.password,
            use_tls: self.use_tls.unwrap_or(true),
            max_concurrency: self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY),
        };

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DispatchErrorKind;

    #[test]
    fn test_options_builder() {
        let options = TransportOptions::builder()
            .host("smtp.example.com")
            .port(465)
            .credentials("user", "pass")
            .max_concurrency(8)
            .build()
            .unwrap();

        assert_eq!(options.host, "smtp.example.com");
        assert_eq!(options.port, 465);
        assert_eq!(options.username, "user");
        assert!(options.use_tls);
        assert_eq!(options.max_concurrency, 8);
        assert_eq!(options.address(), "smtp.example.com:465");
    }

    #[test]
    fn test_options_defaults() {
        let options = TransportOptions::builder()
            .host("smtp.example.com")
            .credentials("user", "pass")
            .build()
            .unwrap();

        assert_eq!(options.port, DEFAULT_PORT);
        assert_eq!(options.max_concurrency, DEFAULT_MAX_CONCURRENCY);
    }

    #[test]
    fn test_options_validation_names_first_bad_field() {
        // Missing credentials reported before missing host
        let err = TransportOptions::builder().build().unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::ConfigurationInvalid);
        assert!(err.message().contains("username"));

        let err = TransportOptions::builder()
            .credentials("user", "pass")
            .build()
            .unwrap_err();
        assert!(err.message().contains("host"));

        let err = TransportOptions::builder()
            .host("smtp.example.com")
            .credentials("user", "   ")
            .build()
            .unwrap_err();
        assert!(err.message().contains("password"));
    }

    #[test]
    fn test_explicit_zero_is_rejected_not_defaulted() {
        let err = TransportOptions::builder()
            .host("smtp.example.com")
            .credentials("user", "pass")
            .port(0)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::ConfigurationInvalid);
        assert!(err.message().contains("port"));

        let err = TransportOptions::builder()
            .host("smtp.example.com")
            .credentials("user", "pass")
            .max_concurrency(0)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), DispatchErrorKind::ConfigurationInvalid);
        assert!(err.message().contains("max_concurrency"));
    }

    #[test]
    fn test_password_not_serialized() {
        let options = TransportOptions::builder()
            .host("smtp.example.com")
            .credentials("user", "hunter2")
            .build()
            .unwrap();

        let debug = format!("{:?}", options);
        assert!(!debug.contains("hunter2"));
    }
}
