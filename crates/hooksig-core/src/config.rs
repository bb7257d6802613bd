//! Configuration management for hooksig.
//!
//! All configuration is driven by environment variables.

use std::fmt;
use std::net::SocketAddr;

use crate::error::{HookSigError, HookSigResult};

/// Global configuration for hooksig.
#[derive(Clone, PartialEq, Eq)]
pub struct HookSigConfig {
    /// Bind address for the webhook listener.
    pub listen_addr: String,
    /// Log level.
    pub log_level: String,
    /// Shared signing secret. `None` when unset, `Some("")` when set but empty.
    pub signing_secret: Option<String>,
    /// Header carrying the sender's digest.
    pub signature_header: String,
    /// Header carrying the signed-headers directive.
    pub signed_headers_header: String,
    /// Path that receives webhook deliveries.
    pub webhook_path: String,
}

impl Default for HookSigConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_owned(),
            log_level: "info".to_owned(),
            signing_secret: None,
            signature_header: "x-contentful-signature".to_owned(),
            signed_headers_header: "x-contentful-signed-headers".to_owned(),
            webhook_path: "/".to_owned(),
        }
    }
}

impl fmt::Debug for HookSigConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSigConfig")
            .field("listen_addr", &self.listen_addr)
            .field("log_level", &self.log_level)
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "***"))
            .field("signature_header", &self.signature_header)
            .field("signed_headers_header", &self.signed_headers_header)
            .field("webhook_path", &self.webhook_path)
            .finish()
    }
}

impl HookSigConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("LISTEN_ADDR") {
            config.listen_addr = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        config.signing_secret = lookup("CONTENTFUL_SIGNING_SECRET");
        if let Some(v) = lookup("SIGNATURE_HEADER") {
            config.signature_header = v.to_ascii_lowercase();
        }
        if let Some(v) = lookup("SIGNED_HEADERS_HEADER") {
            config.signed_headers_header = v.to_ascii_lowercase();
        }
        if let Some(v) = lookup("WEBHOOK_PATH") {
            config.webhook_path = v;
        }

        config
    }

    /// Check that the configured values are usable.
    ///
    /// A missing secret is not an error here: the server still starts and
    /// answers every delivery with a configuration fault.
    pub fn validate(&self) -> HookSigResult<()> {
        self.listen_addr.parse::<SocketAddr>().map_err(|e| {
            HookSigError::Config(format!("invalid listen address {}: {e}", self.listen_addr))
        })?;

        for (var, name) in [
            ("SIGNATURE_HEADER", &self.signature_header),
            ("SIGNED_HEADERS_HEADER", &self.signed_headers_header),
        ] {
            http::HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                HookSigError::Config(format!("{var} is not a valid header name: {name:?}"))
            })?;
        }

        if !self.webhook_path.starts_with('/') {
            return Err(HookSigError::Config(format!(
                "WEBHOOK_PATH must start with '/': {}",
                self.webhook_path
            )));
        }

        Ok(())
    }

    /// Whether a non-empty signing secret is configured.
    #[must_use]
    pub fn has_signing_secret(&self) -> bool {
        self.signing_secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}
