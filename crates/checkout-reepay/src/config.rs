//! # Reepay Configuration
//!
//! Gateway configuration for the Reepay integration. Secrets come from
//! environment variables; everything has an explicit constructor for
//! tests.

use checkout_core::CheckoutError;
use std::env;

/// Test or live environment. Selects which private key signs API calls
/// and whether reconciled payments carry the test flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Test,
    Live,
}

impl GatewayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayMode::Test => "test",
            GatewayMode::Live => "live",
        }
    }
}

/// How the client-side widget opens the hosted checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutType {
    Window,
    Modal,
}

/// Reepay gateway configuration
#[derive(Debug, Clone)]
pub struct ReepayConfig {
    /// Active environment
    pub mode: GatewayMode,

    /// Private key for the test environment
    pub test_private_key: String,

    /// Private key for the live environment
    pub live_private_key: String,

    /// Widget presentation
    pub checkout_type: CheckoutType,

    /// Session locale, e.g. "en_US", "da_DK", "sv_SE", "fi_FI"
    pub locale: String,

    /// Capture at authorization time
    pub instant_settle: bool,

    /// Enabled payment method codes ("card", "mobilepay", "viabill", ...)
    pub payment_methods: Vec<String>,

    /// Core API base URL (invoices, settle, refund, void, webhooks)
    pub api_base_url: String,

    /// Checkout API base URL (session creation)
    pub checkout_api_base_url: String,

    /// Seconds the notification handler waits before acting, giving the
    /// browser-return path time to place the order first
    pub notify_delay_secs: u64,
}

impl ReepayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `REEPAY_TEST_PRIVATE_KEY`
    /// - `REEPAY_LIVE_PRIVATE_KEY`
    ///
    /// Optional:
    /// - `REEPAY_MODE` ("test" or "live"; unset falls back to "test" so
    ///   a bare environment never signs live charges)
    /// - `REEPAY_CHECKOUT_TYPE` ("window" or "modal", default "window")
    /// - `REEPAY_LOCALE` (default "en_US")
    /// - `REEPAY_INSTANT_SETTLE` ("yes"/"no", default "no")
    /// - `REEPAY_PAYMENT_METHODS` (comma-separated, default "card")
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok();

        let mode = Self::parse_mode(env::var("REEPAY_MODE").ok().as_deref())?;

        let test_private_key = env::var("REEPAY_TEST_PRIVATE_KEY").map_err(|_| {
            CheckoutError::Configuration("REEPAY_TEST_PRIVATE_KEY not set".to_string())
        })?;

        let live_private_key = env::var("REEPAY_LIVE_PRIVATE_KEY").map_err(|_| {
            CheckoutError::Configuration("REEPAY_LIVE_PRIVATE_KEY not set".to_string())
        })?;

        if mode == GatewayMode::Live && live_private_key.is_empty() {
            return Err(CheckoutError::Configuration(
                "live mode selected but REEPAY_LIVE_PRIVATE_KEY is empty".to_string(),
            ));
        }

        let checkout_type = match env::var("REEPAY_CHECKOUT_TYPE").as_deref() {
            Ok("modal") => CheckoutType::Modal,
            _ => CheckoutType::Window,
        };

        let locale = env::var("REEPAY_LOCALE").unwrap_or_else(|_| "en_US".to_string());

        let instant_settle = matches!(
            env::var("REEPAY_INSTANT_SETTLE").as_deref(),
            Ok("yes") | Ok("true") | Ok("1")
        );

        let payment_methods = env::var("REEPAY_PAYMENT_METHODS")
            .map(|v| {
                v.split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["card".to_string()]);

        Ok(Self {
            mode,
            test_private_key,
            live_private_key,
            checkout_type,
            locale,
            instant_settle,
            payment_methods,
            api_base_url: "https://api.reepay.com".to_string(),
            checkout_api_base_url: "https://checkout-api.reepay.com".to_string(),
            notify_delay_secs: 15,
        })
    }

    fn parse_mode(value: Option<&str>) -> Result<GatewayMode, CheckoutError> {
        match value {
            Some("live") => Ok(GatewayMode::Live),
            Some("test") | None => Ok(GatewayMode::Test),
            Some(other) => Err(CheckoutError::Configuration(format!(
                "REEPAY_MODE must be 'test' or 'live', got '{}'",
                other
            ))),
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        mode: GatewayMode,
        test_private_key: impl Into<String>,
        live_private_key: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            test_private_key: test_private_key.into(),
            live_private_key: live_private_key.into(),
            checkout_type: CheckoutType::Window,
            locale: "en_US".to_string(),
            instant_settle: false,
            payment_methods: vec!["card".to_string()],
            api_base_url: "https://api.reepay.com".to_string(),
            checkout_api_base_url: "https://checkout-api.reepay.com".to_string(),
            notify_delay_secs: 15,
        }
    }

    /// The private key for the active environment
    pub fn active_private_key(&self) -> &str {
        match self.mode {
            GatewayMode::Test => &self.test_private_key,
            GatewayMode::Live => &self.live_private_key,
        }
    }

    /// Basic auth header value: `base64(private_key + ":")`
    pub fn auth_header(&self) -> String {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:", self.active_private_key()));
        format!("Basic {}", encoded)
    }

    pub fn is_test_mode(&self) -> bool {
        self.mode == GatewayMode::Test
    }

    /// Builder: set custom core API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set custom checkout API base URL (for testing)
    pub fn with_checkout_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.checkout_api_base_url = url.into();
        self
    }

    /// Builder: override the notification delay (tests set this to 0)
    pub fn with_notify_delay_secs(mut self, secs: u64) -> Self {
        self.notify_delay_secs = secs;
        self
    }

    /// Builder: enable instant settle
    pub fn with_instant_settle(mut self, settle: bool) -> Self {
        self.instant_settle = settle;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_key_by_mode() {
        let config = ReepayConfig::new(GatewayMode::Test, "priv_test_abc", "priv_live_xyz");
        assert_eq!(config.active_private_key(), "priv_test_abc");
        assert!(config.is_test_mode());

        let config = ReepayConfig::new(GatewayMode::Live, "priv_test_abc", "priv_live_xyz");
        assert_eq!(config.active_private_key(), "priv_live_xyz");
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_mode_parsing_defaults_to_test() {
        assert_eq!(ReepayConfig::parse_mode(None).unwrap(), GatewayMode::Test);
        assert_eq!(
            ReepayConfig::parse_mode(Some("test")).unwrap(),
            GatewayMode::Test
        );
        assert_eq!(
            ReepayConfig::parse_mode(Some("live")).unwrap(),
            GatewayMode::Live
        );
        assert!(ReepayConfig::parse_mode(Some("staging")).is_err());
    }

    #[test]
    fn test_auth_header() {
        let config = ReepayConfig::new(GatewayMode::Test, "key", "unused");
        // base64("key:")
        assert_eq!(config.auth_header(), "Basic a2V5Og==");
    }

    #[test]
    fn test_builders() {
        let config = ReepayConfig::new(GatewayMode::Test, "k", "k")
            .with_api_base_url("http://localhost:9999")
            .with_notify_delay_secs(0)
            .with_instant_settle(true);

        assert_eq!(config.api_base_url, "http://localhost:9999");
        assert_eq!(config.notify_delay_secs, 0);
        assert!(config.instant_settle);
    }
}
