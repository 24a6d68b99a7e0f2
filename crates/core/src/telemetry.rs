// Telemetry Module
//
// Structured logging for DevEvents binaries:
// - Configuration from environment variables
// - tracing-subscriber fmt layer with an EnvFilter

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// ============================================================================
// Telemetry Configuration
// ============================================================================

/// Configuration for logging
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name, recorded once at start-up
    pub service_name: String,
    /// Service version
    pub service_version: Option<String>,
    /// Environment (e.g., "development", "production")
    pub environment: Option<String>,
    /// Whether to enable console logging
    pub enable_console: bool,
    /// Log filter (e.g., "info", "debug", "devevents_server=debug")
    pub log_filter: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "devevents".to_string(),
            service_version: None,
            environment: None,
            enable_console: true,
            log_filter: None,
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `SERVICE_NAME`: Service name (default: "devevents")
    /// - `SERVICE_VERSION`: Service version
    /// - `DEPLOY_ENVIRONMENT`: Deployment environment
    /// - `RUST_LOG` or `LOG_LEVEL`: Log filter
    /// - `LOG_FORMAT`: "json" for JSON lines
    pub fn from_env() -> Self {
        Self {
            service_name: std::env::var("SERVICE_NAME").unwrap_or_else(|_| "devevents".to_string()),
            service_version: std::env::var("SERVICE_VERSION").ok(),
            environment: std::env::var("DEPLOY_ENVIRONMENT").ok(),
            enable_console: true,
            log_filter: std::env::var("RUST_LOG")
                .ok()
                .or_else(|| std::env::var("LOG_LEVEL").ok()),
            json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// The filter directive actually used, falling back to "info"
    pub fn filter_directive(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("info")
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the global tracing subscriber with the given configuration.
///
/// An unparseable filter falls back to "info". Calling this twice is a no-op
/// for the second call (the global subscriber can only be set once).
///
/// # Example
///
/// ```ignore
/// use devevents_core::telemetry::{init_telemetry, TelemetryConfig};
///
/// #[tokio::main]
/// async fn main() {
///     init_telemetry(TelemetryConfig::from_env());
///     // ... your application code
/// }
/// ```
pub fn init_telemetry(config: TelemetryConfig) {
    let filter =
        EnvFilter::try_new(config.filter_directive()).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = if config.enable_console {
        let layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer().with_target(true).boxed()
        };
        Some(layer.with_filter(filter))
    } else {
        None
    };

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    tracing::info!(
        service = %config.service_name,
        version = config.service_version.as_deref().unwrap_or("unknown"),
        environment = config.environment.as_deref().unwrap_or("unset"),
        "Telemetry initialized"
    );
}
