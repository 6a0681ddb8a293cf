//! Configuration management for the product catalog service.
//!
//! Options come from command-line arguments (clap) with environment variable
//! fallbacks and sensible defaults.
//!
//! # Environment Variables
//!
//! - `HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 3000)
//! - `API_KEY` - Shared secret for the `x-api-key` header (unset = open)
//! - `CORS_ORIGINS` - Comma-separated allowed origins (unset = any)
//! - `NO_SEED` - Start with an empty catalog

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Product Catalog - CRUD and search over an in-memory product list.
#[derive(Parser, Debug, Clone)]
#[command(name = "product-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Shared secret expected in the `x-api-key` header.
    ///
    /// When unset or empty, every request is allowed.
    /// WARNING: Only run without a key in development/testing.
    #[arg(long, env = "API_KEY")]
    pub api_key: Option<String>,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Catalog Configuration
    // =========================================================================
    /// Start with an empty catalog instead of the sample products.
    #[arg(long, default_value_t = false, env = "NO_SEED")]
    pub no_seed: bool,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable tower-http request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host is required. Set --host or HOST".to_string());
        }

        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the API key, or an empty string when none is configured.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    /// Whether requests must carry an API key.
    pub fn auth_enabled(&self) -> bool {
        !self.api_key_or_empty().is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
