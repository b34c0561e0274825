//! Environment and credential loading for the Alpaca trading API
//!
//! Both the REST client and the account stream need the same three things:
//! an API key id, a secret key and the trading host. [`Environment`] reads
//! them from `APCA_*` variables (or takes them directly) and hands out
//! [`ApiCredentials`] once they are known to be complete.
//!
//! # Example
//!
//! ```no_run
//! use alpaca_config::Environment;
//!
//! let mut env = Environment::new();
//! env.parse()?;
//!
//! let creds = env.ensure_parsed()?;
//! println!("Trading against {}", creds.base_url());
//! # Ok::<(), alpaca_config::ConfigError>(())
//! ```

mod environment;
mod error;

pub use environment::{
    ApiCredentials, EnvVarNames, Environment, API_BASE_URL_LIVE, API_BASE_URL_PAPER, API_DATA_URL,
};
pub use error::{ConfigError, ConfigResult};
