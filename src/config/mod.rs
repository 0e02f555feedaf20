//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → read once at startup by main
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table is built from code,
//!   not config, so there is nothing to hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, RouterConfig, RoutingConfig, TimeoutConfig,
};
pub use validation::ValidationError;
