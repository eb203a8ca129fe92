//! # ingress-xds
//!
//! Builds the Envoy xDS resources for an ingress whose routes are delivered
//! dynamically over ADS (Aggregated Discovery Service).
//!
//! ## Architecture
//!
//! ```text
//! route config name ──► filter chain composer ──► connection manager assembler ──┐
//!                         (ext_authz?, router)     (filters, stdout log, RDS/ADS) ├─► transport
//! name + virtual hosts ─────────────────────────► route table wrapper ───────────┘
//! ```
//!
//! The connection manager and the route table are independent values that
//! refer to each other only by name. Handing them to a discovery transport
//! is the caller's job.
//!
//! ## Example Usage
//!
//! ```rust
//! use ingress_xds::xds::{new_http_connection_manager, new_route_config, ExternalAuthz};
//!
//! # fn main() -> ingress_xds::Result<()> {
//! let hcm = new_http_connection_manager("my-routes", &ExternalAuthz::Disabled)?;
//! let routes = new_route_config("my-routes", Vec::new());
//! assert_eq!(hcm.http_filters.len(), 1);
//! assert_eq!(routes.name, "my-routes");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod observability;
pub mod xds;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};
pub use observability::init_logging;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
