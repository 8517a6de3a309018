//! # nexus-allowlist
//!
//! Configures a Nexus Repository Manager instance to proxy PyPI, CRAN and
//! APT, and restricts anonymous clients to an allowlist of packages (or to
//! every package).
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! nexus-allowlist = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use nexus_allowlist::config::{AptSettings, NexusConfig};
//! use nexus_allowlist::nexus::NexusClient;
//! use nexus_allowlist::policy::{Allowlists, reconcile};
//! use nexus_allowlist::types::PackagesMode;
//!
//! let nexus = NexusClient::new(&NexusConfig::new("localhost", 8081, ""), "password")?;
//! let allowlists = Allowlists { pypi: vec!["numpy".into()], ..Default::default() };
//! let privileges = reconcile::recreate_privileges(
//!     &nexus,
//!     PackagesMode::Selected,
//!     &allowlists,
//!     &AptSettings::default(),
//! )?;
//! reconcile::grant_role_privileges(&nexus, privileges)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod nexus;
pub mod policy;
pub mod types;
