//! Turning package allowlists into Nexus access control.
//!
//! [`compile`] maps an allowlist and a [`PackagesMode`](crate::types::PackagesMode)
//! to an ordered list of [`AccessRule`]s without touching the network. The
//! functions in [`reconcile`] push repositories, rules and the managed role to
//! a [`NexusAdmin`](crate::nexus::NexusAdmin), deleting what they replace
//! first so repeated runs converge on the same state.

mod allowlist;
mod compiler;
pub mod reconcile;

pub use allowlist::{AllowlistFiles, Allowlists, normalize_package_name, parse_allowlist};
pub use compiler::{AccessRule, compile};
