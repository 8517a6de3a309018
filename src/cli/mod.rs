mod auth;
mod commands;
mod configure;
mod password;

pub use auth::run_test_authentication;
pub use commands::{AptArgs, Commands, ConnectionArgs, PackagesArgs};
pub use configure::{run_initial_configuration, run_update_allowlists};
pub use password::run_change_initial_password;

use crate::nexus::NexusClient;

/// Build a client authenticated as admin with the given password.
pub fn connect(connection: &ConnectionArgs, password: &str) -> anyhow::Result<NexusClient> {
    let config = connection.config();
    tracing::debug!(api_root = %config.api_root(), "Connecting to Nexus");
    NexusClient::new(&config, password).map_err(Into::into)
}
