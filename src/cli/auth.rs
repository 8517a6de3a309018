use crate::nexus::NexusAdmin;

use super::{ConnectionArgs, connect};

/// Returns whether the admin credentials are accepted.
pub fn run_test_authentication(connection: &ConnectionArgs) -> anyhow::Result<bool> {
    let nexus = connect(connection, &connection.admin_password)?;
    Ok(nexus.test_auth()?)
}
