use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::error::Error;
use crate::nexus::NexusAdmin;

use super::{ConnectionArgs, connect};

const PASSWORD_FILE: &str = "admin.password";

/// Change the initial admin password generated on first start.
///
/// Nexus writes the generated password to `admin.password` in its data
/// directory and removes the file once the password is changed, so a missing
/// file means this has already been done.
pub fn run_change_initial_password(
    connection: &ConnectionArgs,
    data_dir: &Path,
) -> anyhow::Result<()> {
    let password_file = data_dir.join(PASSWORD_FILE);
    let initial_password = match fs::read_to_string(&password_file) {
        Ok(content) => content.trim_end_matches(['\r', '\n']).to_string(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::InitialPassword(password_file).into());
        }
        Err(e) => return Err(Error::Io(e).into()),
    };

    info!("Read initial password from {}", password_file.display());
    let mut nexus = connect(connection, &initial_password)?;
    if nexus.change_admin_password(&connection.admin_password)?.is_ok() {
        info!("Admin password changed");
    }
    Ok(())
}
