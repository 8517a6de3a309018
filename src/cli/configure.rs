use tracing::info;

use crate::config::{AptSettings, repositories};
use crate::nexus::NexusClient;
use crate::policy::Allowlists;
use crate::policy::reconcile::{
    configure_anonymous_role, grant_role_privileges, recreate_privileges, recreate_repositories,
};
use crate::types::PackagesMode;

use super::{ConnectionArgs, PackagesArgs, connect};

/// Full configuration of a fresh (or existing) Nexus instance.
///
/// Replaces all repositories with the PyPI, CRAN and APT proxies, replaces
/// all custom roles with the managed role, makes that role the anonymous
/// user's only role, enables anonymous access and applies the allowlists.
pub fn run_initial_configuration(
    connection: &ConnectionArgs,
    packages: &PackagesArgs,
    apt: &AptSettings,
) -> anyhow::Result<()> {
    let allowlists = read_allowlists(packages)?;
    let nexus = connect(connection, &connection.admin_password)?;

    recreate_repositories(&nexus, &repositories(apt))?;
    configure_anonymous_role(&nexus)?;
    apply_allowlists(&nexus, packages.packages, &allowlists, apt)?;

    info!("Initial configuration complete");
    Ok(())
}

/// Recreate content selectors and privileges and grant them to the managed
/// role, leaving repositories and roles otherwise untouched.
pub fn run_update_allowlists(
    connection: &ConnectionArgs,
    packages: &PackagesArgs,
    apt: &AptSettings,
) -> anyhow::Result<()> {
    let allowlists = read_allowlists(packages)?;
    let nexus = connect(connection, &connection.admin_password)?;

    apply_allowlists(&nexus, packages.packages, &allowlists, apt)?;

    info!("Allowlists updated");
    Ok(())
}

/// Allowlist files are validated before any remote call and only read in
/// selected mode.
fn read_allowlists(packages: &PackagesArgs) -> anyhow::Result<Allowlists> {
    let files = packages.files();
    files.check()?;
    match packages.packages {
        PackagesMode::All => Ok(Allowlists::default()),
        PackagesMode::Selected => Ok(files.load()?),
    }
}

fn apply_allowlists(
    nexus: &NexusClient,
    mode: PackagesMode,
    allowlists: &Allowlists,
    apt: &AptSettings,
) -> anyhow::Result<()> {
    let privileges = recreate_privileges(nexus, mode, allowlists, apt)?;
    info!(count = privileges.len(), "Granting privileges to managed role");
    grant_role_privileges(nexus, privileges)?;
    Ok(())
}
