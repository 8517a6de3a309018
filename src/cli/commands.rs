use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::{
    AptSettings, DEFAULT_APT_ALLOWED_ARCHIVES, DEFAULT_APT_DISTRO, DEFAULT_APT_REMOTE_URL,
    NexusConfig,
};
use crate::policy::AllowlistFiles;
use crate::types::PackagesMode;

#[derive(Args)]
pub struct ConnectionArgs {
    /// Password for the Nexus 'admin' account
    #[arg(long)]
    pub admin_password: String,

    /// Hostname of the Nexus server
    #[arg(long, default_value = "localhost")]
    pub nexus_host: String,

    /// Port of the Nexus server
    #[arg(long, default_value = "80")]
    pub nexus_port: u16,

    /// Context path of the Nexus server (default /)
    #[arg(long, default_value = "")]
    pub nexus_path: String,
}

impl ConnectionArgs {
    #[must_use]
    pub fn config(&self) -> NexusConfig {
        NexusConfig::new(&self.nexus_host, self.nexus_port, &self.nexus_path)
    }
}

#[derive(Args)]
pub struct AptArgs {
    /// Debian mirror proxied by the APT repository
    #[arg(long, env = "APT_REMOTE_URL", default_value = DEFAULT_APT_REMOTE_URL)]
    pub apt_remote_url: String,

    /// Debian distribution served by the APT repository
    #[arg(long, env = "APT_DISTRO", default_value = DEFAULT_APT_DISTRO)]
    pub apt_distro: String,

    /// Comma-separated archive components packages may come from
    #[arg(long, env = "APT_ALLOWED_ARCHIVES", default_value = DEFAULT_APT_ALLOWED_ARCHIVES)]
    pub apt_allowed_archives: String,
}

impl AptArgs {
    #[must_use]
    pub fn settings(&self) -> AptSettings {
        AptSettings::new(
            &self.apt_remote_url,
            &self.apt_distro,
            &self.apt_allowed_archives,
        )
    }
}

#[derive(Args)]
pub struct PackagesArgs {
    /// Whether to allow 'all' packages or only 'selected' packages
    #[arg(long, value_enum)]
    pub packages: PackagesMode,

    /// File of allowed PyPI packages, ignored when PACKAGES is all
    #[arg(long)]
    pub pypi_package_file: Option<PathBuf>,

    /// File of allowed CRAN packages, ignored when PACKAGES is all
    #[arg(long)]
    pub cran_package_file: Option<PathBuf>,

    /// File of allowed APT packages, ignored when PACKAGES is all
    #[arg(long)]
    pub apt_package_file: Option<PathBuf>,
}

impl PackagesArgs {
    #[must_use]
    pub fn files(&self) -> AllowlistFiles {
        AllowlistFiles {
            pypi: self.pypi_package_file.clone(),
            cran: self.cran_package_file.clone(),
            apt: self.apt_package_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Change the initial admin password
    ChangeInitialPassword {
        /// Path of the nexus-data directory
        #[arg(long, default_value = "./nexus-data")]
        path: PathBuf,
    },

    /// Test authentication settings
    TestAuthentication,

    /// Configure the Nexus repository
    InitialConfiguration(PackagesArgs),

    /// Update the Nexus package allowlists
    UpdateAllowlists(PackagesArgs),
}
