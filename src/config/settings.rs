use crate::types::{Repository, RepositoryType};

pub const DEFAULT_APT_REMOTE_URL: &str = "http://deb.debian.org/debian";
pub const DEFAULT_APT_DISTRO: &str = "bookworm";
pub const DEFAULT_APT_ALLOWED_ARCHIVES: &str = "main,contrib,non-free-firmware,non-free";

pub const PYPI_PROXY: &str = "pypi-proxy";
pub const CRAN_PROXY: &str = "cran-proxy";
pub const APT_PROXY: &str = "apt-proxy";

const PYPI_REMOTE_URL: &str = "https://pypi.org/";
const CRAN_REMOTE_URL: &str = "https://cran.r-project.org/";

/// Role granted to the anonymous user.
pub const ROLE_NAME: &str = "nexus user";
pub const ROLE_DESCRIPTION: &str = "allows access to selected packages";

/// Debian mirror settings for the APT proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptSettings {
    pub remote_url: String,
    pub distro: String,
    /// Archive components packages may be served from, e.g. `main`.
    pub allowed_archives: Vec<String>,
}

impl AptSettings {
    pub fn new(
        remote_url: impl Into<String>,
        distro: impl Into<String>,
        allowed_archives: &str,
    ) -> Self {
        Self {
            remote_url: remote_url.into(),
            distro: distro.into(),
            allowed_archives: parse_archives(allowed_archives),
        }
    }

    /// Regex alternation over the allowed archives, e.g. `main|contrib`.
    /// Each archive is escaped so it only matches literally.
    #[must_use]
    pub fn archive_pattern(&self) -> String {
        self.allowed_archives
            .iter()
            .map(|archive| regex::escape(archive))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl Default for AptSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_APT_REMOTE_URL,
            DEFAULT_APT_DISTRO,
            DEFAULT_APT_ALLOWED_ARCHIVES,
        )
    }
}

fn parse_archives(archives: &str) -> Vec<String> {
    archives
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}

/// The proxy repositories every configured instance carries.
#[must_use]
pub fn repositories(apt: &AptSettings) -> Vec<Repository> {
    vec![
        Repository::new(RepositoryType::Pypi, PYPI_PROXY, PYPI_REMOTE_URL),
        Repository::new(RepositoryType::Cran, CRAN_PROXY, CRAN_REMOTE_URL),
        Repository::new(RepositoryType::Apt, APT_PROXY, apt.remote_url.clone())
            .with_distribution(apt.distro.clone()),
    ]
}
