use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Package ecosystems that can be proxied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepositoryType {
    #[serde(rename = "pypi")]
    Pypi,
    #[serde(rename = "r")]
    Cran,
    #[serde(rename = "apt")]
    Apt,
}

impl RepositoryType {
    /// Format tag used by the Nexus REST API.
    #[must_use]
    pub const fn format(self) -> &'static str {
        match self {
            Self::Pypi => "pypi",
            Self::Cran => "r",
            Self::Apt => "apt",
        }
    }

    /// Prefix for content selector and privilege names.
    #[must_use]
    pub const fn ecosystem(self) -> &'static str {
        match self {
            Self::Pypi => "pypi",
            Self::Cran => "cran",
            Self::Apt => "apt",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pypi => "PyPI",
            Self::Cran => "CRAN",
            Self::Apt => "APT",
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format())
    }
}

impl FromStr for RepositoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pypi" => Ok(Self::Pypi),
            "r" => Ok(Self::Cran),
            "apt" => Ok(Self::Apt),
            other => Err(Error::RepositoryType(other.to_string())),
        }
    }
}

/// A proxy repository declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub repo_type: RepositoryType,
    pub name: String,
    pub remote_url: String,
    /// Debian distribution, only meaningful for APT proxies.
    pub distribution: Option<String>,
}

impl Repository {
    pub fn new(
        repo_type: RepositoryType,
        name: impl Into<String>,
        remote_url: impl Into<String>,
    ) -> Self {
        Self {
            repo_type,
            name: name.into(),
            remote_url: remote_url.into(),
            distribution: None,
        }
    }

    /// Build a declaration from an untyped format tag, rejecting unknown formats.
    pub fn parse(
        repo_type: &str,
        name: impl Into<String>,
        remote_url: impl Into<String>,
    ) -> crate::error::Result<Self> {
        Ok(Self::new(repo_type.parse()?, name, remote_url))
    }

    #[must_use]
    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        self.distribution = Some(distribution.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(RepositoryType::Pypi.format(), "pypi");
        assert_eq!(RepositoryType::Cran.format(), "r");
        assert_eq!(RepositoryType::Apt.format(), "apt");
    }

    #[test]
    fn test_parse_repository_type() {
        assert_eq!("r".parse::<RepositoryType>().unwrap(), RepositoryType::Cran);
        assert!(matches!(
            "maven2".parse::<RepositoryType>(),
            Err(Error::RepositoryType(t)) if t == "maven2"
        ));
        // the ecosystem prefix is not a format tag
        assert!("cran".parse::<RepositoryType>().is_err());
    }

    #[test]
    fn test_repository_parse_rejects_unknown_format() {
        let repo = Repository::parse("pypi", "pypi-proxy", "https://pypi.org/").unwrap();
        assert_eq!(repo.repo_type, RepositoryType::Pypi);
        assert!(Repository::parse("npm", "npm-proxy", "https://registry.npmjs.org/").is_err());
    }

    #[test]
    fn test_serde_uses_format_tag() {
        let json = serde_json::to_string(&RepositoryType::Cran).unwrap();
        assert_eq!(json, "\"r\"");
    }
}
