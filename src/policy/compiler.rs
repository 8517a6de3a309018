use crate::config::{APT_PROXY, AptSettings, CRAN_PROXY, PYPI_PROXY};
use crate::types::{ContentSelector, ContentSelectorPrivilege, PackagesMode, RepositoryType};

use super::Allowlists;

/// A content selector and the READ privilege scoped to it. Both share a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub name: String,
    pub description: String,
    /// CSEL expression matched against repository content.
    pub expression: String,
    pub repo_type: RepositoryType,
    pub repository: String,
}

impl AccessRule {
    fn new(
        repo_type: RepositoryType,
        name: impl Into<String>,
        description: impl Into<String>,
        condition: impl AsRef<str>,
    ) -> Self {
        let repository = match repo_type {
            RepositoryType::Pypi => PYPI_PROXY,
            RepositoryType::Cran => CRAN_PROXY,
            RepositoryType::Apt => APT_PROXY,
        };
        Self {
            name: name.into(),
            description: description.into(),
            expression: format!(
                "format == \"{}\" and {}",
                repo_type.format(),
                condition.as_ref()
            ),
            repo_type,
            repository: repository.to_string(),
        }
    }

    #[must_use]
    pub fn content_selector(&self) -> ContentSelector {
        ContentSelector {
            name: self.name.clone(),
            description: self.description.clone(),
            expression: self.expression.clone(),
        }
    }

    #[must_use]
    pub fn privilege(&self) -> ContentSelectorPrivilege {
        ContentSelectorPrivilege {
            name: self.name.clone(),
            description: self.description.clone(),
            actions: vec!["READ".to_string()],
            format: self.repo_type.format().to_string(),
            repository: self.repository.clone(),
            content_selector: self.name.clone(),
        }
    }
}

/// Rule for a single allowlisted package, named `<ecosystem>-<package>`.
fn package_rule(ty: RepositoryType, package: &str, condition: String) -> AccessRule {
    AccessRule::new(
        ty,
        format!("{}-{package}", ty.ecosystem()),
        format!("Allow access to {package} on {}", ty.display_name()),
        condition,
    )
}

fn catch_all_rule(ty: RepositoryType, condition: impl AsRef<str>) -> AccessRule {
    AccessRule::new(
        ty,
        format!("{}-all", ty.ecosystem()),
        format!("Allow access to all {} packages", ty.display_name()),
        condition,
    )
}

/// Build every access rule for the given mode.
///
/// Index and metadata rules are always present so package managers can
/// resolve names even when nothing is allowlisted. In [`PackagesMode::All`]
/// the allowlists are ignored. Rules are grouped by ecosystem (PyPI, CRAN,
/// APT) with the metadata rules first.
#[must_use]
pub fn compile(mode: PackagesMode, allowlists: &Allowlists, apt: &AptSettings) -> Vec<AccessRule> {
    let mut rules = Vec::new();
    rules.extend(pypi_rules(mode, &allowlists.pypi));
    rules.extend(cran_rules(mode, &allowlists.cran));
    rules.extend(apt_rules(mode, &allowlists.apt, apt));
    rules
}

fn pypi_rules(mode: PackagesMode, allowlist: &[String]) -> Vec<AccessRule> {
    let ty = RepositoryType::Pypi;
    let mut rules = vec![AccessRule::new(
        ty,
        "simple",
        "Allow access to 'simple' directory in PyPI repository",
        r#"path =^ "/simple""#,
    )];

    match mode {
        PackagesMode::All => rules.push(catch_all_rule(ty, r#"path =^ "/packages/""#)),
        PackagesMode::Selected => rules.extend(allowlist.iter().map(|package| {
            package_rule(ty, package, format!(r#"path =^ "/packages/{package}/""#))
        })),
    }
    rules
}

fn cran_rules(mode: PackagesMode, allowlist: &[String]) -> Vec<AccessRule> {
    let ty = RepositoryType::Cran;
    let mut rules = vec![
        AccessRule::new(
            ty,
            "packages",
            "Allow access to 'PACKAGES' file in CRAN repository",
            r#"path == "/src/contrib/PACKAGES""#,
        ),
        AccessRule::new(
            ty,
            "archive",
            "Allow access to 'archive.rds' file in CRAN repository",
            r#"path == "/src/contrib/Meta/archive.rds""#,
        ),
    ];

    match mode {
        PackagesMode::All => rules.push(catch_all_rule(ty, r#"path =^ "/src/contrib""#)),
        PackagesMode::Selected => rules.extend(allowlist.iter().map(|package| {
            // current sources and archived versions
            package_rule(
                ty,
                package,
                format!(
                    r#"(path =^ "/src/contrib/{package}_" or path =^ "/src/contrib/Archive/{package}/{package}_")"#
                ),
            )
        })),
    }
    rules
}

fn apt_rules(mode: PackagesMode, allowlist: &[String], apt: &AptSettings) -> Vec<AccessRule> {
    let ty = RepositoryType::Apt;
    let release = &apt.distro;
    // `=~` is evaluated as a Java regex
    let release_pattern = regex::escape(release);
    let archives = apt.archive_pattern();

    let mut rules = vec![
        AccessRule::new(
            ty,
            "apt-packages",
            "Allow access to 'Packages.gz' files in APT repository",
            format!(r#"path =~ "/dists/{release_pattern}/.*/Packages\.gz""#),
        ),
        AccessRule::new(
            ty,
            "inrelease",
            "Allow access to 'InRelease' file in APT repository",
            format!(r#"path == "/dists/{release}/InRelease""#),
        ),
        AccessRule::new(
            ty,
            "apt-translation",
            "Allow access to 'Translation' files in APT repository",
            format!(r#"path =~ "/dists/{release_pattern}/.*/Translation-.*""#),
        ),
    ];

    match mode {
        PackagesMode::All => {
            rules.push(catch_all_rule(ty, format!(r#"path =~ "/pool/({archives})/.*""#)));
        }
        PackagesMode::Selected => rules.extend(allowlist.iter().map(|package| {
            let name_pattern = regex::escape(package);
            package_rule(
                ty,
                package,
                format!(r#"path =~ "/pool/({archives})/.*/{name_pattern}.*""#),
            )
        })),
    }
    rules
}
