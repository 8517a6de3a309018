use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::types::RepositoryType;

// https://packaging.python.org/en/latest/specifications/name-normalization/
static PYPI_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[._-]+").unwrap_or_else(|e| panic!("invalid separator pattern: {e}"))
});

/// Normalized package names per ecosystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlists {
    pub pypi: Vec<String>,
    pub cran: Vec<String>,
    pub apt: Vec<String>,
}

/// Allowlist file locations; an undeclared file means an empty allowlist.
#[derive(Debug, Clone, Default)]
pub struct AllowlistFiles {
    pub pypi: Option<PathBuf>,
    pub cran: Option<PathBuf>,
    pub apt: Option<PathBuf>,
}

impl AllowlistFiles {
    fn declared(&self) -> impl Iterator<Item = (RepositoryType, &Path)> {
        [
            (RepositoryType::Pypi, self.pypi.as_deref()),
            (RepositoryType::Cran, self.cran.as_deref()),
            (RepositoryType::Apt, self.apt.as_deref()),
        ]
        .into_iter()
        .filter_map(|(repo_type, path)| path.map(|p| (repo_type, p)))
    }

    /// Fail if any declared file does not exist.
    pub fn check(&self) -> Result<()> {
        for (_, path) in self.declared() {
            if !path.is_file() {
                return Err(Error::AllowlistNotFound(path.to_path_buf()));
            }
        }
        Ok(())
    }

    pub fn load(&self) -> Result<Allowlists> {
        let mut allowlists = Allowlists::default();
        for (repo_type, path) in self.declared() {
            let names = read_allowlist(path, repo_type)?;
            tracing::info!(
                count = names.len(),
                "Read {} allowlist from {}",
                repo_type.display_name(),
                path.display()
            );
            match repo_type {
                RepositoryType::Pypi => allowlists.pypi = names,
                RepositoryType::Cran => allowlists.cran = names,
                RepositoryType::Apt => allowlists.apt = names,
            }
        }
        Ok(allowlists)
    }
}

fn read_allowlist(path: &Path, repo_type: RepositoryType) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => parse_allowlist(&content, repo_type),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::AllowlistNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// One package name per line. Blank lines are dropped since an empty name
/// would match every package.
pub fn parse_allowlist(content: &str, repo_type: RepositoryType) -> Result<Vec<String>> {
    content
        .lines()
        .map(|line| normalize_package_name(line, repo_type))
        .filter(|name| !matches!(name, Ok(n) if n.is_empty()))
        .collect()
}

/// PyPI names are lowercased with runs of `.`, `_` and `-` collapsed to `-`.
/// APT names are lowercased. CRAN names are case sensitive and only trimmed.
///
/// Names end up inside double-quoted CSEL literals, so `"` and `\` are
/// rejected.
pub fn normalize_package_name(name: &str, repo_type: RepositoryType) -> Result<String> {
    let name = name.trim();
    if name.contains(['"', '\\']) {
        return Err(Error::InvalidPackageName(name.to_string()));
    }
    Ok(match repo_type {
        RepositoryType::Pypi => PYPI_SEPARATORS
            .replace_all(&name.to_lowercase(), "-")
            .into_owned(),
        RepositoryType::Cran => name.to_string(),
        RepositoryType::Apt => name.to_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pypi() {
        assert_eq!(
            normalize_package_name("  NumPy.Extras  ", RepositoryType::Pypi).unwrap(),
            "numpy-extras"
        );
        assert_eq!(
            normalize_package_name("zope.interface__x--y", RepositoryType::Pypi).unwrap(),
            "zope-interface-x-y"
        );
    }

    #[test]
    fn test_normalize_cran_preserves_case() {
        assert_eq!(
            normalize_package_name("MASS", RepositoryType::Cran).unwrap(),
            "MASS"
        );
        assert_eq!(
            normalize_package_name(" data.table\n", RepositoryType::Cran).unwrap(),
            "data.table"
        );
    }

    #[test]
    fn test_normalize_apt_lowercases() {
        assert_eq!(
            normalize_package_name("Python3.11-Dev", RepositoryType::Apt).unwrap(),
            "python3.11-dev"
        );
    }

    #[test]
    fn test_normalize_rejects_quotes_and_backslashes() {
        for name in [r#"numpy" or path =^ "/"#, r"lib\foo"] {
            for repo_type in [RepositoryType::Pypi, RepositoryType::Cran, RepositoryType::Apt] {
                assert!(matches!(
                    normalize_package_name(name, repo_type),
                    Err(Error::InvalidPackageName(n)) if n == name
                ));
            }
        }
    }

    #[test]
    fn test_load_fails_on_invalid_name() {
        let dir = tempfile::tempdir().unwrap();
        let apt = dir.path().join("apt.txt");
        fs::write(&apt, "libssl3\nbad\"name\n").unwrap();

        let files = AllowlistFiles {
            apt: Some(apt),
            ..AllowlistFiles::default()
        };
        assert!(matches!(files.load(), Err(Error::InvalidPackageName(n)) if n == "bad\"name"));
    }

    #[test]
    fn test_parse_drops_blank_lines() {
        let content = "numpy\n\n   \npandas\r\n";
        assert_eq!(
            parse_allowlist(content, RepositoryType::Pypi).unwrap(),
            vec!["numpy", "pandas"]
        );
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        let content = "Flask\nflask\n";
        assert_eq!(
            parse_allowlist(content, RepositoryType::Pypi).unwrap(),
            vec!["flask", "flask"]
        );
    }

    #[test]
    fn test_check_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = AllowlistFiles {
            cran: Some(dir.path().join("cran.txt")),
            ..AllowlistFiles::default()
        };
        assert!(matches!(files.check(), Err(Error::AllowlistNotFound(p)) if p.ends_with("cran.txt")));
    }

    #[test]
    fn test_load_reads_declared_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let pypi = dir.path().join("pypi.txt");
        let cran = dir.path().join("cran.txt");
        fs::write(&pypi, "Requests\nscikit_learn\n").unwrap();
        fs::write(&cran, "MASS\n\nggplot2\n").unwrap();

        let files = AllowlistFiles {
            pypi: Some(pypi),
            cran: Some(cran),
            apt: None,
        };
        files.check().unwrap();
        let allowlists = files.load().unwrap();

        assert_eq!(allowlists.pypi, vec!["requests", "scikit-learn"]);
        assert_eq!(allowlists.cran, vec!["MASS", "ggplot2"]);
        assert!(allowlists.apt.is_empty());
    }
}
