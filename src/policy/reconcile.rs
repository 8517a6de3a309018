//! Delete-then-recreate procedures. Repeated runs converge on the same state
//! as long as nothing else edits the server concurrently.

use tracing::info;

use crate::config::{AptSettings, ROLE_DESCRIPTION, ROLE_NAME};
use crate::error::Result;
use crate::nexus::{NexusAdmin, Outcome};
use crate::types::{PackagesMode, Repository, Role};

use super::{Allowlists, compile};

/// Replace every repository on the server with `repositories`.
pub fn recreate_repositories(nexus: &impl NexusAdmin, repositories: &[Repository]) -> Result<()> {
    nexus.delete_all_repositories()?;
    for repository in repositories {
        nexus.create_proxy_repository(repository)?;
    }
    Ok(())
}

/// Replace all content selectors and content selector privileges with the
/// rules compiled from `mode` and `allowlists`.
///
/// Returns the names of every privilege submitted, in creation order.
pub fn recreate_privileges(
    nexus: &impl NexusAdmin,
    mode: PackagesMode,
    allowlists: &Allowlists,
    apt: &AptSettings,
) -> Result<Vec<String>> {
    // privileges reference selectors
    nexus.delete_all_content_selector_privileges()?;
    nexus.delete_all_content_selectors()?;

    let rules = compile(mode, allowlists, apt);
    info!(%mode, rules = rules.len(), "Creating content selectors and privileges");

    let mut privileges = Vec::with_capacity(rules.len());
    for rule in rules {
        nexus.create_content_selector(&rule.content_selector())?;
        nexus.create_content_selector_privilege(&rule.privilege())?;
        privileges.push(rule.name);
    }
    Ok(privileges)
}

/// Recreate the managed role with no privileges and make it the anonymous
/// user's only role, then enable anonymous access.
pub fn configure_anonymous_role(nexus: &impl NexusAdmin) -> Result<()> {
    nexus.delete_all_custom_roles()?;
    nexus.create_role(&Role::new(ROLE_NAME, ROLE_DESCRIPTION, Vec::new()))?;
    nexus.update_anonymous_user_roles(&[ROLE_NAME.to_string()])?;
    nexus.enable_anonymous_access()?;
    Ok(())
}

/// Overwrite the managed role's privileges.
pub fn grant_role_privileges(nexus: &impl NexusAdmin, privileges: Vec<String>) -> Result<Outcome> {
    nexus.update_role(&Role::new(ROLE_NAME, ROLE_DESCRIPTION, privileges))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::repositories;
    use crate::types::{ContentSelector, ContentSelectorPrivilege};

    /// Records every call in order instead of talking to a server.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn record(&self, call: String) -> Result<Outcome> {
            self.calls.borrow_mut().push(call);
            Ok(Outcome::Success)
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn position(&self, call: &str) -> usize {
            self.calls()
                .iter()
                .position(|c| c == call)
                .unwrap_or_else(|| panic!("{call} was never made"))
        }
    }

    impl NexusAdmin for Recorder {
        fn change_admin_password(&mut self, _new_password: &str) -> Result<Outcome> {
            self.record("change_admin_password".into())
        }

        fn delete_all_repositories(&self) -> Result<()> {
            self.record("delete_all_repositories".into()).map(|_| ())
        }

        fn create_proxy_repository(&self, repository: &Repository) -> Result<Outcome> {
            self.record(format!("create_proxy_repository {}", repository.name))
        }

        fn delete_all_content_selectors(&self) -> Result<()> {
            self.record("delete_all_content_selectors".into()).map(|_| ())
        }

        fn create_content_selector(&self, selector: &ContentSelector) -> Result<Outcome> {
            self.record(format!("create_content_selector {}", selector.name))
        }

        fn delete_all_content_selector_privileges(&self) -> Result<()> {
            self.record("delete_all_content_selector_privileges".into())
                .map(|_| ())
        }

        fn create_content_selector_privilege(
            &self,
            privilege: &ContentSelectorPrivilege,
        ) -> Result<Outcome> {
            self.record(format!("create_privilege {}", privilege.name))
        }

        fn delete_all_custom_roles(&self) -> Result<()> {
            self.record("delete_all_custom_roles".into()).map(|_| ())
        }

        fn create_role(&self, role: &Role) -> Result<Outcome> {
            self.record(format!("create_role {} {:?}", role.name, role.privileges))
        }

        fn update_role(&self, role: &Role) -> Result<Outcome> {
            self.record(format!("update_role {} {:?}", role.name, role.privileges))
        }

        fn enable_anonymous_access(&self) -> Result<Outcome> {
            self.record("enable_anonymous_access".into())
        }

        fn update_anonymous_user_roles(&self, roles: &[String]) -> Result<Outcome> {
            self.record(format!("update_anonymous_user_roles {roles:?}"))
        }

        fn test_auth(&self) -> Result<bool> {
            self.record("test_auth".into()).map(|_| true)
        }
    }

    fn allowlists() -> Allowlists {
        Allowlists {
            pypi: vec!["numpy".into()],
            cran: vec!["MASS".into()],
            apt: Vec::new(),
        }
    }

    #[test]
    fn test_privileges_deleted_before_selectors() {
        let nexus = Recorder::default();
        recreate_privileges(
            &nexus,
            PackagesMode::Selected,
            &allowlists(),
            &AptSettings::default(),
        )
        .unwrap();

        let calls = nexus.calls();
        assert_eq!(calls[0], "delete_all_content_selector_privileges");
        assert_eq!(calls[1], "delete_all_content_selectors");
        assert!(calls[2..].iter().all(|c| c.starts_with("create_")));
    }

    #[test]
    fn test_selector_created_before_its_privilege() {
        let nexus = Recorder::default();
        let names = recreate_privileges(
            &nexus,
            PackagesMode::Selected,
            &allowlists(),
            &AptSettings::default(),
        )
        .unwrap();

        for name in &names {
            let selector = nexus.position(&format!("create_content_selector {name}"));
            let privilege = nexus.position(&format!("create_privilege {name}"));
            assert!(selector < privilege, "{name} privilege created before selector");
        }
    }

    #[test]
    fn test_returns_all_privilege_names_in_order() {
        let nexus = Recorder::default();
        let names = recreate_privileges(
            &nexus,
            PackagesMode::Selected,
            &allowlists(),
            &AptSettings::default(),
        )
        .unwrap();

        assert_eq!(
            names,
            vec![
                "simple",
                "pypi-numpy",
                "packages",
                "archive",
                "cran-MASS",
                "apt-packages",
                "inrelease",
                "apt-translation"
            ]
        );
    }

    #[test]
    fn test_repeated_runs_issue_identical_calls() {
        let first = Recorder::default();
        let second = Recorder::default();
        for nexus in [&first, &second] {
            recreate_privileges(
                nexus,
                PackagesMode::Selected,
                &allowlists(),
                &AptSettings::default(),
            )
            .unwrap();
        }
        assert_eq!(first.calls(), second.calls());
    }

    #[test]
    fn test_recreate_repositories_deletes_first() {
        let nexus = Recorder::default();
        recreate_repositories(&nexus, &repositories(&AptSettings::default())).unwrap();
        assert_eq!(
            nexus.calls(),
            vec![
                "delete_all_repositories",
                "create_proxy_repository pypi-proxy",
                "create_proxy_repository cran-proxy",
                "create_proxy_repository apt-proxy"
            ]
        );
    }

    #[test]
    fn test_configure_anonymous_role() {
        let nexus = Recorder::default();
        configure_anonymous_role(&nexus).unwrap();
        assert_eq!(
            nexus.calls(),
            vec![
                "delete_all_custom_roles",
                "create_role nexus user []",
                "update_anonymous_user_roles [\"nexus user\"]",
                "enable_anonymous_access"
            ]
        );
    }

    #[test]
    fn test_grant_role_privileges() {
        let nexus = Recorder::default();
        grant_role_privileges(&nexus, vec!["simple".into(), "pypi-numpy".into()]).unwrap();
        assert_eq!(
            nexus.calls(),
            vec!["update_role nexus user [\"simple\", \"pypi-numpy\"]"]
        );
    }
}
