//! Typed access to the Nexus administrative REST API.
//!
//! Every operation builds one request (or a list request followed by one
//! request per item), classifies the status code and logs the result. HTTP
//! level failures are reported as [`Outcome::Failed`] rather than errors, so a
//! reconciliation run carries on past them. Only transport failures surface as
//! [`Error::Http`](crate::error::Error::Http).

mod client;
mod response;

pub use client::NexusClient;
pub use response::{Expected, Outcome};

use crate::error::Result;
use crate::types::{ContentSelector, ContentSelectorPrivilege, Repository, Role};

/// Administrative operations against a Nexus instance.
pub trait NexusAdmin {
    /// Change the admin password. The stored credential is only replaced
    /// after the server confirms the change.
    fn change_admin_password(&mut self, new_password: &str) -> Result<Outcome>;

    fn delete_all_repositories(&self) -> Result<()>;

    fn create_proxy_repository(&self, repository: &Repository) -> Result<Outcome>;

    fn delete_all_content_selectors(&self) -> Result<()>;

    fn create_content_selector(&self, selector: &ContentSelector) -> Result<Outcome>;

    /// Delete every privilege of type `repository-content-selector`.
    fn delete_all_content_selector_privileges(&self) -> Result<()>;

    fn create_content_selector_privilege(
        &self,
        privilege: &ContentSelectorPrivilege,
    ) -> Result<Outcome>;

    /// Delete all roles except the built-in `nx-admin` and `nx-anonymous`.
    fn delete_all_custom_roles(&self) -> Result<()>;

    fn create_role(&self, role: &Role) -> Result<Outcome>;

    /// Replace the privileges and nested roles of an existing role.
    fn update_role(&self, role: &Role) -> Result<Outcome>;

    fn enable_anonymous_access(&self) -> Result<Outcome>;

    /// Overwrite the roles of the `anonymous` user.
    fn update_anonymous_user_roles(&self, roles: &[String]) -> Result<Outcome>;

    /// Returns true when the configured credentials are accepted.
    fn test_auth(&self) -> Result<bool>;
}
