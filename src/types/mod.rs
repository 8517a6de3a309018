mod models;
mod repository;

pub use models::{ContentSelector, ContentSelectorPrivilege, PackagesMode, Role};
pub use repository::{Repository, RepositoryType};
