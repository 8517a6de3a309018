use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether anonymous users may pull every package or only allowlisted ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PackagesMode {
    All,
    Selected,
}

impl fmt::Display for PackagesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Selected => f.write_str("selected"),
        }
    }
}

/// A CSEL query over repository content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSelector {
    pub name: String,
    pub description: String,
    pub expression: String,
}

/// READ access to the content matched by a content selector in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSelectorPrivilege {
    pub name: String,
    pub description: String,
    pub actions: Vec<String>,
    pub format: String,
    pub repository: String,
    pub content_selector: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub privileges: Vec<String>,
    pub roles: Vec<String>,
}

impl Role {
    /// A role whose id is its name, with no nested roles.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        privileges: Vec<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: description.into(),
            privileges,
            roles: Vec::new(),
        }
    }
}
