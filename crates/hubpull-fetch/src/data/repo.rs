use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Model directory paths, relative to the repository root, that a load needs.
pub type RequiredModelSet = BTreeSet<String>;

/// A remote repository identifier of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoId {
    owner: String,
    name:  String,
}

impl RepoId {
    pub fn new(id: &str) -> Result<Self> { id.parse() }

    pub fn owner(&self) -> &str { &self.owner }

    pub fn name(&self) -> &str { &self.name }

    /// Name of the local cache folder for this repository.
    pub fn folder_name(&self) -> String { format!("{}_{}", self.owner, self.name) }
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidRepository {
            id: s.to_string(),
            reason,
        };

        let (owner, name) = s.trim().split_once('/').ok_or_else(|| invalid("expected owner/name"))?;
        for part in [owner, name] {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }
            if part == "." || part == ".." {
                return Err(invalid("relative segment"));
            }
            if part.contains(['/', '\\']) {
                return Err(invalid("expected exactly one '/'"));
            }
        }

        Ok(Self {
            owner: owner.to_string(),
            name:  name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}/{}", self.owner, self.name) }
}
