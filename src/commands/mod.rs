pub mod categories;
pub mod comments;
pub mod discussions;
pub mod init;

use crate::cli::{CategoryArgs, PageArgs, RepoArgs};
use crate::config::Config;
use crate::discussions::resolve::CategorySelector;
use crate::discussions::ORG_DISCUSSIONS_REPO;
use crate::error::{DiscussError, Result};
use crate::pagination::PageRequest;

/// Owner and repository a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub owner: String,
    pub repo: String,
}

impl Target {
    /// Repository is required.
    pub fn repository(config: &Config, args: &RepoArgs) -> Result<Self> {
        let (owner, repo) = args.parts()?;
        let repo = repo
            .filter(|r| !r.is_empty())
            .ok_or_else(|| DiscussError::InvalidArgument("--repo is required".to_string()))?;
        Ok(Self {
            owner: config.resolve_owner(owner.as_deref())?,
            repo,
        })
    }

    /// Without a repository, the owner's organization discussions are used.
    pub fn repository_or_org(config: &Config, args: &RepoArgs) -> Result<Self> {
        let (owner, repo) = args.parts()?;
        Ok(Self {
            owner: config.resolve_owner(owner.as_deref())?,
            repo: repo
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| ORG_DISCUSSIONS_REPO.to_string()),
        })
    }
}

impl From<&PageArgs> for PageRequest {
    fn from(args: &PageArgs) -> Self {
        PageRequest::new(args.first, args.after.clone())
    }
}

impl CategoryArgs {
    pub fn selector(&self) -> Option<CategorySelector> {
        CategorySelector::from_parts(self.category_id.clone(), self.category_name.clone())
    }
}
