use tracing::debug;

use super::models::{Branch, Commit, Repository};
use super::{Client, Result};

/// An `Enumerator` provides higher-level functionality on top of the GitHub REST API to list the
/// repositories, branches, and commits that an export walks.
///
/// All listings are returned in the order GitHub produces them.
pub struct Enumerator<'c> {
    client: &'c Client,
}

impl<'c> Enumerator<'c> {
    pub fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Enumerate the repositories accessible to the authenticated user.
    ///
    /// `affiliation` is not validated locally.
    pub async fn repositories(&self, affiliation: &str) -> Result<Vec<Repository>> {
        let repos = self.client.get_user_repos(affiliation).await?;
        debug!("Enumerated {} repositories with affiliation {affiliation:?}", repos.len());
        Ok(repos)
    }

    /// Enumerate the branches of the given repository.
    pub async fn branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        let branches = self.client.get_repo_branches(owner, repo).await?;
        debug!("Enumerated {} branches of {owner}/{repo}", branches.len());
        Ok(branches)
    }

    /// Enumerate the commits reachable from the given branch of a repository.
    pub async fn commits(&self, owner: &str, repo: &str, branch: &str) -> Result<Vec<Commit>> {
        let commits = self.client.get_repo_commits(owner, repo, branch).await?;
        debug!("Enumerated {} commits on {owner}/{repo} branch {branch}", commits.len());
        Ok(commits)
    }
}
