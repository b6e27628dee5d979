use serde::Deserialize;

// Only the fields that the export uses are modeled here; serde ignores the rest of each payload.

// -------------------------------------------------------------------------------------------------
// Repository
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: SimpleUser,
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner.login, self.name)
    }
}

// -------------------------------------------------------------------------------------------------
// SimpleUser
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct SimpleUser {
    pub login: String,
}

// -------------------------------------------------------------------------------------------------
// Branch
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Branch {
    pub name: String,
}

// -------------------------------------------------------------------------------------------------
// Commit
// -------------------------------------------------------------------------------------------------
/// An entry from the `GET /repos/{owner}/{repo}/commits` listing.
#[derive(Debug, Default, Deserialize)]
pub struct Commit {
    pub sha: Option<String>,
    #[serde(default)]
    pub commit: GitCommit,
}

impl Commit {
    pub fn author_name(&self) -> Option<&str> {
        self.commit.author.as_ref()?.name.as_deref()
    }

    pub fn author_date(&self) -> Option<&str> {
        self.commit.author.as_ref()?.date.as_deref()
    }

    pub fn message(&self) -> &str {
        self.commit.message.as_deref().unwrap_or("")
    }
}

// -------------------------------------------------------------------------------------------------
// GitCommit
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Default, Deserialize)]
pub struct GitCommit {
    pub author: Option<GitSignature>,
    pub message: Option<String>,
}

// -------------------------------------------------------------------------------------------------
// GitSignature
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Default, Deserialize)]
pub struct GitSignature {
    pub name: Option<String>,
    pub email: Option<String>,
    /// ISO-8601 timestamp, kept as GitHub formats it
    pub date: Option<String>,
}
