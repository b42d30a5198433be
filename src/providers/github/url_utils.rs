use std::fmt;
use std::str::FromStr;

use crate::error::{RepoLensError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    pub fn new(owner: &str, repo: &str) -> Result<Self> {
        for part in [owner, repo] {
            if !is_valid_segment(part) {
                return Err(RepoLensError::InvalidRepository(format!(
                    "'{part}' is not a valid owner or repository name"
                )));
            }
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Accepts `owner/repo` or a web URL such as `https://github.com/owner/repo.git`.
    /// Path segments after the repository name (`/tree/main`, `/pulls`) are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let path = strip_host(trimmed);

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let (Some(owner), Some(repo)) = (segments.next(), segments.next()) else {
            return Err(RepoLensError::InvalidRepository(format!(
                "expected 'owner/repo' or a repository URL, got '{trimmed}'"
            )));
        };

        Self::new(owner, repo.strip_suffix(".git").unwrap_or(repo))
    }
}

impl FromStr for RepositoryRef {
    type Err = RepoLensError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn strip_host(input: &str) -> &str {
    let without_scheme = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);

    without_scheme
        .strip_prefix("www.github.com/")
        .or_else(|| without_scheme.strip_prefix("github.com/"))
        .unwrap_or(without_scheme)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
