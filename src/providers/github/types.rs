use chrono::{DateTime, Utc};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryInfo {
    pub full_name: String,
    pub open_issues_count: u64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub sha: String,
    pub authored_at: DateTime<Utc>,
    pub stats: Option<CommitStats>,
}

/// Raw snapshot of one repository, assembled once per analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryData {
    pub info: RepositoryInfo,
    /// Bytes per language, in the order the API listed them.
    pub languages: IndexMap<String, u64>,
    pub contributor_total: u64,
    pub pull_request_total: u64,
    /// Newest first.
    pub commits: Vec<CommitRecord>,
}
