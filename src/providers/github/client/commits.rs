use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use log::{debug, info, warn};
use serde::Deserialize;

use super::core::GitHubClient;
use crate::error::Result;
use crate::providers::github::types::{CommitRecord, CommitStats};
use crate::providers::github::url_utils::RepositoryRef;

/// GitHub's maximum page size, and the number of commits analyzed per run.
pub const COMMIT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct CommitSummaryDto {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct CommitDetailDto {
    sha: String,
    commit: GitCommitDto,
    stats: Option<CommitStatsDto>,
}

#[derive(Debug, Deserialize)]
struct GitCommitDto {
    author: Option<SignatureDto>,
    committer: Option<SignatureDto>,
}

#[derive(Debug, Deserialize)]
struct SignatureDto {
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CommitStatsDto {
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
}

impl CommitDetailDto {
    fn into_record(self) -> Option<CommitRecord> {
        let authored_at = [self.commit.author, self.commit.committer]
            .into_iter()
            .flatten()
            .find_map(|signature| signature.date)?;

        Some(CommitRecord {
            sha: self.sha,
            authored_at,
            stats: self.stats.map(|s| CommitStats {
                additions: s.additions,
                deletions: s.deletions,
            }),
        })
    }
}

impl GitHubClient {
    /// Fetch the most recent page of commit summaries
    pub async fn fetch_commit_summaries(
        &self,
        repository: &RepositoryRef,
    ) -> Result<Vec<CommitSummaryDto>> {
        let url = self.repo_url(repository, "/commits")?;
        let request = self.get(url).query(&[("per_page", COMMIT_PAGE_SIZE)]);

        let response = self.send(request, "Commits").await?;
        let commits = response.json::<Vec<CommitSummaryDto>>().await?;
        Ok(commits)
    }

    /// Fetch a single commit with its line stats.
    ///
    /// Returns `None` when GitHub answers with an empty or `null` body, or when the commit
    /// carries no usable date.
    pub async fn fetch_commit(
        &self,
        repository: &RepositoryRef,
        sha: &str,
    ) -> Result<Option<CommitRecord>> {
        let url = self.repo_url(repository, &format!("/commits/{sha}"))?;
        let response = self.send(self.get(url), "Commit detail").await?;
        let body = response.text().await?;

        if body.trim().is_empty() {
            debug!("Commit {sha} returned an empty body");
            return Ok(None);
        }

        let record = serde_json::from_str::<Option<CommitDetailDto>>(&body)?
            .and_then(CommitDetailDto::into_record);

        if record.is_none() {
            debug!("Commit {sha} returned no usable data");
        }

        Ok(record)
    }

    /// Fetch the latest commits with stats, one concurrent detail request per summary.
    ///
    /// Any failed request fails the whole batch. Details without data are dropped, so the
    /// result may be shorter than the summary page. Order follows the summary page.
    pub async fn fetch_commits(&self, repository: &RepositoryRef) -> Result<Vec<CommitRecord>> {
        let summaries = self.fetch_commit_summaries(repository).await?;

        info!(
            "Fetching details for {} commits in parallel...",
            summaries.len()
        );

        let details = try_join_all(
            summaries
                .iter()
                .map(|summary| self.fetch_commit(repository, &summary.sha)),
        )
        .await?;

        let requested = details.len();
        let commits: Vec<CommitRecord> = details.into_iter().flatten().collect();

        if commits.len() < requested {
            warn!(
                "Dropped {} of {requested} commits without detail data",
                requested - commits.len()
            );
        }

        Ok(commits)
    }
}
