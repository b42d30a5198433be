use log::{info, warn};

use super::client::GitHubClient;
use super::metrics::derive_metrics;
use super::types::RepositoryData;
use super::url_utils::RepositoryRef;
use crate::analysis::analyze;
use crate::clock::Clock;
use crate::error::Result;
use crate::insights::RepositoryReport;

pub struct GitHubProvider {
    pub client: GitHubClient,
    pub repository: RepositoryRef,
}

impl GitHubProvider {
    pub fn new(client: GitHubClient, repository: RepositoryRef) -> Self {
        Self { client, repository }
    }

    /// Fetch all five datasets concurrently and join them into one snapshot.
    ///
    /// The first failing request aborts the others; no partial snapshot is returned.
    pub async fn fetch_repository_data(&self) -> Result<RepositoryData> {
        let repository = &self.repository;
        info!("Fetching repository data for {repository}...");

        let (info, languages, contributor_total, pull_request_total, commits) = tokio::try_join!(
            self.client.fetch_repository_info(repository),
            self.client.fetch_languages(repository),
            self.client.fetch_contributor_total(repository),
            self.client.fetch_pull_request_total(repository),
            self.client.fetch_commits(repository),
        )?;

        info!(
            "Fetched {} commits, {} languages, {contributor_total} contributors, {pull_request_total} pull requests",
            commits.len(),
            languages.len()
        );

        Ok(RepositoryData {
            info,
            languages,
            contributor_total,
            pull_request_total,
            commits,
        })
    }

    pub async fn collect_insights(&self, clock: &impl Clock) -> Result<RepositoryReport> {
        info!(
            "Starting insights collection for repository: {}",
            self.repository
        );

        let data = self.fetch_repository_data().await?;

        if data.commits.is_empty() {
            warn!("No commits found for repository: {}", self.repository);
        }
        if data.languages.is_empty() {
            warn!("No languages reported for repository: {}", self.repository);
        }

        let metrics = derive_metrics(data);
        let analysis = analyze(&metrics, clock);

        info!(
            "Health score {:.1}, {:?} maintenance risk",
            analysis.code_health_score, analysis.maintenance_risk
        );

        Ok(RepositoryReport {
            provider: "GitHub".to_string(),
            repository: self.repository.to_string(),
            collected_at: clock.now(),
            metrics,
            analysis,
        })
    }
}
