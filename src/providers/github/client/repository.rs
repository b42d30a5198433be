use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use reqwest::header::LINK;
use serde::Deserialize;

use super::core::GitHubClient;
use crate::error::Result;
use crate::providers::github::pagination::last_page;
use crate::providers::github::types::RepositoryInfo;
use crate::providers::github::url_utils::RepositoryRef;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct RepositoryDto {
    full_name: String,
    open_issues_count: u64,
    updated_at: DateTime<Utc>,
}

impl From<RepositoryDto> for RepositoryInfo {
    fn from(dto: RepositoryDto) -> Self {
        Self {
            full_name: dto.full_name,
            open_issues_count: dto.open_issues_count,
            updated_at: dto.updated_at,
        }
    }
}

impl GitHubClient {
    /// Fetch repository metadata
    pub async fn fetch_repository_info(&self, repository: &RepositoryRef) -> Result<RepositoryInfo> {
        let url = self.repo_url(repository, "")?;
        let response = self.send(self.get(url), "Repository metadata").await?;
        let dto = response.json::<RepositoryDto>().await?;
        Ok(dto.into())
    }

    /// Fetch bytes of code per language, preserving the order GitHub returns
    pub async fn fetch_languages(&self, repository: &RepositoryRef) -> Result<IndexMap<String, u64>> {
        let url = self.repo_url(repository, "/languages")?;
        let response = self.send(self.get(url), "Languages").await?;
        let languages = response.json::<IndexMap<String, u64>>().await?;
        Ok(languages)
    }

    /// Number of contributors, read from the pagination links of a one-item page
    pub async fn fetch_contributor_total(&self, repository: &RepositoryRef) -> Result<u64> {
        let url = self.repo_url(repository, "/contributors")?;
        let request = self.get(url).query(&[("per_page", "1")]);
        self.fetch_page_total(request, "Contributors").await
    }

    /// Number of pull requests in any state, read the same way as contributors
    pub async fn fetch_pull_request_total(&self, repository: &RepositoryRef) -> Result<u64> {
        let url = self.repo_url(repository, "/pulls")?;
        let request = self
            .get(url)
            .query(&[("state", "all"), ("per_page", "1")]);
        self.fetch_page_total(request, "Pull requests").await
    }

    async fn fetch_page_total(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<u64> {
        let response = self.send(request, context).await?;
        let link = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok());

        Ok(last_page(link))
    }
}
