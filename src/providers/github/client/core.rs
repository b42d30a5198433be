use std::time::Duration;

use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use crate::auth::Token;
use crate::error::{RepoLensError, Result};
use crate::providers::github::url_utils::RepositoryRef;

const MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = "RepoLens/0.1.0";

pub struct GitHubClient {
    pub client: Client,
    pub api_url: Url,
    pub token: Option<Token>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDto {
    message: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<Token>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RepoLensError::Config(format!("Failed to create HTTP client: {e}")))?;

        Self::with_http_client(client, base_url, token)
    }

    /// Uses a caller-provided transport. The client must send a `User-Agent`, GitHub
    /// rejects requests without one.
    pub fn with_http_client(client: Client, base_url: &str, token: Option<Token>) -> Result<Self> {
        // Keep path prefixes such as GitHub Enterprise's `/api/v3` when joining.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let api_url = Url::parse(&normalized)
            .map_err(|e| RepoLensError::Config(format!("Invalid base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    pub fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// `{api}/repos/{owner}/{repo}{suffix}`
    pub fn repo_url(&self, repository: &RepositoryRef, suffix: &str) -> Result<Url> {
        self.api_url
            .join(&format!(
                "repos/{}/{}{suffix}",
                repository.owner, repository.repo
            ))
            .map_err(|e| RepoLensError::Config(format!("Invalid repository URL: {e}")))
    }

    pub fn get(&self, url: Url) -> RequestBuilder {
        self.auth_request(self.client.get(url).header(ACCEPT, MEDIA_TYPE))
    }

    /// Sends the request and turns any non-2xx status into an API error.
    pub async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{context}: {status} from {}", response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorDto>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        Err(RepoLensError::Api(format!("{context}: {status} - {message}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> RepositoryRef {
        RepositoryRef::new("octo", "demo").unwrap()
    }

    #[test]
    fn test_repo_url_on_public_api() {
        let client = GitHubClient::new("https://api.github.com", None, None).unwrap();

        assert_eq!(
            client.repo_url(&repository(), "").unwrap().as_str(),
            "https://api.github.com/repos/octo/demo"
        );
        assert_eq!(
            client.repo_url(&repository(), "/languages").unwrap().as_str(),
            "https://api.github.com/repos/octo/demo/languages"
        );
    }

    #[test]
    fn test_repo_url_keeps_enterprise_prefix() {
        let client = GitHubClient::new("https://github.example.com/api/v3", None, None).unwrap();

        assert_eq!(
            client.repo_url(&repository(), "/commits").unwrap().as_str(),
            "https://github.example.com/api/v3/repos/octo/demo/commits"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = GitHubClient::new("not a url", None, None);

        assert!(matches!(result, Err(RepoLensError::Config(_))));
    }

    #[tokio::test]
    async fn test_send_reports_status_and_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/demo")
            .with_status(401)
            .with_body(r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), Some(Token::from("bad")), None).unwrap();
        let url = client.repo_url(&repository(), "").unwrap();
        let err = client
            .send(client.get(url), "Repository metadata")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Bad credentials"));
    }

    #[tokio::test]
    async fn test_get_sends_token_and_media_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/demo")
            .match_header("authorization", "Bearer ghp_token")
            .match_header("accept", MEDIA_TYPE)
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), Some(Token::from("ghp_token")), None).unwrap();
        let url = client.repo_url(&repository(), "").unwrap();
        client.send(client.get(url), "Repository metadata").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_anonymous_requests_carry_no_authorization() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/demo")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None, None).unwrap();
        let url = client.repo_url(&repository(), "").unwrap();
        client.send(client.get(url), "Repository metadata").await.unwrap();

        mock.assert_async().await;
    }
}
