use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use repolens::auth::Token;
use repolens::clock::SystemClock;
use repolens::providers::github::{GitHubClient, GitHubProvider, RepositoryRef};

#[derive(Parser)]
#[command(name = "repolens")]
#[command(author, version, about = "Repository Insights Tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a GitHub repository
    Github {
        /// Repository as "owner/repo" or a GitHub URL
        #[arg(short, long)]
        repo: RepositoryRef,

        /// GitHub API token (optional, raises rate limits and reaches private repositories)
        #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitHub API base URL
        #[arg(short, long, default_value = "https://api.github.com")]
        url: String,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Github {
                repo,
                token,
                url,
                timeout,
            } => {
                info!("Collecting GitHub insights for repository: {repo}");

                let token = Token::from_optional(token.as_deref());
                let client = GitHubClient::new(url, token, Some(Duration::from_secs(*timeout)))?;
                let provider = GitHubProvider::new(client, repo.clone());
                let report = provider.collect_insights(&SystemClock).await?;

                let json_output = if self.pretty {
                    serde_json::to_string_pretty(&report)?
                } else {
                    serde_json::to_string(&report)?
                };

                if let Some(output_path) = &self.output {
                    std::fs::write(output_path, json_output)?;
                    info!("Insights written to: {}", output_path.display());
                } else {
                    println!("{json_output}");
                }

                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_repository_url_and_defaults() {
        let cli = Cli::try_parse_from([
            "repolens",
            "github",
            "--repo",
            "https://github.com/octo/demo",
            "--token",
            "ghp_x",
        ])
        .unwrap();

        let Commands::Github {
            repo,
            token,
            url,
            timeout,
        } = cli.command;
        assert_eq!(repo, RepositoryRef::new("octo", "demo").unwrap());
        assert_eq!(token.as_deref(), Some("ghp_x"));
        assert_eq!(url, "https://api.github.com");
        assert_eq!(timeout, 30);
        assert!(!cli.pretty);
    }

    #[test]
    fn test_rejects_invalid_repository() {
        let result = Cli::try_parse_from(["repolens", "github", "--repo", "not-a-repo"]);

        assert!(result.is_err());
    }
}
