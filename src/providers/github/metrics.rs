use indexmap::IndexMap;

use super::types::{CommitRecord, RepositoryData};
use crate::insights::RepoMetrics;

/// Number of languages kept in the distribution.
pub const TOP_LANGUAGES: usize = 8;

const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn derive_metrics(data: RepositoryData) -> RepoMetrics {
    RepoMetrics {
        commit_frequency: calculate_commit_frequency(&data.commits),
        code_churn: calculate_code_churn(&data.commits),
        languages: calculate_language_shares(&data.languages),
        total_commits: data.commits.len(),
        contributors: data.contributor_total,
        issues_count: data.info.open_issues_count,
        pull_requests_count: data.pull_request_total,
        last_activity_date: data.info.updated_at,
        repo_name: data.info.full_name,
    }
}

/// Commits per day between the oldest and newest commit, with the span floored at one day.
fn calculate_commit_frequency(commits: &[CommitRecord]) -> f64 {
    if commits.len() < 2 {
        return 0.0;
    }

    let dates = commits.iter().map(|c| c.authored_at);
    let (Some(newest), Some(oldest)) = (dates.clone().max(), dates.min()) else {
        return 0.0;
    };

    #[allow(clippy::cast_precision_loss)]
    let span_days = (newest - oldest).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;

    #[allow(clippy::cast_precision_loss)]
    let frequency = commits.len() as f64 / span_days.max(1.0);
    frequency
}

fn calculate_code_churn(commits: &[CommitRecord]) -> u64 {
    commits
        .iter()
        .filter_map(|c| c.stats)
        .map(|s| s.additions + s.deletions)
        .sum()
}

/// Percentage of total bytes per language for the largest languages, largest first.
///
/// The sort is stable, so languages with equal shares keep the order of `languages`.
fn calculate_language_shares(languages: &IndexMap<String, u64>) -> IndexMap<String, f64> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return IndexMap::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let mut shares: Vec<(&String, f64)> = languages
        .iter()
        .map(|(name, &bytes)| (name, (bytes as f64 / total as f64) * 100.0))
        .collect();

    shares.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    shares
        .into_iter()
        .take(TOP_LANGUAGES)
        .map(|(name, share)| (name.clone(), share))
        .collect()
}
