use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub provider: String,
    pub repository: String,
    pub collected_at: DateTime<Utc>,
    pub metrics: RepoMetrics,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoMetrics {
    pub repo_name: String,
    pub total_commits: usize,
    pub contributors: u64,
    pub issues_count: u64,
    pub pull_requests_count: u64,
    pub last_activity_date: DateTime<Utc>,
    /// Percentage of total bytes for the largest languages, largest first.
    pub languages: IndexMap<String, f64>,
    pub commit_frequency: f64,
    pub code_churn: u64,
}

impl RepoMetrics {
    /// Language with the largest byte share, if any language was reported.
    pub fn primary_language(&self) -> Option<&str> {
        self.languages.first().map(|(name, _)| name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceRisk {
    Low,
    Medium,
    High,
}

impl MaintenanceRisk {
    pub fn from_flag_count(flags: usize) -> Self {
        match flags {
            0..=1 => Self::Low,
            2..=3 => Self::Medium,
            _ => Self::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributorGrowth {
    #[serde(rename = "High Growth Potential")]
    HighGrowthPotential,
    #[serde(rename = "Moderate Growth Expected")]
    ModerateGrowthExpected,
    #[serde(rename = "Stable Community")]
    StableCommunity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedTrends {
    pub commit_trend: Trend,
    pub issue_resolution_rate: Trend,
    pub contributor_growth: ContributorGrowth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub code_health_score: f64,
    pub maintenance_risk: MaintenanceRisk,
    pub code_complexity_score: f64,
    pub recommendations: Vec<String>,
    pub predicted_trends: PredictedTrends,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_from_flag_count_boundaries() {
        assert_eq!(MaintenanceRisk::from_flag_count(0), MaintenanceRisk::Low);
        assert_eq!(MaintenanceRisk::from_flag_count(1), MaintenanceRisk::Low);
        assert_eq!(MaintenanceRisk::from_flag_count(2), MaintenanceRisk::Medium);
        assert_eq!(MaintenanceRisk::from_flag_count(3), MaintenanceRisk::Medium);
        assert_eq!(MaintenanceRisk::from_flag_count(4), MaintenanceRisk::High);
        assert_eq!(MaintenanceRisk::from_flag_count(5), MaintenanceRisk::High);
    }

    #[test]
    fn test_contributor_growth_serializes_as_label() {
        let json = serde_json::to_string(&ContributorGrowth::ModerateGrowthExpected).unwrap();

        assert_eq!(json, "\"Moderate Growth Expected\"");
    }

    #[test]
    fn test_primary_language_is_first_entry() {
        let mut languages = IndexMap::new();
        languages.insert("Rust".to_string(), 70.0);
        languages.insert("Shell".to_string(), 30.0);

        let metrics = RepoMetrics {
            repo_name: "octo/demo".to_string(),
            total_commits: 0,
            contributors: 0,
            issues_count: 0,
            pull_requests_count: 0,
            last_activity_date: Utc::now(),
            languages,
            commit_frequency: 0.0,
            code_churn: 0,
        };

        assert_eq!(metrics.primary_language(), Some("Rust"));
    }
}
