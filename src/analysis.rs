//! Heuristic health, risk and trend analysis over derived repository metrics.
//!
//! Every score here is a fixed weighted formula over [`RepoMetrics`]; the only input that is
//! not part of the metrics is the clock used to measure inactivity.

use crate::clock::Clock;
use crate::insights::{
    Analysis, ContributorGrowth, MaintenanceRisk, PredictedTrends, RepoMetrics, Trend,
};

const COMMIT_FREQUENCY_WEIGHT: f64 = 0.25;
const CONTRIBUTOR_WEIGHT: f64 = 0.20;
const ISSUE_RESOLUTION_WEIGHT: f64 = 0.15;
const CHURN_WEIGHT: f64 = 0.20;
const PULL_REQUEST_WEIGHT: f64 = 0.20;

const MAX_COMMIT_FREQUENCY: f64 = 10.0;
const MIN_CONTRIBUTORS: f64 = 1.0;
const MAX_CONTRIBUTORS: f64 = 100.0;
const MAX_CHURN: f64 = 1_000_000.0;
const MAX_PULL_REQUESTS: f64 = 1000.0;

const HIGH_CHURN: u64 = 500_000;
const LOW_COMMIT_FREQUENCY: f64 = 0.5;
const HIGH_ISSUE_RATIO: f64 = 0.1;
const SMALL_TEAM: u64 = 10;
const INACTIVE_DAYS: f64 = 30.0;

const COMMIT_TREND_THRESHOLD: f64 = 1.0;
const ISSUE_RESOLUTION_THRESHOLD: f64 = 0.7;

pub fn analyze(metrics: &RepoMetrics, clock: &impl Clock) -> Analysis {
    Analysis {
        code_health_score: calculate_health_score(metrics),
        maintenance_risk: assess_maintenance_risk(metrics, clock),
        code_complexity_score: calculate_complexity_score(metrics),
        recommendations: generate_recommendations(metrics),
        predicted_trends: predict_trends(metrics),
    }
}

/// Linear position of `value` inside `[min, max]`, clamped to `[0, 1]`.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

#[allow(clippy::cast_precision_loss)]
fn calculate_health_score(metrics: &RepoMetrics) -> f64 {
    let issue_resolution = if metrics.issues_count > 0 {
        (metrics.pull_requests_count as f64 / metrics.issues_count as f64).min(1.0)
    } else {
        1.0
    };

    let commit_frequency = normalize(metrics.commit_frequency, 0.0, MAX_COMMIT_FREQUENCY);
    let contributors = normalize(
        metrics.contributors as f64,
        MIN_CONTRIBUTORS,
        MAX_CONTRIBUTORS,
    );
    let churn = 1.0 - normalize(metrics.code_churn as f64, 0.0, MAX_CHURN);
    let pull_requests = normalize(metrics.pull_requests_count as f64, 0.0, MAX_PULL_REQUESTS);

    let weighted = commit_frequency * COMMIT_FREQUENCY_WEIGHT
        + contributors * CONTRIBUTOR_WEIGHT
        + issue_resolution * ISSUE_RESOLUTION_WEIGHT
        + churn * CHURN_WEIGHT
        + pull_requests * PULL_REQUEST_WEIGHT;

    (weighted * 100.0).clamp(0.0, 100.0)
}

#[allow(clippy::cast_precision_loss)]
fn risk_flags(metrics: &RepoMetrics, clock: &impl Clock) -> [bool; 5] {
    let issue_ratio = metrics.issues_count as f64 / metrics.total_commits.max(1) as f64;
    let idle_days = (clock.now() - metrics.last_activity_date).num_seconds() as f64 / 86_400.0;

    [
        metrics.code_churn > HIGH_CHURN,
        metrics.commit_frequency < LOW_COMMIT_FREQUENCY,
        issue_ratio > HIGH_ISSUE_RATIO,
        metrics.contributors < SMALL_TEAM,
        idle_days > INACTIVE_DAYS,
    ]
}

fn assess_maintenance_risk(metrics: &RepoMetrics, clock: &impl Clock) -> MaintenanceRisk {
    let raised = risk_flags(metrics, clock)
        .into_iter()
        .filter(|&flag| flag)
        .count();

    MaintenanceRisk::from_flag_count(raised)
}

fn generate_recommendations(metrics: &RepoMetrics) -> Vec<String> {
    let checks = [
        (
            metrics.commit_frequency < 1.0,
            "Increase commit frequency to improve code velocity",
        ),
        (
            metrics.contributors < SMALL_TEAM,
            "Consider expanding contributor base to enhance project sustainability",
        ),
        (
            metrics.code_churn > HIGH_CHURN,
            "High code churn detected - consider code stabilization sprint",
        ),
        (
            metrics.issues_count > metrics.pull_requests_count.saturating_mul(2),
            "Issue resolution rate needs improvement - consider dedicating more resources",
        ),
    ];

    let mut recommendations: Vec<String> = checks
        .into_iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, text)| text.to_string())
        .collect();

    recommendations.push(match metrics.primary_language() {
        Some(language) => format!("Leverage {language}'s best practices for optimal performance"),
        None => "Identify the project's primary language and adopt its best practices for optimal performance".to_string(),
    });

    recommendations
}

fn classify_trend(value: f64, threshold: f64) -> Trend {
    if value > threshold {
        Trend::Increasing
    } else if value < threshold * 0.5 {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn predict_contributor_growth(contributors: u64) -> ContributorGrowth {
    match contributors {
        0..=9 => ContributorGrowth::HighGrowthPotential,
        10..=49 => ContributorGrowth::ModerateGrowthExpected,
        _ => ContributorGrowth::StableCommunity,
    }
}

#[allow(clippy::cast_precision_loss)]
fn predict_trends(metrics: &RepoMetrics) -> PredictedTrends {
    let resolution_ratio =
        metrics.pull_requests_count as f64 / metrics.issues_count.max(1) as f64;

    PredictedTrends {
        commit_trend: classify_trend(metrics.commit_frequency, COMMIT_TREND_THRESHOLD),
        issue_resolution_rate: classify_trend(resolution_ratio, ISSUE_RESOLUTION_THRESHOLD),
        contributor_growth: predict_contributor_growth(metrics.contributors),
    }
}

#[allow(clippy::cast_precision_loss)]
fn calculate_complexity_score(metrics: &RepoMetrics) -> f64 {
    let churn = normalize(metrics.code_churn as f64, 0.0, MAX_CHURN) * 50.0;
    let languages = metrics.languages.len() as f64 * 10.0;
    let contributors = normalize(
        metrics.contributors as f64,
        MIN_CONTRIBUTORS,
        MAX_CONTRIBUTORS,
    ) * 20.0;

    (churn + languages + contributors).min(100.0)
}
