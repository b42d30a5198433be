pub mod analysis;
pub mod auth;
pub mod clock;
pub mod error;
pub mod insights;
pub mod providers;

pub use analysis::analyze;
pub use error::{RepoLensError, Result};
pub use insights::{Analysis, RepoMetrics, RepositoryReport};
pub use providers::github::metrics::derive_metrics;
