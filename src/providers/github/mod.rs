pub mod client;
pub mod core;
pub mod metrics;
pub mod pagination;
pub mod types;
pub mod url_utils;

pub use self::client::GitHubClient;
pub use self::core::GitHubProvider;
pub use self::url_utils::RepositoryRef;
