mod commits;
mod core;
mod repository;

pub use self::commits::COMMIT_PAGE_SIZE;
pub use self::core::GitHubClient;
