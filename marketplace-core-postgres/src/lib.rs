pub mod postgres_repositories;
pub mod repository;
pub mod stores;
pub mod utils;

pub use postgres_repositories::{MarketplaceRepositories, PostgresRepositories};
pub use stores::{PostgresPartyDirectory, PostgresReviewStore, PostgresServiceRequestStore};

#[cfg(test)]
pub mod test_helper;
