pub mod models;
pub mod repository;
pub mod service;

mod errors;

pub use errors::StatsError;
pub use models::PlayerStats;
pub use repository::{InMemoryStatsRepository, StatsRepository};
pub use service::StatsService;
