pub mod manager;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{MatchRepository, PlayerRepository, TeamRepository, UserRepository};
pub use store::MatchStore;
