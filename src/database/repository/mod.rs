pub mod matches;
pub mod player;
pub mod team;
pub mod user;

pub use matches::MatchRepository;
pub use player::PlayerRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
