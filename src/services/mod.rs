pub mod auth;
pub mod error;
pub mod matches;
pub mod player;
pub mod report;
pub mod result_engine;
pub mod team;

pub use auth::{AuthService, TokenResponse};
pub use error::{ServiceError, ServiceResult};
pub use matches::MatchService;
pub use player::PlayerService;
pub use report::{MatchReport, MatchStatus, ReportBuilder};
pub use result_engine::{ResultEngine, ResultReport};
pub use team::TeamService;
