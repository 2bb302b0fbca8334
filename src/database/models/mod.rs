pub mod goal;
pub mod matches;
pub mod player;
pub mod team;
pub mod user;

pub use goal::{GoalDetail, NewGoal};
pub use matches::{MatchDetail, MatchFields, MatchRow, MatchSummary};
pub use player::{Player, PlayerFields};
pub use team::{Team, TeamFields, TeamRef, TeamWithPlayers};
pub use user::User;
