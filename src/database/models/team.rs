use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::player::Player;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub founded_year: i32,
    pub hq_address: Option<String>,
    pub hq_city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Team with its live roster, returned by the single-team endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithPlayers {
    #[serde(flatten)]
    pub team: Team,
    pub players: Vec<Player>,
}

/// Minimal team reference embedded in matches and reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: i64,
    pub name: String,
}

/// Writable team columns; used for inserts and full-row updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamFields {
    pub name: String,
    pub logo_url: Option<String>,
    pub founded_year: i32,
    pub hq_address: Option<String>,
    pub hq_city: Option<String>,
}

impl From<&Team> for TeamFields {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            logo_url: team.logo_url.clone(),
            founded_year: team.founded_year,
            hq_address: team.hq_address.clone(),
            hq_city: team.hq_city.clone(),
        }
    }
}
