use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub position: String,
    pub jersey_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Writable player columns; `team_id` is fixed at creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFields {
    pub name: String,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub position: String,
    pub jersey_number: i32,
}

impl From<&Player> for PlayerFields {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            height_cm: player.height_cm,
            weight_kg: player.weight_kg,
            position: player.position.clone(),
            jersey_number: player.jersey_number,
        }
    }
}
