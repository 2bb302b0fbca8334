use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Checker, FieldErrors, Validate};
use crate::database::models::PlayerFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Forward => "forward",
            Position::Midfielder => "midfielder",
            Position::Defender => "defender",
            Position::Goalkeeper => "goalkeeper",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Position::Forward),
            "midfielder" => Ok(Position::Midfielder),
            "defender" => Ok(Position::Defender),
            "goalkeeper" => Ok(Position::Goalkeeper),
            _ => Err("must be one of forward, midfielder, defender, goalkeeper".to_string()),
        }
    }
}

fn check_position(check: &mut Checker, raw: String) -> Option<Position> {
    match raw.parse::<Position>() {
        Ok(position) => Some(position),
        Err(message) => {
            check.fail("position", message);
            None
        }
    }
}

fn check_body_metrics(check: &mut Checker, height_cm: Option<i32>, weight_kg: Option<i32>) {
    if let Some(height) = height_cm {
        check.at_least("height_cm", height, 1);
    }
    if let Some(weight) = weight_kg {
        check.at_least("weight_kg", weight, 1);
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub position: Option<String>,
    pub jersey_number: Option<i32>,
}

impl Validate for CreatePlayerRequest {
    type Output = PlayerFields;

    fn validate(self) -> Result<PlayerFields, FieldErrors> {
        let mut check = Checker::default();
        let name = check.text("name", self.name);
        let position = check
            .require("position", self.position)
            .and_then(|raw| check_position(&mut check, raw));
        let jersey_number = check
            .require("jersey_number", self.jersey_number)
            .filter(|n| check.range("jersey_number", *n, 1, 99));
        check_body_metrics(&mut check, self.height_cm, self.weight_kg);

        check.finish(|| {
            Some(PlayerFields {
                name: name?,
                height_cm: self.height_cm,
                weight_kg: self.weight_kg,
                position: position?.as_str().to_string(),
                jersey_number: jersey_number?,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub position: Option<String>,
    pub jersey_number: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub position: Option<Position>,
    pub jersey_number: Option<i32>,
}

impl PlayerPatch {
    pub fn apply(self, fields: &mut PlayerFields) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if self.height_cm.is_some() {
            fields.height_cm = self.height_cm;
        }
        if self.weight_kg.is_some() {
            fields.weight_kg = self.weight_kg;
        }
        if let Some(position) = self.position {
            fields.position = position.as_str().to_string();
        }
        if let Some(jersey) = self.jersey_number {
            fields.jersey_number = jersey;
        }
    }
}

impl Validate for UpdatePlayerRequest {
    type Output = PlayerPatch;

    fn validate(self) -> Result<PlayerPatch, FieldErrors> {
        let mut check = Checker::default();
        let name = self.name.and_then(|n| check.text("name", Some(n)));
        let position = self.position.and_then(|raw| check_position(&mut check, raw));
        if let Some(n) = self.jersey_number {
            check.range("jersey_number", n, 1, 99);
        }
        check_body_metrics(&mut check, self.height_cm, self.weight_kg);

        check.finish(|| {
            Some(PlayerPatch {
                name,
                height_cm: self.height_cm,
                weight_kg: self.weight_kg,
                position,
                jersey_number: self.jersey_number,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> Result<PlayerFields, FieldErrors> {
        serde_json::from_value::<CreatePlayerRequest>(body).unwrap().validate()
    }

    #[test]
    fn valid_player_normalizes_position() {
        let fields = create(json!({
            "name": "Marc Klok",
            "position": "Midfielder",
            "jersey_number": 23,
            "height_cm": 178
        }))
        .unwrap();
        assert_eq!(fields.position, "midfielder");
        assert_eq!(fields.jersey_number, 23);
        assert_eq!(fields.weight_kg, None);
    }

    #[test]
    fn unknown_position_and_jersey_range_are_reported_together() {
        let errors = create(json!({ "name": "X", "position": "striker", "jersey_number": 100 })).unwrap_err();
        assert!(errors["position"].contains("goalkeeper"));
        assert_eq!(errors["jersey_number"], "must be between 1 and 99");
    }

    #[test]
    fn missing_required_fields() {
        let errors = create(json!({ "height_cm": 180 })).unwrap_err();
        for field in ["name", "position", "jersey_number"] {
            assert_eq!(errors[field], "is required", "{field}");
        }
    }

    #[test]
    fn non_positive_metrics_are_rejected() {
        let errors = create(json!({
            "name": "Y", "position": "defender", "jersey_number": 4, "weight_kg": 0
        }))
        .unwrap_err();
        assert!(errors.contains_key("weight_kg"));
    }

    #[test]
    fn patch_keeps_untouched_fields() {
        let patch = serde_json::from_value::<UpdatePlayerRequest>(json!({ "jersey_number": 7 }))
            .unwrap()
            .validate()
            .unwrap();
        let mut fields = PlayerFields {
            name: "Rizky".to_string(),
            height_cm: Some(170),
            weight_kg: Some(65),
            position: "forward".to_string(),
            jersey_number: 9,
        };
        patch.apply(&mut fields);
        assert_eq!(fields.jersey_number, 7);
        assert_eq!(fields.position, "forward");
        assert_eq!(fields.height_cm, Some(170));
    }

    #[test]
    fn position_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Position::Goalkeeper).unwrap(), "goalkeeper");
    }
}
