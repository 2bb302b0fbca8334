use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::{Checker, FieldErrors, Validate};
use crate::database::models::MatchFields;

fn parse_date(check: &mut Checker, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            check.fail("match_date", "must be a date in YYYY-MM-DD format");
            None
        }
    }
}

/// Accepts `HH:MM:SS` and the shorter `HH:MM`
fn parse_time(check: &mut Checker, raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    match NaiveTime::parse_from_str(raw, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M")) {
        Ok(time) => Some(time),
        Err(_) => {
            check.fail("match_time", "must be a time in HH:MM:SS format");
            None
        }
    }
}

fn check_team_id(check: &mut Checker, field: &str, id: Option<i64>) -> Option<i64> {
    id.filter(|id| check.at_least(field, *id, 1))
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub match_date: Option<String>,
    pub match_time: Option<String>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
}

impl Validate for CreateMatchRequest {
    type Output = MatchFields;

    fn validate(self) -> Result<MatchFields, FieldErrors> {
        let mut check = Checker::default();
        let match_date = check
            .require("match_date", self.match_date)
            .and_then(|raw| parse_date(&mut check, &raw));
        let match_time = check
            .require("match_time", self.match_time)
            .and_then(|raw| parse_time(&mut check, &raw));
        let home = check.require("home_team_id", self.home_team_id);
        let home_team_id = check_team_id(&mut check, "home_team_id", home);
        let away = check.require("away_team_id", self.away_team_id);
        let away_team_id = check_team_id(&mut check, "away_team_id", away);

        check.finish(|| {
            Some(MatchFields {
                match_date: match_date?,
                match_time: match_time?,
                home_team_id: home_team_id?,
                away_team_id: away_team_id?,
            })
        })
    }
}

/// Schedule-only update; scores are not accepted here
#[derive(Debug, Deserialize)]
pub struct UpdateMatchRequest {
    pub match_date: Option<String>,
    pub match_time: Option<String>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchPatch {
    pub match_date: Option<NaiveDate>,
    pub match_time: Option<NaiveTime>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
}

impl MatchPatch {
    pub fn apply(self, fields: &mut MatchFields) {
        if let Some(date) = self.match_date {
            fields.match_date = date;
        }
        if let Some(time) = self.match_time {
            fields.match_time = time;
        }
        if let Some(home) = self.home_team_id {
            fields.home_team_id = home;
        }
        if let Some(away) = self.away_team_id {
            fields.away_team_id = away;
        }
    }
}

impl Validate for UpdateMatchRequest {
    type Output = MatchPatch;

    fn validate(self) -> Result<MatchPatch, FieldErrors> {
        let mut check = Checker::default();
        let match_date = self.match_date.and_then(|raw| parse_date(&mut check, &raw));
        let match_time = self.match_time.and_then(|raw| parse_time(&mut check, &raw));
        let home_team_id = check_team_id(&mut check, "home_team_id", self.home_team_id);
        let away_team_id = check_team_id(&mut check, "away_team_id", self.away_team_id);

        check.finish(|| {
            Some(MatchPatch { match_date, match_time, home_team_id, away_team_id })
        })
    }
}
