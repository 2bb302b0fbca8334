use chrono::Datelike;
use serde::Deserialize;

use super::{optional_text, Checker, FieldErrors, Validate};
use crate::database::models::TeamFields;

const EARLIEST_FOUNDED_YEAR: i32 = 1800;

fn latest_founded_year() -> i32 {
    chrono::Utc::now().year() + 1
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub founded_year: Option<i32>,
    pub hq_address: Option<String>,
    pub hq_city: Option<String>,
}

impl Validate for CreateTeamRequest {
    type Output = TeamFields;

    fn validate(self) -> Result<TeamFields, FieldErrors> {
        let mut check = Checker::default();
        let name = check.text("name", self.name);
        let founded_year = check
            .require("founded_year", self.founded_year)
            .filter(|y| check.range("founded_year", *y, EARLIEST_FOUNDED_YEAR, latest_founded_year()));

        check.finish(|| {
            Some(TeamFields {
                name: name?,
                logo_url: optional_text(self.logo_url),
                founded_year: founded_year?,
                hq_address: optional_text(self.hq_address),
                hq_city: optional_text(self.hq_city),
            })
        })
    }
}

/// Partial update: absent fields keep their stored value, blank optional text clears it
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub founded_year: Option<i32>,
    pub hq_address: Option<String>,
    pub hq_city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub founded_year: Option<i32>,
    pub hq_address: Option<String>,
    pub hq_city: Option<String>,
}

impl TeamPatch {
    pub fn apply(self, fields: &mut TeamFields) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(year) = self.founded_year {
            fields.founded_year = year;
        }
        if let Some(value) = self.logo_url {
            fields.logo_url = optional_text(Some(value));
        }
        if let Some(value) = self.hq_address {
            fields.hq_address = optional_text(Some(value));
        }
        if let Some(value) = self.hq_city {
            fields.hq_city = optional_text(Some(value));
        }
    }
}

impl Validate for UpdateTeamRequest {
    type Output = TeamPatch;

    fn validate(self) -> Result<TeamPatch, FieldErrors> {
        let mut check = Checker::default();
        let name = match self.name {
            Some(name) => check.text("name", Some(name)),
            None => None,
        };
        if let Some(year) = self.founded_year {
            check.range("founded_year", year, EARLIEST_FOUNDED_YEAR, latest_founded_year());
        }

        check.finish(|| {
            Some(TeamPatch {
                name,
                logo_url: self.logo_url,
                founded_year: self.founded_year,
                hq_address: self.hq_address,
                hq_city: self.hq_city,
            })
        })
    }
}
