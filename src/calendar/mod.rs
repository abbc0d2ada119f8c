pub mod assembler;

use crate::errors::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

/// Upstream date format in the calendar files (e.g. "17/08/2026").
const DATE_FORMAT: &str = "%d/%m/%Y";

/// One row of a championship calendar: an upcoming fixture with scraped
/// average bookmaker odds and the model's outcome probabilities already
/// attached by the batch pipeline. Field names follow the upstream data
/// shape verbatim.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FixtureRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    /// Average decimal odds; 0 is the scraper's "no odds found" sentinel
    #[serde(rename = "Avg_H")]
    pub avg_h: f64,
    #[serde(rename = "Avg_D")]
    pub avg_d: f64,
    #[serde(rename = "Avg_A")]
    pub avg_a: f64,
    pub pred_home: f64,
    pub pred_draw: f64,
    pub pred_away: f64,
}

impl FixtureRecord {
    #[inline]
    pub fn probabilities(&self) -> [f64; 3] {
        [self.pred_home, self.pred_draw, self.pred_away]
    }

    #[inline]
    pub fn odds(&self) -> [f64; 3] {
        [self.avg_h, self.avg_d, self.avg_a]
    }

    /// Fixture date, if it parses. Calendars are scraped; a malformed
    /// date must not take the whole row down.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// In-memory calendars, one per configured championship. Loaded once at
/// startup from `<data_dir>/<championship>.json`, immutable afterwards.
#[derive(Debug, Default)]
pub struct CalendarStore {
    calendars: HashMap<String, Vec<FixtureRecord>>,
}

impl CalendarStore {
    pub fn load(data_dir: &Path, championships: &[String]) -> ServiceResult<Self> {
        let mut calendars = HashMap::with_capacity(championships.len());

        for name in championships {
            let path = data_dir.join(format!("{name}.json"));
            if !path.exists() {
                tracing::warn!(championship = %name, path = %path.display(), "calendar file missing");
                calendars.insert(name.clone(), Vec::new());
                continue;
            }

            let raw = std::fs::read_to_string(&path)
                .map_err(|e| ServiceError::Data(format!("read {}: {e}", path.display())))?;
            let records: Vec<FixtureRecord> = serde_json::from_str(&raw)
                .map_err(|e| ServiceError::Data(format!("parse {}: {e}", path.display())))?;

            tracing::info!(championship = %name, fixtures = records.len(), "calendar loaded");
            calendars.insert(name.clone(), records);
        }

        Ok(Self { calendars })
    }

    pub fn championships(&self) -> Vec<String> {
        let mut names: Vec<String> = self.calendars.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn calendar(&self, championship: &str) -> ServiceResult<&[FixtureRecord]> {
        self.calendars
            .get(championship)
            .map(Vec::as_slice)
            .ok_or_else(|| ServiceError::UnknownChampionship(championship.to_string()))
    }

    pub fn find_fixture(
        &self,
        championship: &str,
        home_team: &str,
        away_team: &str,
    ) -> ServiceResult<&FixtureRecord> {
        self.calendar(championship)?
            .iter()
            .find(|f| f.home_team == home_team && f.away_team == away_team)
            .ok_or_else(|| {
                ServiceError::UnknownFixture(format!("{home_team} vs {away_team} in {championship}"))
            })
    }
}

/// Filter a calendar to fixtures dated `today` or later. Rows whose date
/// does not parse are kept: never silently drop a fixture.
pub fn upcoming(records: &[FixtureRecord], today: NaiveDate) -> Vec<&FixtureRecord> {
    records
        .iter()
        .filter(|f| f.parsed_date().map(|d| d >= today).unwrap_or(true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(date: &str, home: &str, away: &str) -> FixtureRecord {
        FixtureRecord {
            date: date.to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            avg_h: 1.7,
            avg_d: 3.5,
            avg_a: 2.3,
            pred_home: 0.65,
            pred_draw: 0.25,
            pred_away: 0.1,
        }
    }

    fn store_with(name: &str, records: Vec<FixtureRecord>) -> CalendarStore {
        let mut calendars = HashMap::new();
        calendars.insert(name.to_string(), records);
        CalendarStore { calendars }
    }

    #[test]
    fn test_deserialize_upstream_field_names() {
        let record: FixtureRecord = serde_json::from_str(
            r#"{
                "Date": "17/08/2026",
                "HomeTeam": "Arsenal",
                "AwayTeam": "Chelsea",
                "Avg_H": 1.7, "Avg_D": 3.5, "Avg_A": 2.3,
                "pred_home": 0.65, "pred_draw": 0.25, "pred_away": 0.1
            }"#,
        )
        .unwrap();
        assert_eq!(record.probabilities(), [0.65, 0.25, 0.1]);
        assert_eq!(record.odds(), [1.7, 3.5, 2.3]);
        assert_eq!(
            record.parsed_date(),
            NaiveDate::from_ymd_opt(2026, 8, 17)
        );
    }

    #[test]
    fn test_find_fixture() {
        let store = store_with(
            "English Premier League",
            vec![fixture("17/08/2026", "Arsenal", "Chelsea")],
        );
        assert!(store
            .find_fixture("English Premier League", "Arsenal", "Chelsea")
            .is_ok());
        assert!(matches!(
            store.find_fixture("English Premier League", "Chelsea", "Arsenal"),
            Err(ServiceError::UnknownFixture(_))
        ));
        assert!(matches!(
            store.find_fixture("Serie A", "Milan", "Inter"),
            Err(ServiceError::UnknownChampionship(_))
        ));
    }

    #[test]
    fn test_upcoming_keeps_today_and_later() {
        let records = vec![
            fixture("16/08/2026", "A", "B"),
            fixture("17/08/2026", "C", "D"),
            fixture("18/08/2026", "E", "F"),
            fixture("not a date", "G", "H"),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
        let kept = upcoming(&records, today);
        let homes: Vec<&str> = kept.iter().map(|f| f.home_team.as_str()).collect();
        assert_eq!(homes, vec!["C", "E", "G"]);
    }

    #[test]
    fn test_championships_sorted() {
        let mut calendars = HashMap::new();
        calendars.insert("France Ligue 1".to_string(), Vec::new());
        calendars.insert("English Premier League".to_string(), Vec::new());
        let store = CalendarStore { calendars };
        assert_eq!(
            store.championships(),
            vec!["English Premier League", "France Ligue 1"]
        );
    }
}
