//! Calendar/Prediction Assembler.
//!
//! Walks a championship calendar and attaches the engine's stake
//! recommendation to every fixture under `bet_advise`. One fixture's
//! failure never aborts the batch and never drops the row: it becomes a
//! visible "unavailable" marker instead.

use crate::advice::kelly;
use crate::calendar::FixtureRecord;
use crate::profile::Profile;

/// Advice attached to a fixture. Serializes either as a bare stake
/// number or as an explicit error marker -- never as a wrong number.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum BetAdvice {
    Stake(f64),
    Unavailable { unavailable: String },
}

/// A calendar row plus its advice, as returned to the caller.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdvisedFixture {
    #[serde(flatten)]
    pub fixture: FixtureRecord,
    pub bet_advise: BetAdvice,
}

/// Compute advice for one fixture against one profile.
pub fn advise_fixture(fixture: &FixtureRecord, profile: &Profile) -> BetAdvice {
    match kelly::generate_bet_advice(
        &fixture.probabilities(),
        profile.bankroll,
        profile.risk,
        &fixture.odds(),
    ) {
        Ok(stake) => BetAdvice::Stake(stake),
        Err(e) => {
            tracing::warn!(
                home = %fixture.home_team,
                away = %fixture.away_team,
                error = %e,
                "advice unavailable for fixture"
            );
            BetAdvice::Unavailable {
                unavailable: e.to_string(),
            }
        }
    }
}

/// Attach advice to every fixture in a calendar.
pub fn advise_calendar(records: &[FixtureRecord], profile: &Profile) -> Vec<AdvisedFixture> {
    records
        .iter()
        .map(|fixture| AdvisedFixture {
            fixture: fixture.clone(),
            bet_advise: advise_fixture(fixture, profile),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::RiskAversion;

    fn profile() -> Profile {
        Profile {
            username: "alice".into(),
            bankroll: 250.0,
            risk: RiskAversion::Medium,
        }
    }

    fn fixture(avg_h: f64) -> FixtureRecord {
        FixtureRecord {
            date: "17/08/2026".into(),
            home_team: "Arsenal".into(),
            away_team: "Chelsea".into(),
            avg_h,
            avg_d: 3.5,
            avg_a: 2.3,
            pred_home: 0.65,
            pred_draw: 0.25,
            pred_away: 0.1,
        }
    }

    #[test]
    fn test_advise_fixture_regression() {
        let advice = advise_fixture(&fixture(1.7), &profile());
        assert_eq!(advice, BetAdvice::Stake(37.5));
    }

    #[test]
    fn test_one_bad_fixture_does_not_abort_batch() {
        // Middle fixture carries the scraper's 0 sentinel
        let records = vec![fixture(1.7), fixture(0.0), fixture(1.7)];
        let advised = advise_calendar(&records, &profile());

        assert_eq!(advised.len(), 3, "no row may be dropped");
        assert_eq!(advised[0].bet_advise, BetAdvice::Stake(37.5));
        assert!(matches!(advised[1].bet_advise, BetAdvice::Unavailable { .. }));
        assert_eq!(advised[2].bet_advise, BetAdvice::Stake(37.5));
    }

    #[test]
    fn test_serialization_shape() {
        let advised = advise_calendar(&[fixture(1.7), fixture(0.0)], &profile());
        let json = serde_json::to_value(&advised).unwrap();

        // Stake serializes as a bare number under bet_advise
        assert_eq!(json[0]["bet_advise"], serde_json::json!(37.5));
        assert_eq!(json[0]["HomeTeam"], serde_json::json!("Arsenal"));
        // Failure serializes as a visible marker, not a number
        assert!(json[1]["bet_advise"]["unavailable"].is_string());
    }

    #[test]
    fn test_negative_stake_surfaces_as_is() {
        let mut record = fixture(1.2);
        record.avg_d = 1.1;
        record.avg_a = 1.1;
        let advice = advise_fixture(&record, &profile());
        match advice {
            BetAdvice::Stake(stake) => assert!(stake < 0.0, "stake = {stake}"),
            other => panic!("expected negative stake, got {other:?}"),
        }
    }
}
