//! Risk-adjusted Kelly criterion bet sizing.
//!
//! For each candidate outcome i of a fixture (home / draw / away):
//!
//!     b_i = odds_i - 1          (net payout per unit staked)
//!     q_i = 1 - p_i             (loss probability)
//!     k_i = (b_i * p_i - q_i) / b_i
//!
//! The recommended fraction is max(k_i) over all outcomes -- the single
//! outcome with the best individual Kelly fraction, not a portfolio
//! allocation -- scaled by the user's risk-aversion multiplier.
//!
//! The fraction is deliberately left unclamped: values above 1.0 and
//! negative values pass through unchanged (negative means "do not bet").
//! Callers render those cases; this module never hides them.
//!
//! All functions here are pure: no state, no I/O, no logging.

use crate::advice::RiskAversion;
use crate::errors::{AdviceError, AdviceResult};
use smallvec::SmallVec;

/// Tolerance on sum(probabilities) == 1. Upstream predictions arrive
/// rounded to 2 decimal places, so three outcomes can drift by ~0.015.
const PROB_SUM_TOLERANCE: f64 = 0.05;

/// Validate a probability/odds pair, shared by both entry points.
fn validate(probabilities: &[f64], odds: &[f64]) -> AdviceResult<()> {
    if probabilities.is_empty() || probabilities.len() != odds.len() {
        return Err(AdviceError::InvalidInput(format!(
            "probabilities ({}) and odds ({}) must be non-empty and equal length",
            probabilities.len(),
            odds.len()
        )));
    }

    let mut sum = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        if !(0.0..=1.0).contains(&p) {
            return Err(AdviceError::InvalidInput(format!(
                "probability {p} at index {i} is outside [0, 1]"
            )));
        }
        sum += p;
    }
    if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
        return Err(AdviceError::InvalidInput(format!(
            "probabilities sum to {sum}, expected ~1"
        )));
    }

    for (i, &odd) in odds.iter().enumerate() {
        // A scraping failure is encoded upstream as a 0 sentinel; it lands
        // here along with any other payout multiple below evens.
        if !odd.is_finite() || odd < 1.0 {
            return Err(AdviceError::DegenerateOdds(format!(
                "odd {odd} at index {i} is not a valid payout multiple"
            )));
        }
        if odd == 1.0 {
            return Err(AdviceError::DegenerateOdds(format!(
                "odd at index {i} is exactly 1.0 (zero net payout)"
            )));
        }
    }

    Ok(())
}

/// Compute the risk-adjusted optimal fraction of bankroll to stake.
///
/// Returns a signed fraction: negative means every outcome has negative
/// expectation (the least-negative one is still reported), and values
/// above 1.0 are possible. No clamping is applied.
pub fn compute_optimal_fraction(
    probabilities: &[f64],
    odds: &[f64],
    risk: RiskAversion,
) -> AdviceResult<f64> {
    validate(probabilities, odds)?;

    let mut fractions: SmallVec<[f64; 4]> = SmallVec::with_capacity(probabilities.len());
    for (&p, &odd) in probabilities.iter().zip(odds.iter()) {
        let b = odd - 1.0;
        let q = 1.0 - p;
        fractions.push((b * p - q) / b);
    }

    // max over outcomes; lengths are validated so the iterator is non-empty
    let raw = fractions
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let fraction = raw * risk.multiplier();
    if !fraction.is_finite() {
        return Err(AdviceError::NumericAnomaly(format!(
            "computed fraction {fraction} is not finite"
        )));
    }

    Ok(fraction)
}

/// Compute the recommended stake for a user: `fraction * bankroll`,
/// rounded to 2 decimal places (half away from zero, currency style).
///
/// A negative or zero stake is meaningful ("do not bet") and is returned
/// as-is, never suppressed.
pub fn generate_bet_advice(
    probabilities: &[f64],
    bankroll: f64,
    risk: RiskAversion,
    odds: &[f64],
) -> AdviceResult<f64> {
    if !bankroll.is_finite() || bankroll < 0.0 {
        return Err(AdviceError::InvalidInput(format!(
            "bankroll {bankroll} must be finite and >= 0"
        )));
    }

    let fraction = compute_optimal_fraction(probabilities, odds, risk)?;
    let stake = round_currency(fraction * bankroll);
    if !stake.is_finite() {
        return Err(AdviceError::NumericAnomaly(format!(
            "computed stake {stake} is not finite"
        )));
    }

    Ok(stake)
}

/// Round to 2 decimal places, half away from zero (f64::round on cents).
#[inline]
fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
