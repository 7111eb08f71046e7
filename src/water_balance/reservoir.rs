//! Monthly soil-reservoir (RFU) balance.
//!
//! - `step()`: one month → (ReservoirState, Fluxes)
//! - `simulate()`: a station-year, starting from a full reservoir

use crate::utils::round_to;

/// Water held in the reservoir, mm. Always within `[0, capacity]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservoirState {
    pub level: f64,
}

impl ReservoirState {
    pub fn full(capacity: f64) -> Self {
        Self { level: capacity }
    }
}

/// Unrounded water movements of one month, mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fluxes {
    /// Actual evapotranspiration (ETR).
    pub actual_et: f64,
    /// Surplus taken up by the reservoir.
    pub absorbed: f64,
    /// Surplus neither evaporated nor stored (PE).
    pub effective_rainfall: f64,
}

/// Balances one month of `rainfall` against `etp` (corrected PET).
///
/// With a surplus, ETR meets the full demand and the reservoir absorbs what it can of the
/// excess; the rest is effective rainfall. With a deficit, ETR is limited to the rainfall
/// and the unmet demand is drawn from the reservoir, which cannot go below zero.
pub fn step(
    state: ReservoirState,
    capacity: f64,
    rainfall: f64,
    etp: f64,
) -> (ReservoirState, Fluxes) {
    if rainfall > etp {
        let excess = rainfall - etp;
        let absorbed = if state.level < capacity {
            (capacity - state.level).min(excess)
        } else {
            0.0
        };
        let next = ReservoirState {
            level: state.level + absorbed,
        };
        let fluxes = Fluxes {
            actual_et: etp,
            absorbed,
            effective_rainfall: excess - absorbed,
        };
        (next, fluxes)
    } else {
        let next = ReservoirState {
            level: (state.level - (etp - rainfall)).max(0.0),
        };
        let fluxes = Fluxes {
            actual_et: rainfall,
            absorbed: 0.0,
            effective_rainfall: 0.0,
        };
        (next, fluxes)
    }
}

/// Rounded outputs of one simulated month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBalance {
    pub reservoir: f64,
    /// `None` when the month had no PET to balance against.
    pub actual_et: Option<f64>,
    pub effective_rainfall: Option<f64>,
}

/// Runs the balance over consecutive months of one station-year, given as
/// `(rainfall, corrected PET)` pairs in calendar order.
///
/// The reservoir starts full. A month without PET leaves the reservoir untouched and
/// yields no ETR or effective rainfall.
pub fn simulate(
    capacity: f64,
    months: impl IntoIterator<Item = (f64, Option<f64>)>,
) -> Vec<MonthBalance> {
    months
        .into_iter()
        .scan(ReservoirState::full(capacity), |state, (rainfall, etp)| {
            let balance = match etp {
                Some(etp) => {
                    let (next, fluxes) = step(*state, capacity, rainfall, etp);
                    *state = next;
                    MonthBalance {
                        reservoir: round_to(next.level, 2),
                        actual_et: Some(round_to(fluxes.actual_et, 2)),
                        effective_rainfall: Some(round_to(fluxes.effective_rainfall, 2)),
                    }
                }
                None => MonthBalance {
                    reservoir: round_to(state.level, 2),
                    actual_et: None,
                    effective_rainfall: None,
                },
            };
            Some(balance)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surplus_with_full_reservoir_runs_off() {
        let (next, fluxes) = step(ReservoirState::full(100.0), 100.0, 150.0, 50.0);
        assert_eq!(fluxes.actual_et, 50.0);
        assert_eq!(fluxes.absorbed, 0.0);
        assert_eq!(fluxes.effective_rainfall, 100.0);
        assert_eq!(next.level, 100.0);
    }

    #[test]
    fn surplus_refills_a_partial_reservoir_first() {
        let (next, fluxes) = step(ReservoirState { level: 50.0 }, 100.0, 80.0, 30.0);
        assert_eq!(fluxes.actual_et, 30.0);
        assert_eq!(fluxes.absorbed, 50.0);
        assert_eq!(fluxes.effective_rainfall, 0.0);
        assert_eq!(next.level, 100.0);

        let (next, fluxes) = step(ReservoirState { level: 90.0 }, 100.0, 80.0, 30.0);
        assert_eq!(fluxes.absorbed, 10.0);
        assert_eq!(fluxes.effective_rainfall, 40.0);
        assert_eq!(next.level, 100.0);
    }

    #[test]
    fn deficit_draws_down_the_reservoir() {
        let (next, fluxes) = step(ReservoirState { level: 100.0 }, 100.0, 20.0, 60.0);
        assert_eq!(fluxes.actual_et, 20.0);
        assert_eq!(fluxes.effective_rainfall, 0.0);
        assert_eq!(next.level, 60.0);
    }

    #[test]
    fn deficit_is_floored_at_empty() {
        let (next, _) = step(ReservoirState { level: 25.0 }, 100.0, 20.0, 60.0);
        assert_eq!(next.level, 0.0);
    }

    #[test]
    fn equal_rainfall_and_demand_is_a_deficit_of_zero() {
        let (next, fluxes) = step(ReservoirState { level: 40.0 }, 100.0, 30.0, 30.0);
        assert_eq!(fluxes.actual_et, 30.0);
        assert_eq!(fluxes.effective_rainfall, 0.0);
        assert_eq!(next.level, 40.0);
    }

    #[test]
    fn simulation_starts_full_and_carries_the_level() {
        let months = [
            (20.0, Some(60.0)),  // 100 -> 60
            (10.0, Some(90.0)),  // 60 -> 0
            (80.0, Some(30.0)),  // absorbs 50 -> 50
            (200.0, Some(40.0)), // absorbs 50 -> 100, PE 110
        ];
        let out = simulate(100.0, months);
        let levels: Vec<f64> = out.iter().map(|m| m.reservoir).collect();
        assert_eq!(levels, vec![60.0, 0.0, 50.0, 100.0]);
        assert_eq!(out[2].effective_rainfall, Some(0.0));
        assert_eq!(out[3].effective_rainfall, Some(110.0));
        assert_eq!(out[3].actual_et, Some(40.0));
    }

    #[test]
    fn month_without_pet_keeps_the_level() {
        let out = simulate(100.0, [(20.0, Some(60.0)), (5.0, None), (0.0, Some(10.0))]);
        assert_eq!(out[1].reservoir, 60.0);
        assert_eq!(out[1].actual_et, None);
        assert_eq!(out[1].effective_rainfall, None);
        assert_eq!(out[2].reservoir, 50.0);
    }

    #[test]
    fn zero_capacity_sends_every_surplus_to_effective_rainfall() {
        let out = simulate(0.0, [(50.0, Some(20.0)), (10.0, Some(30.0))]);
        assert_eq!(out[0].effective_rainfall, Some(30.0));
        assert_eq!(out[0].reservoir, 0.0);
        assert_eq!(out[1].reservoir, 0.0);
    }
}
