mod reservoir;
mod series;

pub use reservoir::{simulate, step, Fluxes, MonthBalance, ReservoirState};
pub use series::{balance, BalanceInput, BalanceSeries};
