//! Trading desk: fixed-fraction bets with a configured win rate.

use empire_core::{apply_factor, EmpireConfig, ValidationError};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of one trading session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradingSummary {
    pub trades: u32,
    pub wins: u32,
    pub profit: Decimal,
}

#[derive(Clone, Debug)]
pub struct TradingDesk {
    portfolio_value: Decimal,
    total_profit: Decimal,
    trades_executed: u64,
    position_fraction: f64,
    win_rate: f64,
    win_return: (f64, f64),
    loss_return: (f64, f64),
}

impl TradingDesk {
    /// Desk parameters are taken from a validated config.
    pub fn from_config(cfg: &EmpireConfig) -> Self {
        Self {
            portfolio_value: cfg.trading_capital,
            total_profit: Decimal::ZERO,
            trades_executed: 0,
            position_fraction: cfg.position_fraction,
            win_rate: cfg.win_rate,
            win_return: (cfg.win_return_min, cfg.win_return_max),
            loss_return: (cfg.loss_return_min, cfg.loss_return_max),
        }
    }

    pub fn portfolio_value(&self) -> Decimal {
        self.portfolio_value
    }

    pub fn total_profit(&self) -> Decimal {
        self.total_profit
    }

    pub fn trades_executed(&self) -> u64 {
        self.trades_executed
    }

    /// Execute `trades` sequential trades, each sized on the current portfolio.
    pub fn execute_trades<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        trades: u32,
    ) -> Result<TradingSummary, ValidationError> {
        let mut profit = Decimal::ZERO;
        let mut wins = 0;
        for _ in 0..trades {
            let size = apply_factor(self.portfolio_value, self.position_fraction)?;
            let pnl = if rng.gen_bool(self.win_rate) {
                wins += 1;
                apply_factor(size, rng.gen_range(self.win_return.0..=self.win_return.1))?
            } else {
                -apply_factor(size, rng.gen_range(self.loss_return.0..=self.loss_return.1))?
            };
            let add = |a: Decimal| a.checked_add(pnl).ok_or(ValidationError::Overflow);
            let portfolio = add(self.portfolio_value)?;
            let total = add(self.total_profit)?;
            profit = add(profit)?;
            self.portfolio_value = portfolio;
            self.total_profit = total;
            self.trades_executed += 1;
        }
        info!(
            trades,
            wins,
            %profit,
            portfolio = %self.portfolio_value,
            "trading session closed"
        );
        Ok(TradingSummary {
            trades,
            wins,
            profit,
        })
    }
}
