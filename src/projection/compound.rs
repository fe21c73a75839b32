//! Ordinary-annuity projection of a level monthly contribution

use serde::{Deserialize, Serialize};

use crate::Rupiah;

/// Principal / interest split of a projected savings balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedBalance {
    pub monthly_contribution: Rupiah,
    pub months: i64,
    /// Sum of contributions (`monthly_contribution × months`)
    pub principal: Rupiah,
    /// Compounded balance at the end of the tenure
    pub future_value: Rupiah,
    /// `future_value − principal`; never negative for a non-negative yield
    pub interest: Rupiah,
}

/// Projects contribution streams at a fixed annual yield, compounded monthly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundProjector {
    monthly_rate: f64,
}

impl CompoundProjector {
    /// Build from an annual yield in percent (5.5 for 5.5%)
    pub fn from_annual_percent(annual_yield_percent: f64) -> Self {
        Self {
            monthly_rate: annual_yield_percent / 100.0 / 12.0,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    /// Future value of `monthly_contribution` paid at the end of each of `months` periods:
    /// `C × ((1 + r)^n − 1) / r`, degrading to `C × n` when `r = 0`.
    pub fn future_value(&self, monthly_contribution: Rupiah, months: i64) -> f64 {
        if months <= 0 {
            return 0.0;
        }
        let c = monthly_contribution as f64;
        let n = months as f64;
        if self.monthly_rate == 0.0 {
            return c * n;
        }
        // expm1/ln_1p keep the annuity factor accurate for very small rates
        let growth = (n * self.monthly_rate.ln_1p()).exp_m1();
        c * growth / self.monthly_rate
    }

    /// Project a stream into principal, compounded balance and interest
    pub fn project(&self, monthly_contribution: Rupiah, months: i64) -> ProjectedBalance {
        let monthly_contribution = monthly_contribution.max(0);
        let months = months.max(0);
        let principal = monthly_contribution * months;

        let future_value = if self.monthly_rate == 0.0 {
            principal
        } else {
            self.future_value(monthly_contribution, months).round() as Rupiah
        };
        debug_assert!(
            self.monthly_rate < 0.0 || future_value >= principal,
            "compounded balance below principal"
        );

        ProjectedBalance {
            monthly_contribution,
            months,
            principal,
            future_value,
            interest: future_value - principal,
        }
    }
}
