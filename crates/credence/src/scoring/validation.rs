use super::domain::RawSignals;

/// Precondition failures for caller-supplied raw signals.
///
/// The scoring functions never raise these; they are checked at trust boundaries only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl ScoringError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::invalid(field, "must be a finite number"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ScoringError> {
    if finite(field, value)? < 0.0 {
        return Err(ScoringError::invalid(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(())
}

impl RawSignals {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.payment.on_time_count > self.payment.total_count {
            return Err(ScoringError::invalid(
                "payment.onTimeCount",
                format!(
                    "({}) exceeds payment.totalCount ({})",
                    self.payment.on_time_count, self.payment.total_count
                ),
            ));
        }

        finite("savings.growthPercent", self.savings.growth_percent)?;
        non_negative("savings.avgBalance", self.savings.avg_balance)?;
        non_negative("income.avgDeposit", self.income.avg_deposit)?;
        non_negative("income.depositStdDev", self.income.deposit_std_dev)?;
        non_negative("spending.volatilityPercent", self.spending.volatility_percent)?;

        Ok(())
    }
}
