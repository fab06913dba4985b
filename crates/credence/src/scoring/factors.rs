use super::domain::{
    Factor, IncomeSubScore, PaymentSubScore, SavingsSubScore, SignalSet, SpendingSubScore,
    VolatilityBand,
};

/// Explanatory factors in pillar order: payment, savings, income, spending.
///
/// Each pillar contributes at most one factor.
pub fn generate_factors(signals: &SignalSet) -> Vec<Factor> {
    [
        payment_factor(&signals.payment_reliability),
        savings_factor(&signals.savings_stability),
        income_factor(&signals.income_consistency),
        spending_factor(&signals.spending_stability),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn payment_factor(payment: &PaymentSubScore) -> Option<Factor> {
    let on_time = payment.on_time;
    let total = payment.total;

    if f64::from(on_time) >= f64::from(total) * 0.9 {
        return Some(Factor::positive(format!("{on_time}/{total} payments on time")));
    }

    if on_time < total {
        let late = total - on_time;
        let noun = if late > 1 { "payments" } else { "payment" };
        return Some(Factor::negative(format!("{late} late {noun} detected")));
    }

    None
}

fn savings_factor(savings: &SavingsSubScore) -> Option<Factor> {
    let trend = savings.trend();

    // sign of the displayed trend gates first; the score only matters for declines
    if trend.starts_with('+') {
        Some(Factor::positive(format!("Stable savings growth ({trend})")))
    } else if savings.score < 50 {
        Some(Factor::negative("Low savings buffer detected"))
    } else {
        None
    }
}

fn income_factor(income: &IncomeSubScore) -> Option<Factor> {
    if income.score >= 70 {
        Some(Factor::positive("Regular income deposits"))
    } else if income.score < 50 {
        Some(Factor::negative("Irregular income pattern"))
    } else {
        None
    }
}

fn spending_factor(spending: &SpendingSubScore) -> Option<Factor> {
    match spending.volatility {
        VolatilityBand::VeryLow | VolatilityBand::Low => {
            Some(Factor::positive("Consistent spending patterns"))
        }
        VolatilityBand::High | VolatilityBand::VeryHigh => {
            Some(Factor::negative("High spending volatility detected"))
        }
        VolatilityBand::Moderate => None,
    }
}
