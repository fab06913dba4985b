use crate::scoring::{RawIncomeData, RawPaymentData, RawSavingsData, RawSignals, RawSpendingData};

pub(super) fn payment(on_time_count: u32, total_count: u32) -> RawPaymentData {
    RawPaymentData {
        on_time_count,
        total_count,
    }
}

pub(super) fn savings(growth_percent: f64, avg_balance: f64) -> RawSavingsData {
    RawSavingsData {
        growth_percent,
        avg_balance,
    }
}

pub(super) fn income(
    months_with_income: u32,
    avg_deposit: f64,
    deposit_std_dev: f64,
) -> RawIncomeData {
    RawIncomeData {
        months_with_income,
        avg_deposit,
        deposit_std_dev,
        source_label: "Salary".to_string(),
    }
}

pub(super) fn spending(volatility_percent: f64) -> RawSpendingData {
    RawSpendingData { volatility_percent }
}

/// Reference subject: 11/12 on time, +5.2% savings on $780, steady salary, 48% volatility.
pub(super) fn reference_signals() -> RawSignals {
    RawSignals {
        payment: payment(11, 12),
        savings: savings(5.2, 780.0),
        income: income(6, 3200.0, 240.0),
        spending: spending(48.0),
    }
}
