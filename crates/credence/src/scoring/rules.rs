use super::domain::{
    IncomeSubScore, PaymentSubScore, RawIncomeData, RawPaymentData, RawSavingsData,
    RawSpendingData, SavingsSubScore, ScoreLabel, SpendingSubScore, VolatilityBand,
};

/// Neutral score used when a pillar has no history to judge.
pub(crate) const NEUTRAL_SCORE: u8 = 50;

const SAVINGS_BASE: f64 = 50.0;
const SAVINGS_GROWTH_CEILING: f64 = 30.0;
const SAVINGS_DECLINE_FLOOR: f64 = -20.0;

const INCOME_BASE: f64 = 50.0;
const INCOME_POINTS_PER_MONTH: f64 = 5.0;

/// Balance tiers, highest first: (minimum average balance, bonus).
const BALANCE_TIERS: [(f64, f64); 4] = [(1000.0, 20.0), (500.0, 15.0), (200.0, 10.0), (100.0, 5.0)];

/// Deposit variability tiers, tightest first: (exclusive upper bound, bonus).
const VARIABILITY_TIERS: [(f64, f64); 4] = [(0.1, 20.0), (0.2, 15.0), (0.3, 10.0), (0.5, 5.0)];

fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

pub fn score_payment(raw: &RawPaymentData) -> PaymentSubScore {
    if raw.total_count == 0 {
        return PaymentSubScore {
            score: NEUTRAL_SCORE,
            label: ScoreLabel::NoData,
            on_time: raw.on_time_count,
            total: 0,
        };
    }

    let ratio = f64::from(raw.on_time_count) / f64::from(raw.total_count);
    let score = to_score((ratio * 100.0).round());

    PaymentSubScore {
        score,
        label: ScoreLabel::from_score(score),
        on_time: raw.on_time_count,
        total: raw.total_count,
    }
}

pub fn score_savings(raw: &RawSavingsData) -> SavingsSubScore {
    let mut score = SAVINGS_BASE;

    // growth rewards 3 pts per percent, decline costs 2 pts per percent
    score += if raw.growth_percent > 0.0 {
        (raw.growth_percent * 3.0).min(SAVINGS_GROWTH_CEILING)
    } else {
        (raw.growth_percent * 2.0).max(SAVINGS_DECLINE_FLOOR)
    };

    score += BALANCE_TIERS
        .iter()
        .find(|(minimum, _)| raw.avg_balance >= *minimum)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0.0);

    let score = to_score(score);

    SavingsSubScore {
        score,
        label: ScoreLabel::from_score(score),
        growth_percent: raw.growth_percent,
        avg_balance: raw.avg_balance,
    }
}

pub fn score_income(raw: &RawIncomeData) -> IncomeSubScore {
    let mut score = INCOME_BASE + f64::from(raw.months_with_income) * INCOME_POINTS_PER_MONTH;

    let denominator = if raw.avg_deposit == 0.0 || raw.avg_deposit.is_nan() {
        1.0
    } else {
        raw.avg_deposit
    };
    let variability = raw.deposit_std_dev / denominator;

    score += VARIABILITY_TIERS
        .iter()
        .find(|(bound, _)| variability < *bound)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0.0);

    let score = to_score(score);
    let income_type = if raw.source_label.is_empty() {
        "Unknown".to_string()
    } else {
        raw.source_label.clone()
    };

    IncomeSubScore {
        score,
        label: ScoreLabel::from_score(score),
        income_type,
        months_tracked: raw.months_with_income,
    }
}

pub fn score_spending(raw: &RawSpendingData) -> SpendingSubScore {
    let score = to_score((100.0 - raw.volatility_percent).round());

    SpendingSubScore {
        score,
        label: ScoreLabel::from_score(score),
        volatility: VolatilityBand::from_percent(raw.volatility_percent),
        volatility_percent: raw.volatility_percent,
    }
}
