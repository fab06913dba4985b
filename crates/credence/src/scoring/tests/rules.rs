use super::common::*;
use crate::scoring::{
    score_income, score_payment, score_savings, score_spending, ScoreLabel, VolatilityBand,
};

#[test]
fn payment_rounds_on_time_ratio() {
    let result = score_payment(&payment(11, 12));

    assert_eq!(result.score, 92);
    assert_eq!(result.label, ScoreLabel::Excellent);
    assert_eq!((result.on_time, result.total), (11, 12));
}

#[test]
fn payment_with_late_history_lands_in_good() {
    let result = score_payment(&payment(8, 12));

    assert_eq!(result.score, 67);
    assert_eq!(result.label, ScoreLabel::Good);
}

#[test]
fn payment_without_history_uses_no_data_sentinel() {
    let result = score_payment(&payment(0, 0));

    assert_eq!(result.score, 50);
    assert_eq!(result.label, ScoreLabel::NoData);
    assert_eq!(result.total, 0);
}

#[test]
fn payment_never_exceeds_one_hundred() {
    assert_eq!(score_payment(&payment(12, 12)).score, 100);
    assert_eq!(score_payment(&payment(30, 12)).score, 100);
    assert_eq!(score_payment(&payment(0, 12)).score, 0);
}

#[test]
fn savings_combines_growth_and_balance_tier() {
    let result = score_savings(&savings(5.2, 780.0));

    // 50 + 15.6 growth + 15 balance tier
    assert_eq!(result.score, 81);
    assert_eq!(result.label, ScoreLabel::Excellent);
    assert_eq!(result.trend(), "+5.2%");
}

#[test]
fn savings_growth_reward_saturates_at_thirty() {
    assert_eq!(score_savings(&savings(10.0, 0.0)).score, 80);
    assert_eq!(score_savings(&savings(250.0, 0.0)).score, 80);
    assert_eq!(score_savings(&savings(25.0, 5000.0)).score, 100);
}

#[test]
fn savings_decline_penalty_floors_at_twenty() {
    let mild = score_savings(&savings(-2.1, 150.0));
    assert_eq!(mild.score, 51);
    assert_eq!(mild.trend(), "-2.1%");

    assert_eq!(score_savings(&savings(-10.0, 0.0)).score, 30);
    assert_eq!(score_savings(&savings(-90.0, 0.0)).score, 30);
}

#[test]
fn savings_balance_tiers_are_exclusive() {
    let tiers = [
        (1000.0, 70),
        (999.99, 65),
        (500.0, 65),
        (200.0, 60),
        (100.0, 55),
        (99.99, 50),
    ];
    for (balance, expected) in tiers {
        assert_eq!(
            score_savings(&savings(0.0, balance)).score,
            expected,
            "balance {balance}"
        );
    }
}

#[test]
fn income_rewards_months_and_low_variability() {
    let result = score_income(&income(6, 3200.0, 240.0));

    assert_eq!(result.score, 100);
    assert_eq!(result.label, ScoreLabel::Excellent);
    assert_eq!(result.income_type, "Salary");
    assert_eq!(result.months_tracked, 6);
}

#[test]
fn income_variability_tiers() {
    let cases = [
        (50.0, 70),  // 0.05
        (150.0, 65), // 0.15
        (250.0, 60), // 0.25
        (450.0, 55), // 0.45
        (600.0, 50), // 0.60
    ];
    for (std_dev, expected) in cases {
        assert_eq!(
            score_income(&income(0, 1000.0, std_dev)).score,
            expected,
            "std dev {std_dev}"
        );
    }
}

#[test]
fn income_with_zero_average_deposit_divides_by_one() {
    let mut raw = income(0, 0.0, 0.05);
    raw.source_label.clear();

    let result = score_income(&raw);

    assert_eq!(result.score, 70);
    assert_eq!(result.income_type, "Unknown");
}

#[test]
fn income_type_falls_back_only_for_an_empty_label() {
    let mut raw = income(4, 2000.0, 100.0);
    raw.source_label = " ".to_string();

    let result = score_income(&raw);

    assert_eq!(result.income_type, " ");
}

#[test]
fn income_month_bonus_is_clamped_only_at_the_end() {
    assert_eq!(score_income(&income(24, 1000.0, 900.0)).score, 100);
}

#[test]
fn spending_inverts_volatility() {
    let result = score_spending(&spending(48.0));

    assert_eq!(result.score, 52);
    assert_eq!(result.label, ScoreLabel::Moderate);
    assert_eq!(result.volatility, VolatilityBand::High);
}

#[test]
fn spending_bands_check_low_to_high() {
    let cases = [
        (0.0, VolatilityBand::VeryLow),
        (10.0, VolatilityBand::VeryLow),
        (10.5, VolatilityBand::Low),
        (20.0, VolatilityBand::Low),
        (35.0, VolatilityBand::Moderate),
        (50.0, VolatilityBand::High),
        (50.1, VolatilityBand::VeryHigh),
    ];
    for (volatility, band) in cases {
        assert_eq!(score_spending(&spending(volatility)).volatility, band);
    }
}

#[test]
fn spending_clamps_extreme_volatility() {
    assert_eq!(score_spending(&spending(150.0)).score, 0);
    assert_eq!(score_spending(&spending(10.5)).score, 90);
}
