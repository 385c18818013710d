use super::*;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn full_month_at_base_salary_pays_exactly_base() {
    let pay = calculate_pay(dec("3200.00"), dec("160"), Decimal::ZERO, Decimal::ZERO).unwrap();
    assert_eq!(pay.hourly_rate, dec("20.00"));
    assert_eq!(pay.gross_pay, dec("3200.00"));
    assert_eq!(pay.net_pay, dec("3200.00"));
}

#[test]
fn half_month_with_bonus_and_deductions() {
    let pay = calculate_pay(dec("1600.00"), dec("80"), dec("100.00"), dec("50.00")).unwrap();
    assert_eq!(pay.hourly_rate, dec("10.00"));
    assert_eq!(pay.gross_pay, dec("900.00"));
    assert_eq!(pay.net_pay, dec("850.00"));
}

#[test]
fn decimal_precision_avoids_float_drift() {
    // 1234.56 / 160 = 7.716 exactly in decimal; 37.5h keeps precision
    let pay = calculate_pay(dec("1234.56"), dec("37.5"), Decimal::ZERO, Decimal::ZERO).unwrap();
    // 7.716 * 37.5 = 289.35
    assert_eq!(pay.gross_pay, dec("289.35"));
}

#[test]
fn rounding_is_half_up() {
    // 100.01 / 160 = 0.6250625/h; 1 hour -> 0.63 after half-up rounding
    let pay = calculate_pay(dec("100.01"), dec("1"), Decimal::ZERO, Decimal::ZERO).unwrap();
    assert_eq!(pay.gross_pay, dec("0.63"));
}

#[test]
fn negative_inputs_are_rejected() {
    let err = calculate_pay(dec("3200"), dec("-1"), Decimal::ZERO, Decimal::ZERO).unwrap_err();
    assert!(matches!(err, CalcError::Negative { field: "hours_worked", .. }));

    let err = calculate_pay(dec("3200"), dec("160"), dec("-0.01"), Decimal::ZERO).unwrap_err();
    assert!(matches!(err, CalcError::Negative { field: "bonus", .. }));

    let err = calculate_pay(dec("3200"), dec("160"), Decimal::ZERO, dec("-5")).unwrap_err();
    assert!(matches!(err, CalcError::Negative { field: "deductions", .. }));

    let err = calculate_pay(dec("-3200"), dec("160"), Decimal::ZERO, Decimal::ZERO).unwrap_err();
    assert!(matches!(err, CalcError::Negative { field: "base_salary", .. }));
}

#[test]
fn oversized_inputs_are_rejected() {
    let err =
        calculate_pay(dec("1000000.01"), dec("160"), Decimal::ZERO, Decimal::ZERO).unwrap_err();
    assert!(matches!(err, CalcError::TooLarge { field: "base_salary", .. }));

    let err = calculate_pay(dec("3200"), dec("745"), Decimal::ZERO, Decimal::ZERO).unwrap_err();
    assert!(matches!(err, CalcError::TooLarge { field: "hours_worked", .. }));
}

#[test]
fn deductions_may_exceed_gross() {
    // A valid record with net below zero: inputs are all non-negative
    let pay = calculate_pay(dec("1600.00"), dec("10"), Decimal::ZERO, dec("200.00")).unwrap();
    assert_eq!(pay.gross_pay, dec("100.00"));
    assert_eq!(pay.net_pay, dec("-100.00"));
}

#[test]
fn zero_hours_pays_only_bonus() {
    let pay = calculate_pay(dec("3200.00"), Decimal::ZERO, dec("250.00"), Decimal::ZERO).unwrap();
    assert_eq!(pay.gross_pay, dec("250.00"));
    assert_eq!(pay.net_pay, dec("250.00"));
}
