use credit_sim::application::amortization::compute_schedule;
use credit_sim::error::SimulationError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amount in cents, rate in hundredths of a percent, term in months.
fn loan() -> impl Strategy<Value = (Decimal, Decimal, u32)> {
    (100_000i64..=100_000_000, 0i64..=10_000, 1u32..=480)
        .prop_map(|(cents, bps, months)| (Decimal::new(cents, 2), Decimal::new(bps, 2), months))
}

/// Loans where every month repays at least a cent of principal.
fn moderate_loan() -> impl Strategy<Value = (Decimal, Decimal, u32)> {
    (100_000i64..=100_000_000, 0i64..=2_000, 1u32..=360)
        .prop_map(|(cents, bps, months)| (Decimal::new(cents, 2), Decimal::new(bps, 2), months))
}

proptest! {
    #[test]
    fn principal_sums_to_amount((amount, rate, months) in loan()) {
        let schedule = compute_schedule(amount, rate, months).unwrap();
        let drift = (schedule.total_principal() - amount).abs();
        prop_assert!(drift <= dec!(0.01), "drift {} for {} @ {}% x {}", drift, amount, rate, months);
    }

    #[test]
    fn final_balance_is_zero((amount, rate, months) in loan()) {
        let schedule = compute_schedule(amount, rate, months).unwrap();
        prop_assert_eq!(schedule.final_balance(), Some(Decimal::ZERO));
    }

    #[test]
    fn months_are_contiguous((amount, rate, months) in loan()) {
        let schedule = compute_schedule(amount, rate, months).unwrap();
        prop_assert_eq!(schedule.len(), months as usize);
        prop_assert!(schedule.is_contiguous());
    }

    #[test]
    fn rows_are_internally_consistent((amount, rate, months) in loan()) {
        let schedule = compute_schedule(amount, rate, months).unwrap();
        for entry in &schedule {
            prop_assert_eq!(entry.payment, entry.principal_portion + entry.interest_portion);
            prop_assert!(entry.interest_portion >= Decimal::ZERO);
            prop_assert!(entry.principal_portion >= Decimal::ZERO);
            prop_assert_eq!(entry.remaining_balance.scale() <= 2, true);
        }
    }

    #[test]
    fn balance_strictly_decreases((amount, rate, months) in moderate_loan()) {
        let schedule = compute_schedule(amount, rate, months).unwrap();
        let mut previous = amount;
        for entry in &schedule {
            prop_assert!(
                entry.remaining_balance < previous,
                "month {} balance {} not below {}", entry.month, entry.remaining_balance, previous
            );
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn schedule_is_deterministic((amount, rate, months) in loan()) {
        let first = compute_schedule(amount, rate, months).unwrap();
        let second = compute_schedule(amount, rate, months).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn non_positive_amounts_are_rejected(cents in -10_000_000i64..=0, months in 1u32..=360) {
        let result = compute_schedule(Decimal::new(cents, 2), dec!(10), months);
        prop_assert!(matches!(result, Err(SimulationError::InvalidParameters(_))));
    }
}

#[test]
fn zero_term_is_rejected() {
    assert!(matches!(
        compute_schedule(dec!(1000), dec!(10), 0),
        Err(SimulationError::InvalidParameters(_))
    ));
}

#[test]
fn zero_rate_reference_case() {
    let schedule = compute_schedule(dec!(12000), Decimal::ZERO, 12).unwrap();
    for entry in &schedule {
        assert_eq!(entry.interest_portion, Decimal::ZERO);
        assert_eq!(entry.payment, dec!(1000.00));
        assert_eq!(entry.principal_portion, dec!(1000.00));
    }
}
