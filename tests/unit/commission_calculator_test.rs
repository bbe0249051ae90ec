// Property-based tests for the commission calculator.
//
// Validates across many inputs that commission and profit follow the
// ledger formulas, never fail, and coerce missing fields to zero.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use reeltally::modules::sales::models::Sale;
use reeltally::modules::sales::services::commission::{commission, profit, totals_of};

fn sale(amount: Option<Decimal>, rate: Option<Decimal>) -> Sale {
    Sale::new(
        "Acme".to_string(),
        "Jane Doe".to_string(),
        "Promo".to_string(),
        amount,
        rate,
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn test_commission_follows_the_formula(
        amount in 0u64..1_000_000_000u64,
        rate_percent in 0u8..=100u8
    ) {
        let amount = Decimal::from(amount);
        let rate = Decimal::from(rate_percent);
        let s = sale(Some(amount), Some(rate));

        prop_assert_eq!(commission(&s), amount * rate / Decimal::from(100));
    }

    #[test]
    fn test_profit_is_amount_minus_commission(
        amount in 0u64..1_000_000_000u64,
        rate_percent in 0u8..=100u8
    ) {
        let s = sale(Some(Decimal::from(amount)), Some(Decimal::from(rate_percent)));

        prop_assert_eq!(profit(&s), Decimal::from(amount) - commission(&s));
    }

    #[test]
    fn test_commission_is_deterministic(
        amount in 0u64..1_000_000_000u64,
        rate_percent in 0u8..=100u8
    ) {
        let s = sale(Some(Decimal::from(amount)), Some(Decimal::from(rate_percent)));

        prop_assert_eq!(commission(&s), commission(&s));
    }

    #[test]
    fn test_commission_never_exceeds_amount(
        amount in 0u64..1_000_000_000u64,
        rate_percent in 0u8..=100u8
    ) {
        let s = sale(Some(Decimal::from(amount)), Some(Decimal::from(rate_percent)));

        prop_assert!(commission(&s) >= Decimal::ZERO);
        prop_assert!(commission(&s) <= Decimal::from(amount));
    }

    #[test]
    fn test_missing_amount_or_rate_coerces_to_zero(
        amount in 0u64..1_000_000_000u64,
        rate_percent in 0u8..=100u8
    ) {
        let no_amount = sale(None, Some(Decimal::from(rate_percent)));
        let no_rate = sale(Some(Decimal::from(amount)), None);

        prop_assert_eq!(commission(&no_amount), Decimal::ZERO);
        prop_assert_eq!(commission(&no_rate), Decimal::ZERO);
        prop_assert_eq!(profit(&no_amount), Decimal::ZERO);
        prop_assert_eq!(profit(&no_rate), Decimal::from(amount));
    }

    #[test]
    fn test_totals_equal_the_sum_of_parts(
        amounts in prop::collection::vec(0u64..1_000_000u64, 0..20),
        rate_percent in 0u8..=100u8
    ) {
        let sales: Vec<Sale> = amounts
            .iter()
            .map(|a| sale(Some(Decimal::from(*a)), Some(Decimal::from(rate_percent))))
            .collect();

        let totals = totals_of(&sales);
        let expected_amount: Decimal = sales.iter().map(|s| s.sale_amount.unwrap()).sum();
        let expected_commission: Decimal = sales.iter().map(commission).sum();

        prop_assert_eq!(totals.sale_amount, expected_amount);
        prop_assert_eq!(totals.commission, expected_commission);
        prop_assert_eq!(totals.profit, expected_amount - expected_commission);
    }
}

#[test]
fn test_known_example_fifteen_percent_of_five_hundred() {
    use rust_decimal_macros::dec;

    let s = sale(Some(dec!(500)), Some(dec!(15)));
    assert_eq!(commission(&s), dec!(75));
    assert_eq!(profit(&s), dec!(425));
}
