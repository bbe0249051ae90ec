// Change notification detector scenarios over multi-tick snapshot
// sequences.

use rust_decimal_macros::dec;

use reeltally::modules::notifications::ChangeDetector;
use reeltally::modules::sales::models::Sale;

fn sale(id: &str, title: &str, date: &str) -> Sale {
    let mut sale = Sale::new(
        "Acme".to_string(),
        "Jane Doe".to_string(),
        title.to_string(),
        Some(dec!(200)),
        Some(dec!(15)),
        date.parse().unwrap(),
    )
    .unwrap();
    sale.id = Some(id.to_string());
    sale
}

fn paid(mut s: Sale, on: &str) -> Sale {
    s.mark_paid(on.parse().unwrap());
    s
}

#[test]
fn test_initial_history_load_does_not_flood() {
    let mut detector = ChangeDetector::new();

    // A freelancer with a long history logs in: one big first snapshot.
    let history: Vec<Sale> = (0..50)
        .map(|i| sale(&i.to_string(), &format!("Video {}", i), "2024-01-01"))
        .collect();

    assert!(detector.observe(history).is_empty());
    assert!(detector.notifications().is_empty());
}

#[test]
fn test_identical_snapshot_twice_emits_nothing() {
    let mut detector = ChangeDetector::new();
    let snapshot = vec![
        sale("1", "Promo", "2024-03-01"),
        sale("2", "Recap", "2024-02-01"),
    ];

    detector.observe(snapshot.clone());
    assert!(detector.observe(snapshot.clone()).is_empty());
    assert!(detector.observe(snapshot).is_empty());
    assert!(detector.notifications().is_empty());
}

#[test]
fn test_one_prepended_sale_emits_exactly_one_notification() {
    let mut detector = ChangeDetector::new();
    detector.observe(vec![sale("1", "Promo", "2024-03-01")]);

    let emitted = detector.observe(vec![
        sale("2", "Fresh Cut", "2024-04-01"),
        sale("1", "Promo", "2024-03-01"),
    ]);

    assert_eq!(emitted, vec!["New sale added: Fresh Cut".to_string()]);
}

#[test]
fn test_paid_flip_emits_exactly_one_payment_notification() {
    let mut detector = ChangeDetector::new();
    detector.observe(vec![
        sale("1", "Promo", "2024-03-01"),
        sale("2", "Recap", "2024-02-01"),
    ]);

    let emitted = detector.observe(vec![
        paid(sale("1", "Promo", "2024-03-01"), "2024-04-01"),
        sale("2", "Recap", "2024-02-01"),
    ]);

    // 200 * 15% = 30.00, from the new record's figures.
    assert_eq!(
        emitted,
        vec!["Payment of $30.00 for \"Promo\" has been sent!".to_string()]
    );
}

#[test]
fn test_growth_and_payment_in_the_same_tick() {
    let mut detector = ChangeDetector::new();
    detector.observe(vec![sale("1", "Promo", "2024-03-01")]);

    let emitted = detector.observe(vec![
        sale("2", "Fresh Cut", "2024-04-01"),
        paid(sale("1", "Promo", "2024-03-01"), "2024-04-02"),
    ]);

    assert_eq!(emitted.len(), 2);
    assert!(emitted.contains(&"New sale added: Fresh Cut".to_string()));
    assert!(emitted
        .iter()
        .any(|n| n.starts_with("Payment of $30.00 for \"Promo\"")));
}

#[test]
fn test_baseline_advances_so_transitions_never_redeliver() {
    let mut detector = ChangeDetector::new();
    detector.observe(vec![sale("1", "Promo", "2024-03-01")]);

    let after = vec![paid(sale("1", "Promo", "2024-03-01"), "2024-04-01")];
    detector.observe(after.clone());

    // Churn: the same paid snapshot keeps arriving.
    for _ in 0..5 {
        assert!(detector.observe(after.clone()).is_empty());
    }
    assert_eq!(detector.notifications().len(), 1);
}

#[test]
fn test_deletion_then_growth_only_counts_net_length() {
    let mut detector = ChangeDetector::new();
    detector.observe(vec![
        sale("1", "Promo", "2024-03-01"),
        sale("2", "Recap", "2024-02-01"),
    ]);

    // One sale deleted: shrinkage emits nothing.
    assert!(detector
        .observe(vec![sale("1", "Promo", "2024-03-01")])
        .is_empty());

    // Replacement arrives: growth relative to the previous tick.
    let emitted = detector.observe(vec![
        sale("3", "Reshoot", "2024-05-01"),
        sale("1", "Promo", "2024-03-01"),
    ]);
    assert_eq!(emitted, vec!["New sale added: Reshoot".to_string()]);
}
