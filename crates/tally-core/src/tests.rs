use chrono::NaiveDate;

use crate::{
    ActualsFeed, ActualsService, AggregateOptions, CoreError, FeedError, LedgerService,
    MetricsService, MonthlyActuals, SummaryService, TransactionActuals,
};
use tally_domain::{
    BudgetLedger, CategoryUpdate, MonthKey, ProgressStatus, SavingsLedger, SeriesOrder,
    Transaction, ViewMode,
};

fn key(raw: &str) -> MonthKey {
    raw.parse().expect("valid month key")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// March and April buckets with Rent funded at 3000 in March.
fn rent_ledger() -> (BudgetLedger, uuid::Uuid) {
    let added = LedgerService::add_category(&BudgetLedger::new(), key("2024-3"), "Rent", 3000.0)
        .expect("add rent");
    let ledger = LedgerService::ensure_month(&added.ledger, key("2024-4"));
    (ledger, added.id)
}

#[test]
fn month_key_of_uses_one_based_month() {
    assert_eq!(
        LedgerService::month_key_of(date(2024, 12, 31)).to_string(),
        "2024-12"
    );
    assert!(matches!(
        LedgerService::parse_month("2024-0"),
        Err(CoreError::InvalidMonthKey(_))
    ));
}

#[test]
fn ensure_month_is_idempotent() {
    let (ledger, _) = rent_ledger();
    let once = LedgerService::ensure_month(&ledger, key("2024-5"));
    let twice = LedgerService::ensure_month(&once, key("2024-5"));

    assert_eq!(once, twice);
    assert_eq!(twice.bucket(key("2024-5")).unwrap().categories.len(), 1);
}

#[test]
fn ensure_month_on_empty_ledger_creates_empty_bucket() {
    let ledger = LedgerService::ensure_month(&SavingsLedger::new(), key("2024-1"));
    assert_eq!(ledger.len(), 1);
    assert!(ledger.bucket(key("2024-1")).unwrap().categories.is_empty());
}

#[test]
fn ensure_month_propagates_template_with_same_id() {
    let (ledger, rent) = rent_ledger();

    let april = ledger.bucket(key("2024-4")).expect("april exists");
    assert_eq!(april.categories.len(), 1);
    let entry = &april.categories[0];
    assert_eq!(entry.id, rent);
    assert_eq!(entry.name, "Rent");
    assert_eq!(entry.allocation, 0.0);
    assert_eq!(entry.actual, 0.0);
}

#[test]
fn ensure_month_does_not_mutate_input() {
    let (ledger, _) = rent_ledger();
    let _ = LedgerService::ensure_month(&ledger, key("2024-9"));
    assert!(!ledger.contains_month(key("2024-9")));
}

#[test]
fn add_category_fans_out_unfunded() {
    let (ledger, _) = rent_ledger();
    let added = LedgerService::add_category(&ledger, key("2024-4"), "Marketing", 500.0)
        .expect("add marketing");

    let april = added.ledger.entry(key("2024-4"), added.id).expect("april entry");
    assert_eq!(april.name, "Marketing");
    assert_eq!(april.allocation, 500.0);
    assert_eq!(april.actual, 0.0);

    let march = added.ledger.entry(key("2024-3"), added.id).expect("march entry");
    assert_eq!(march.name, "Marketing");
    assert_eq!(march.allocation, 0.0);
    assert_eq!(march.actual, 0.0);
}

#[test]
fn add_category_creates_missing_month() {
    let (ledger, rent) = rent_ledger();
    let added =
        LedgerService::add_category(&ledger, key("2024-7"), "Travel", 120.0).expect("add travel");

    let july = added.ledger.bucket(key("2024-7")).expect("july created");
    assert_eq!(july.categories.len(), 2);
    assert_eq!(july.category(rent).map(|e| e.allocation), Some(0.0));
    assert_eq!(july.category(added.id).map(|e| e.allocation), Some(120.0));
}

#[test]
fn add_category_trims_name_and_rejects_bad_input() {
    let ledger = BudgetLedger::new();
    let added =
        LedgerService::add_category(&ledger, key("2024-1"), "  Payroll ", 10.0).expect("add");
    assert_eq!(added.ledger.category_name(added.id), Some("Payroll"));

    for name in ["", "   "] {
        let err = LedgerService::add_category(&ledger, key("2024-1"), name, 10.0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
    for amount in [-1.0, f64::NAN, f64::INFINITY] {
        let err = LedgerService::add_category(&ledger, key("2024-1"), "Rent", amount).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
    assert!(ledger.is_empty());
}

#[test]
fn validation_messages_use_kind_labels() {
    let err = LedgerService::add_category(&SavingsLedger::new(), key("2024-1"), "Fund", -5.0)
        .unwrap_err();
    assert!(err.to_string().contains("target"), "unexpected error: {err}");

    let err = LedgerService::add_category(&BudgetLedger::new(), key("2024-1"), " ", 5.0)
        .unwrap_err();
    assert!(err.to_string().contains("budget category"), "unexpected error: {err}");
}

#[test]
fn rename_is_global_and_keeps_amounts() {
    let (ledger, rent) = rent_ledger();
    let updated = LedgerService::update_category(
        &ledger,
        rent,
        &CategoryUpdate::rename("Office Rent"),
        key("2024-4"),
    )
    .expect("rename");

    for month in ["2024-3", "2024-4"] {
        assert_eq!(updated.entry(key(month), rent).unwrap().name, "Office Rent");
    }
    assert_eq!(updated.entry(key("2024-3"), rent).unwrap().allocation, 3000.0);
    assert_eq!(updated.entry(key("2024-4"), rent).unwrap().allocation, 0.0);
}

#[test]
fn allocation_update_is_month_scoped() {
    let (ledger, rent) = rent_ledger();
    let updated = LedgerService::update_category(
        &ledger,
        rent,
        &CategoryUpdate::allocate(3500.0),
        key("2024-4"),
    )
    .expect("allocate");

    assert_eq!(updated.entry(key("2024-4"), rent).unwrap().allocation, 3500.0);
    assert_eq!(updated.entry(key("2024-3"), rent).unwrap().allocation, 3000.0);
}

#[test]
fn update_validates_everything_before_applying() {
    let (ledger, rent) = rent_ledger();
    let update = CategoryUpdate::rename("Office Rent").with_allocation(-10.0);
    let err = LedgerService::update_category(&ledger, rent, &update, key("2024-4")).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(ledger.category_name(rent), Some("Rent"));

    let err = LedgerService::update_category(
        &ledger,
        rent,
        &CategoryUpdate::rename("  "),
        key("2024-4"),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn update_unknown_category_is_not_found() {
    let (ledger, _) = rent_ledger();
    let missing = uuid::Uuid::new_v4();
    let err = LedgerService::update_category(
        &ledger,
        missing,
        &CategoryUpdate::rename("Ghost"),
        key("2024-4"),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(id) if id == missing));
}

#[test]
fn delete_is_global_and_idempotent() {
    let (ledger, rent) = rent_ledger();
    let ledger = LedgerService::ensure_month(&ledger, key("2023-12"));
    let deleted = LedgerService::delete_category(&ledger, rent);

    assert!(!deleted.contains_category(rent));
    assert!(deleted.buckets().all(|bucket| bucket.categories.is_empty()));
    assert_eq!(deleted.len(), 3);
    assert_eq!(LedgerService::delete_category(&deleted, rent), deleted);
}

#[test]
fn set_actual_validates_and_targets_one_month() {
    let (ledger, rent) = rent_ledger();
    let updated = LedgerService::set_actual(&ledger, rent, key("2024-3"), 3100.0).expect("set");
    assert_eq!(updated.entry(key("2024-3"), rent).unwrap().actual, 3100.0);
    assert_eq!(updated.entry(key("2024-4"), rent).unwrap().actual, 0.0);

    assert!(matches!(
        LedgerService::set_actual(&ledger, rent, key("2024-3"), -1.0),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        LedgerService::set_actual(&ledger, uuid::Uuid::new_v4(), key("2024-3"), 1.0),
        Err(CoreError::NotFound(_))
    ));
}

#[test]
fn aggregate_total_counts_zero_entries_but_series_skips_them() {
    let (ledger, _) = rent_ledger();
    let ledger = LedgerService::add_category(&ledger, key("2024-3"), "Utilities", 0.0)
        .expect("add")
        .ledger;
    let ledger = LedgerService::add_category(&ledger, key("2024-3"), "Payroll", 1000.0)
        .expect("add")
        .ledger;

    let view = SummaryService::aggregate(&ledger, key("2024-3"), ViewMode::Allocation, false);
    assert_eq!(view.total, 4000.0);
    let names: Vec<_> = view.series.iter().map(|point| point.name.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Payroll"]);
    assert_eq!(view.series[1].value, 1000.0);
}

#[test]
fn aggregate_percentages_sum_to_hundred() {
    let mut ledger = BudgetLedger::new();
    for (name, amount) in [("Rent", 3000.0), ("Ads", 700.0), ("Tools", 333.33)] {
        ledger = LedgerService::add_category(&ledger, key("2024-5"), name, amount)
            .expect("add")
            .ledger;
    }
    let view = SummaryService::aggregate(&ledger, key("2024-5"), ViewMode::Allocation, true);
    let sum: f64 = view.series.iter().map(|point| point.value).sum();
    assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
}

#[test]
fn aggregate_with_zero_total_has_no_division_error() {
    let (ledger, _) = rent_ledger();
    let view = SummaryService::aggregate(&ledger, key("2024-4"), ViewMode::Allocation, true);
    assert_eq!(view.total, 0.0);
    assert!(view.series.iter().all(|point| point.value == 0.0));

    let missing = SummaryService::aggregate(&ledger, key("2030-1"), ViewMode::Actual, true);
    assert_eq!(missing.total, 0.0);
    assert!(missing.is_empty());
}

#[test]
fn aggregate_colors_wrap_around_palette() {
    let mut ledger = BudgetLedger::new();
    for idx in 0..5 {
        ledger = LedgerService::add_category(&ledger, key("2024-1"), &format!("C{idx}"), 10.0)
            .expect("add")
            .ledger;
    }
    let options = AggregateOptions {
        palette_size: 3,
        order: SeriesOrder::Ledger,
    };
    let view =
        SummaryService::aggregate_with(&ledger, key("2024-1"), ViewMode::Allocation, false, options);
    let colors: Vec<_> = view.series.iter().map(|point| point.color_index).collect();
    assert_eq!(colors, vec![0, 1, 2, 0, 1]);
}

#[test]
fn aggregate_value_descending_breaks_ties_by_name() {
    let mut ledger = BudgetLedger::new();
    for (name, amount) in [("Zeta", 50.0), ("Alpha", 50.0), ("Big", 90.0)] {
        ledger = LedgerService::add_category(&ledger, key("2024-2"), name, amount)
            .expect("add")
            .ledger;
    }
    let options = AggregateOptions {
        palette_size: 8,
        order: SeriesOrder::ValueDescending,
    };
    let view =
        SummaryService::aggregate_with(&ledger, key("2024-2"), ViewMode::Allocation, false, options);
    let names: Vec<_> = view.series.iter().map(|point| point.name.as_str()).collect();
    assert_eq!(names, vec!["Big", "Alpha", "Zeta"]);
    assert_eq!(view.series[0].color_index, 0);
}

#[test]
fn progress_and_month_totals() {
    let (ledger, rent) = rent_ledger();
    let ledger = LedgerService::set_actual(&ledger, rent, key("2024-3"), 1500.0).expect("set");

    let rows = SummaryService::progress(&ledger, key("2024-3"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].totals.fraction, 0.5);
    assert_eq!(rows[0].totals.percent, Some(50.0));
    assert_eq!(rows[0].totals.status, ProgressStatus::Under);

    let totals = SummaryService::month_totals(&ledger, key("2024-3"));
    assert_eq!(totals.category_count, 1);
    assert_eq!(totals.totals.remaining, 1500.0);

    let empty = SummaryService::month_totals(&ledger, key("2024-4"));
    assert_eq!(empty.totals.status, ProgressStatus::Empty);
}

#[test]
fn end_to_end_budget_scenario() {
    let ledger = LedgerService::ensure_month(&BudgetLedger::new(), key("2024-1"));
    assert!(ledger.bucket(key("2024-1")).unwrap().categories.is_empty());

    let added = LedgerService::add_category(&ledger, key("2024-1"), "Rent", 3000.0).expect("add");
    let rent = added.id;
    let january = added.ledger.entry(key("2024-1"), rent).unwrap();
    assert_eq!((january.allocation, january.actual), (3000.0, 0.0));

    let ledger = LedgerService::ensure_month(&added.ledger, key("2024-2"));
    let february = ledger.entry(key("2024-2"), rent).expect("same id in february");
    assert_eq!(
        (february.name.as_str(), february.allocation, february.actual),
        ("Rent", 0.0, 0.0)
    );

    let ledger = LedgerService::set_actual(&ledger, rent, key("2024-1"), 3100.0).expect("set");
    assert_eq!(ledger.entry(key("2024-1"), rent).unwrap().actual, 3100.0);

    let view = SummaryService::aggregate(&ledger, key("2024-1"), ViewMode::Actual, false);
    assert_eq!(view.total, 3100.0);
    assert_eq!(view.series.len(), 1);
    assert_eq!(view.series[0].name, "Rent");
    assert_eq!(view.series[0].value, 3100.0);
}

#[test]
fn transaction_feed_sums_tagged_expenses() {
    let (ledger, rent) = rent_ledger();
    let transactions = vec![
        Transaction::expense(date(2024, 3, 1), 1500.0).with_category(rent),
        Transaction::expense(date(2024, 3, 15), 1600.0).with_category(rent),
        Transaction::expense(date(2024, 4, 1), 99.0).with_category(rent),
        Transaction::expense(date(2024, 3, 2), 42.0),
        Transaction::income(date(2024, 3, 5), 8000.0).with_category(rent),
    ];
    let actuals = TransactionActuals::new(&transactions)
        .monthly_actuals(key("2024-3"))
        .expect("feed");
    assert_eq!(actuals.amounts.get(&rent), Some(&3100.0));
    assert_eq!(actuals.amounts.len(), 1);
}

#[test]
fn apply_actuals_zeroes_missing_and_reports_orphans() {
    let (ledger, rent) = rent_ledger();
    let added = LedgerService::add_category(&ledger, key("2024-3"), "Ads", 200.0).expect("add");
    let ledger = LedgerService::set_actual(&added.ledger, added.id, key("2024-3"), 80.0)
        .expect("set");
    let stranger = uuid::Uuid::new_v4();

    let report = MonthlyActuals::new(key("2024-3"))
        .with_amount(rent, 2900.0)
        .with_amount(stranger, 5.0);
    let applied = ActualsService::apply(&ledger, &report).expect("apply");

    assert_eq!(applied.updated, 2);
    assert_eq!(applied.orphaned, vec![stranger]);
    assert_eq!(applied.ledger.entry(key("2024-3"), rent).unwrap().actual, 2900.0);
    assert_eq!(applied.ledger.entry(key("2024-3"), added.id).unwrap().actual, 0.0);
}

#[test]
fn apply_actuals_rejects_negative_amounts_without_changes() {
    let (ledger, rent) = rent_ledger();
    let report = MonthlyActuals::new(key("2024-3")).with_amount(rent, -1.0);
    assert!(matches!(
        ActualsService::apply(&ledger, &report),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn transaction_feed_rejects_non_finite_amounts() {
    let rent = uuid::Uuid::new_v4();
    let transactions = vec![Transaction::expense(date(2024, 3, 1), f64::NAN).with_category(rent)];
    let result = TransactionActuals::new(&transactions).monthly_actuals(key("2024-3"));
    assert!(matches!(result, Err(FeedError::Malformed(_))));
}

#[test]
fn monthly_metrics_compute_net_and_savings_rate() {
    let transactions = vec![
        Transaction::income(date(2024, 6, 1), 10_000.0),
        Transaction::expense(date(2024, 6, 3), 6_000.0),
        Transaction::expense(date(2024, 7, 3), 500.0),
    ];
    let metrics = MetricsService::monthly_metrics(&transactions, key("2024-6"));
    assert_eq!(metrics.income, 10_000.0);
    assert_eq!(metrics.expenses, 6_000.0);
    assert_eq!(metrics.net_cash_flow, 4_000.0);
    assert_eq!(metrics.savings_rate, Some(40.0));
    assert_eq!(metrics.transaction_count, 2);

    let july = MetricsService::monthly_metrics(&transactions, key("2024-7"));
    assert_eq!(july.savings_rate, None);
    assert_eq!(july.net_cash_flow, -500.0);
}

#[test]
fn cash_flow_covers_empty_months() {
    let transactions = vec![
        Transaction::income(date(2024, 11, 10), 300.0),
        Transaction::expense(date(2025, 1, 10), 100.0),
    ];
    let points = MetricsService::cash_flow(&transactions, key("2024-11"), key("2025-1"));
    let months: Vec<_> = points.iter().map(|point| point.month.to_string()).collect();
    assert_eq!(months, vec!["2024-11", "2024-12", "2025-1"]);
    assert_eq!(points[1].net, 0.0);
    assert_eq!(points[2].net, -100.0);

    assert!(MetricsService::cash_flow(&transactions, key("2025-1"), key("2024-11")).is_empty());
}

#[test]
fn cash_flow_ends_at_last_representable_month() {
    let last = MonthKey::latest();
    let points = MetricsService::cash_flow(&[], last.previous(), last);
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].month, last);
}

#[test]
fn budget_comparison_reports_overspend() {
    let (ledger, rent) = rent_ledger();
    let ledger = LedgerService::set_actual(&ledger, rent, key("2024-3"), 3200.0).expect("set");
    let rows = MetricsService::budget_comparison(&ledger, key("2024-3"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].difference, -200.0);
    assert_eq!(rows[0].status, ProgressStatus::Over);
}
