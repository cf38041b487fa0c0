use expense_ledger::{core::services::AnalyticsService, init, ledger::Ledger, logging::tracing_diagnostics};

#[test]
fn ledger_add_and_summarize_smoke() {
    init();

    let mut ledger = Ledger::new(tracing_diagnostics());
    ledger
        .add("15/03/2024", "Groceries", "45.50", "Weekly shop")
        .unwrap();
    ledger.add("2024-03-20", "groceries", "4.50", "").unwrap();

    let summary = AnalyticsService::summary(&ledger).unwrap();
    assert_eq!(summary.total, 50.0);
    assert_eq!(AnalyticsService::by_category(&ledger).len(), 1);
}
