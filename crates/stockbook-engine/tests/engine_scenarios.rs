//! End-to-end engine scenarios: ledger, availability, hold lifecycle
//! and planning working together.

use std::sync::Arc;

use chrono::{Days, Duration, Utc};
use rust_decimal_macros::dec;
use stockbook_catalog::{NoopSkuValidator, SkuValidation, SkuValidator, StaticCatalog};
use stockbook_core::{AvailabilityPolicy, HoldStatus, ProductRef, Qty, StockError};
use stockbook_engine::{Stock, StockSettings};
use stockbook_store::{Coordinate, StockStore};

fn qty(d: rust_decimal::Decimal) -> Qty {
    Qty::new(d)
}

fn product() -> ProductRef {
    ProductRef::new("sku", 1)
}

fn vitrine(p: &ProductRef) -> Coordinate {
    Coordinate::physical(p.clone(), Some("vitrine".into()))
}

fn stock_with_catalog(catalog: StaticCatalog) -> Stock {
    Stock::new(
        Arc::new(StockStore::new()),
        Arc::new(catalog),
        Arc::new(NoopSkuValidator),
        StockSettings::default(),
    )
}

#[test]
fn test_receive_makes_stock_available() {
    let stock = Stock::with_defaults();
    stock.receive(qty(dec!(100)), vitrine(&product()), "receipt", None).unwrap();
    assert_eq!(stock.available(&product(), None, None), qty(dec!(100)));
}

#[test]
fn test_hold_confirm_fulfill_lifecycle() {
    let stock = Stock::with_defaults();
    let quant = stock
        .receive(qty(dec!(100)), vitrine(&product()), "receipt", None)
        .unwrap();

    let token = stock.hold(qty(dec!(10)), product(), None, None, None).unwrap();
    assert_eq!(stock.available(&product(), None, None), qty(dec!(90)));

    // Confirmation blocks availability identically to pending.
    stock.confirm(&token).unwrap();
    assert_eq!(stock.available(&product(), None, None), qty(dec!(90)));

    let mv = stock.fulfill(&token, None).unwrap();
    assert_eq!(mv.delta, qty(dec!(-10)));
    assert_eq!(quant.balance(), qty(dec!(90)));

    let snapshot = stock.store().hold_by_token(&token).unwrap().snapshot();
    assert_eq!(snapshot.status, HoldStatus::Fulfilled);
    assert!(snapshot.resolved_at.is_some());

    // Fulfillment resolved the hold, so availability equals balance.
    assert_eq!(stock.available(&product(), None, None), qty(dec!(90)));
}

#[test]
fn test_hold_exceeding_availability_reports_remainder() {
    let stock = Stock::with_defaults();
    stock.receive(qty(dec!(5)), vitrine(&product()), "receipt", None).unwrap();

    stock.hold(qty(dec!(3)), product(), None, None, None).unwrap();
    let err = stock
        .hold(qty(dec!(5)), product(), None, None, None)
        .unwrap_err();
    assert_eq!(
        err,
        StockError::InsufficientAvailable {
            available: qty(dec!(2)),
            requested: qty(dec!(5)),
        }
    );
}

#[test]
fn test_hold_rejects_non_positive() {
    let stock = Stock::with_defaults();
    stock.receive(qty(dec!(10)), vitrine(&product()), "receipt", None).unwrap();

    for bad in [dec!(0), dec!(-1)] {
        let err = stock.hold(qty(bad), product(), None, None, None).unwrap_err();
        assert_eq!(err, StockError::InvalidQuantity { requested: qty(bad) });
    }
    // Nothing was reserved.
    assert_eq!(stock.available(&product(), None, None), qty(dec!(10)));
    assert_eq!(stock.committed(&product(), None), Qty::ZERO);
}

/// Validator that only knows `sku:1`.
struct CatalogOnlyValidator;

impl SkuValidator for CatalogOnlyValidator {
    fn validate_sku(&self, sku: &str) -> SkuValidation {
        if sku == "sku:1" {
            SkuValidation::accepted(sku)
        } else {
            SkuValidation::rejected(sku, "not_found")
        }
    }
}

#[test]
fn test_sku_validation_gates_receive_and_hold() {
    let stock = Stock::new(
        Arc::new(StockStore::new()),
        Arc::new(StaticCatalog::new()),
        Arc::new(CatalogOnlyValidator),
        StockSettings {
            validate_input_skus: true,
            ..StockSettings::default()
        },
    );
    let unknown = ProductRef::new("sku", 2);

    // Known SKU passes.
    stock.receive(qty(dec!(10)), vitrine(&product()), "receipt", None).unwrap();

    let err = stock
        .receive(qty(dec!(10)), vitrine(&unknown), "receipt", None)
        .unwrap_err();
    assert_eq!(err, StockError::InvalidSku { sku: "sku:2".into() });

    let err = stock
        .hold(qty(dec!(1)), unknown.clone(), None, None, None)
        .unwrap_err();
    assert_eq!(err, StockError::InvalidSku { sku: "sku:2".into() });
    assert_eq!(stock.available(&unknown, None, None), Qty::ZERO);
}

#[test]
fn test_expired_hold_excluded_without_sweep() {
    let stock = Stock::with_defaults();
    stock.receive(qty(dec!(100)), vitrine(&product()), "receipt", None).unwrap();

    let token = stock
        .hold(
            qty(dec!(10)),
            product(),
            None,
            None,
            Some(Utc::now() - Duration::minutes(1)),
        )
        .unwrap();

    // No sweep has run: persisted status is still pending, yet the
    // hold no longer counts.
    let snapshot = stock.store().hold_by_token(&token).unwrap().snapshot();
    assert_eq!(snapshot.status, HoldStatus::Pending);
    assert_eq!(stock.available(&product(), None, None), qty(dec!(100)));
    assert_eq!(stock.committed(&product(), None), Qty::ZERO);
}

#[test]
fn test_double_confirm_and_double_release_fail() {
    let stock = Stock::with_defaults();
    stock.receive(qty(dec!(10)), vitrine(&product()), "receipt", None).unwrap();

    let token = stock.hold(qty(dec!(2)), product(), None, None, None).unwrap();
    stock.confirm(&token).unwrap();
    assert!(matches!(
        stock.confirm(&token).unwrap_err(),
        StockError::InvalidStatus { .. }
    ));

    stock.release(&token, "customer cancelled").unwrap();
    assert!(matches!(
        stock.release(&token, "again").unwrap_err(),
        StockError::InvalidStatus { .. }
    ));
}

#[test]
fn test_fulfill_requires_confirmed() {
    let stock = Stock::with_defaults();
    stock.receive(qty(dec!(10)), vitrine(&product()), "receipt", None).unwrap();

    let token = stock.hold(qty(dec!(2)), product(), None, None, None).unwrap();
    assert!(matches!(
        stock.fulfill(&token, None).unwrap_err(),
        StockError::InvalidStatus { .. }
    ));
}

#[test]
fn test_malformed_and_unknown_tokens() {
    let stock = Stock::with_defaults();
    assert!(matches!(
        stock.confirm("not-a-token").unwrap_err(),
        StockError::InvalidHold { .. }
    ));
    assert!(matches!(
        stock.confirm("hold:999").unwrap_err(),
        StockError::InvalidHold { .. }
    ));
}

#[test]
fn test_zero_shelf_life_window() {
    let catalog = StaticCatalog::new();
    let croissant = product();
    catalog.register(croissant.clone(), Some(0), AvailabilityPolicy::PlannedOk);
    let stock = stock_with_catalog(catalog);

    let day = Utc::now().date_naive() + Days::new(2);
    stock.plan(qty(dec!(30)), croissant.clone(), day, None).unwrap();

    // Only valid on production day.
    assert_eq!(
        stock.available(&croissant, Some(day - Days::new(1)), None),
        Qty::ZERO
    );
    assert_eq!(
        stock.available(&croissant, Some(day), None),
        qty(dec!(30))
    );
    assert_eq!(
        stock.available(&croissant, Some(day + Days::new(1)), None),
        Qty::ZERO
    );
}

#[test]
fn test_demand_policy_creates_unbacked_hold() {
    let catalog = StaticCatalog::new();
    let p = product();
    catalog.register(p.clone(), None, AvailabilityPolicy::DemandOk);
    let stock = stock_with_catalog(catalog);

    // No stock at all.
    let token = stock.hold(qty(dec!(6)), p.clone(), None, None, None).unwrap();
    let snapshot = stock.store().hold_by_token(&token).unwrap().snapshot();
    assert!(snapshot.is_demand());
    assert_eq!(
        stock.demand(&p, Utc::now().date_naive()),
        qty(dec!(6))
    );

    // Demand cannot be fulfilled.
    stock.confirm(&token).unwrap();
    assert!(matches!(
        stock.fulfill(&token, None).unwrap_err(),
        StockError::HoldIsDemand { .. }
    ));
}

#[test]
fn test_stock_only_policy_ignores_planned_stock() {
    let catalog = StaticCatalog::new();
    let p = product();
    catalog.register(p.clone(), None, AvailabilityPolicy::StockOnly);
    let stock = stock_with_catalog(catalog);

    let friday = Utc::now().date_naive() + Days::new(3);
    stock.plan(qty(dec!(50)), p.clone(), friday, None).unwrap();

    let err = stock
        .hold(qty(dec!(10)), p.clone(), Some(friday), None, None)
        .unwrap_err();
    assert!(matches!(err, StockError::InsufficientAvailable { .. }));
}

#[test]
fn test_release_expired_sweeps_in_batches() {
    let stock = Stock::new(
        Arc::new(StockStore::new()),
        Arc::new(StaticCatalog::new()),
        Arc::new(NoopSkuValidator),
        StockSettings {
            expired_batch_size: 2,
            ..StockSettings::default()
        },
    );
    stock.receive(qty(dec!(100)), vitrine(&product()), "receipt", None).unwrap();

    let past = Utc::now() - Duration::minutes(5);
    let mut tokens = Vec::new();
    for _ in 0..5 {
        tokens.push(
            stock
                .hold(qty(dec!(1)), product(), None, None, Some(past))
                .unwrap(),
        );
    }
    // One live hold must survive the sweep.
    let live = stock.hold(qty(dec!(1)), product(), None, None, None).unwrap();

    assert_eq!(stock.release_expired(), 5);
    assert_eq!(stock.release_expired(), 0);

    for token in tokens {
        let snapshot = stock.store().hold_by_token(&token).unwrap().snapshot();
        assert_eq!(snapshot.status, HoldStatus::Released);
        assert_eq!(snapshot.release_reason.as_deref(), Some("expired"));
    }
    let snapshot = stock.store().hold_by_token(&live).unwrap().snapshot();
    assert_eq!(snapshot.status, HoldStatus::Pending);
}

#[test]
fn test_plan_realize_transfers_stock_and_holds() {
    let stock = Stock::with_defaults();
    let p = product();
    let friday = Utc::now().date_naive() + Days::new(3);

    let planned = stock.plan(qty(dec!(50)), p.clone(), friday, None).unwrap();
    assert_eq!(stock.available(&p, Some(friday), None), qty(dec!(50)));

    // Hold binds to the planned quant under the default policy.
    let token = stock
        .hold(qty(dec!(10)), p.clone(), Some(friday), None, None)
        .unwrap();
    let bound = stock.store().hold_by_token(&token).unwrap().snapshot();
    assert_eq!(bound.quant, Some(planned.id));

    let physical = stock
        .realize(p.clone(), friday, qty(dec!(45)), "vitrine".into(), "morning bake")
        .unwrap();

    // Reconcile -5, then -45/+45 transfer pair.
    let planned_moves = stock.store().moves_for_quant(planned.id);
    assert_eq!(planned_moves.len(), 3);
    assert_eq!(planned_moves[1].delta, qty(dec!(-5)));
    assert_eq!(planned_moves[2].delta, qty(dec!(-45)));
    assert_eq!(planned.balance(), Qty::ZERO);
    assert_eq!(physical.balance(), qty(dec!(45)));

    // In-flight hold survived the transition onto the physical quant.
    let carried = stock.store().hold_by_token(&token).unwrap().snapshot();
    assert_eq!(carried.quant, Some(physical.id));
    assert_eq!(carried.status, HoldStatus::Pending);
    assert_eq!(stock.available(&p, Some(friday), None), qty(dec!(35)));

    // Ledger and caches still agree everywhere.
    assert_eq!(stock.recalculate(&planned), Qty::ZERO);
    assert_eq!(stock.recalculate(&physical), qty(dec!(45)));
}

#[test]
fn test_replan_adjusts_existing_plan() {
    let stock = Stock::with_defaults();
    let p = product();
    let friday = Utc::now().date_naive() + Days::new(3);

    stock.plan(qty(dec!(50)), p.clone(), friday, None).unwrap();
    let quant = stock
        .replan(qty(dec!(70)), p.clone(), friday, "extra orders")
        .unwrap();
    assert_eq!(quant.balance(), qty(dec!(70)));

    let missing = friday + Days::new(1);
    assert!(matches!(
        stock
            .replan(qty(dec!(10)), p.clone(), missing, "no plan")
            .unwrap_err(),
        StockError::QuantNotFound { .. }
    ));
}

#[test]
fn test_position_filter_scopes_availability() {
    let stock = Stock::with_defaults();
    let p = product();
    stock.receive(qty(dec!(30)), vitrine(&p), "receipt", None).unwrap();
    stock
        .receive(
            qty(dec!(20)),
            Coordinate::physical(p.clone(), Some("depot".into())),
            "receipt",
            None,
        )
        .unwrap();

    assert_eq!(stock.available(&p, None, None), qty(dec!(50)));
    assert_eq!(
        stock.available(&p, None, Some(&"vitrine".into())),
        qty(dec!(30))
    );
    assert_eq!(
        stock.available(&p, None, Some(&"depot".into())),
        qty(dec!(20))
    );
}

#[test]
fn test_default_ttl_applies_to_new_holds() {
    let stock = Stock::new(
        Arc::new(StockStore::new()),
        Arc::new(StaticCatalog::new()),
        Arc::new(NoopSkuValidator),
        StockSettings {
            hold_ttl_minutes: 30,
            ..StockSettings::default()
        },
    );
    stock.receive(qty(dec!(10)), vitrine(&product()), "receipt", None).unwrap();

    let token = stock.hold(qty(dec!(1)), product(), None, None, None).unwrap();
    let snapshot = stock.store().hold_by_token(&token).unwrap().snapshot();
    let expires = snapshot.expires_at.expect("ttl stamped");
    let minutes = (expires - Utc::now()).num_minutes();
    assert!((29..=30).contains(&minutes));
}
