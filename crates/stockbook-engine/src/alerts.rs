//! Minimum-stock alert checks.

use chrono::Utc;
use stockbook_core::{PositionCode, ProductRef, Qty};
use stockbook_store::{AlertId, StockAlert};
use stockbook_telemetry::Metrics;
use tracing::warn;

use crate::engine::Stock;

impl Stock {
    /// Register a minimum-stock alert for a product, optionally
    /// scoped to one position.
    pub fn set_alert(
        &self,
        product: ProductRef,
        position: Option<PositionCode>,
        min_quantity: Qty,
    ) -> AlertId {
        self.store().add_alert(product, position, min_quantity)
    }

    /// Deactivate an alert; returns false when the id is unknown.
    pub fn clear_alert(&self, id: AlertId) -> bool {
        self.store().deactivate_alert(id)
    }

    /// Check every active alert (optionally narrowed to one product)
    /// against today's availability. Counts physical stock and
    /// already-due planned stock only; future production does not
    /// mask a present shortage.
    ///
    /// Triggered alerts are stamped and returned with the availability
    /// that tripped them.
    pub fn check_alerts(&self, product: Option<&ProductRef>) -> Vec<(StockAlert, Qty)> {
        let now = Utc::now();
        let today = now.date_naive();
        let mut triggered = Vec::new();

        for alert_cell in self.store().alerts() {
            let mut alert = alert_cell.lock();
            if !alert.is_active {
                continue;
            }
            if let Some(p) = product {
                if &alert.product != p {
                    continue;
                }
            }

            let mut total = Qty::ZERO;
            for quant in self.store().quants_for_product(&alert.product) {
                if let Some(pos) = &alert.position {
                    if quant.position.as_ref() != Some(pos) {
                        continue;
                    }
                }
                if quant.is_future(today) {
                    continue;
                }
                total += quant.balance();
            }

            let held = self.held_total(&alert.product, today, alert.position.as_ref(), now);
            let available = total - held;

            if available < alert.min_quantity {
                alert.last_triggered_at = Some(now);
                warn!(
                    alert_id = %alert.id,
                    product = %alert.product,
                    min_quantity = %alert.min_quantity,
                    available = %available,
                    position = %alert
                        .position
                        .as_ref()
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "all".to_string()),
                    "stock.alert.triggered"
                );
                Metrics::alert_triggered();
                triggered.push((alert.clone(), available));
            }
        }

        triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockbook_store::Coordinate;

    fn product() -> ProductRef {
        ProductRef::new("sku", 1)
    }

    #[test]
    fn test_alert_triggers_below_minimum() {
        let stock = Stock::with_defaults();
        stock
            .receive(
                Qty::new(dec!(4)),
                Coordinate::physical(product(), Some("vitrine".into())),
                "receipt",
                None,
            )
            .unwrap();
        stock.set_alert(product(), None, Qty::new(dec!(5)));

        let triggered = stock.check_alerts(None);
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].1, Qty::new(dec!(4)));
        assert!(triggered[0].0.last_triggered_at.is_some());
    }

    #[test]
    fn test_alert_quiet_at_or_above_minimum() {
        let stock = Stock::with_defaults();
        stock
            .receive(
                Qty::new(dec!(5)),
                Coordinate::physical(product(), Some("vitrine".into())),
                "receipt",
                None,
            )
            .unwrap();
        stock.set_alert(product(), None, Qty::new(dec!(5)));

        assert!(stock.check_alerts(None).is_empty());
    }

    #[test]
    fn test_deactivated_alert_is_skipped() {
        let stock = Stock::with_defaults();
        let id = stock.set_alert(product(), None, Qty::new(dec!(5)));
        stock.clear_alert(id);

        assert!(stock.check_alerts(None).is_empty());
    }

    #[test]
    fn test_holds_count_against_alert_availability() {
        let stock = Stock::with_defaults();
        stock
            .receive(
                Qty::new(dec!(10)),
                Coordinate::physical(product(), Some("vitrine".into())),
                "receipt",
                None,
            )
            .unwrap();
        stock
            .hold(Qty::new(dec!(8)), product(), None, None, None)
            .unwrap();
        stock.set_alert(product(), None, Qty::new(dec!(5)));

        let triggered = stock.check_alerts(None);
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].1, Qty::new(dec!(2)));
    }
}
