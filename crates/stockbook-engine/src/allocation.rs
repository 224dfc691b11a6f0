//! FIFO allocation — which quant a new hold binds to.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use stockbook_core::{ProductRef, Qty};
use stockbook_store::Quant;

use crate::engine::Stock;
use crate::shelflife::quant_in_window;

impl Stock {
    /// First (oldest-created) eligible quant whose individual live
    /// availability covers `quantity`. Advisory: the caller must lock
    /// the quant and re-verify before binding a hold to it.
    ///
    /// A request only the aggregate of several quants could satisfy
    /// yields `None`; holds are never split across quants.
    /// `physical_only` excludes planned quants (the `stock_only`
    /// policy).
    pub(crate) fn find_quant_for_hold(
        &self,
        product: &ProductRef,
        target: NaiveDate,
        quantity: Qty,
        physical_only: bool,
    ) -> Option<Arc<Quant>> {
        let shelf_life = self.catalog().shelf_life_days(product);
        let now = Utc::now();

        let mut candidates: Vec<Arc<Quant>> = self
            .store()
            .quants_for_product(product)
            .into_iter()
            .filter(|q| !(physical_only && q.is_planned()))
            .filter(|q| quant_in_window(q, shelf_life, target))
            .collect();
        candidates.sort_by_key(|q| q.created_at);

        candidates.into_iter().find(|quant| {
            let available = quant.balance() - self.store().held_for_quant(quant.id, now);
            available >= quantity
        })
    }
}
