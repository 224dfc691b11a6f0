//! The `Stock` facade — constructed once, shared behind an `Arc`.

use std::sync::Arc;

use stockbook_catalog::{DefaultCatalog, NoopSkuValidator, ProductCatalog, SkuValidator};
use stockbook_store::StockStore;

use crate::config::StockSettings;

/// Stock engine over a shared store, with injected collaborators.
///
/// All operations live in the sibling modules as inherent methods:
/// ledger (receive/issue/adjust), availability queries, hold
/// lifecycle, planning and alerts.
pub struct Stock {
    store: Arc<StockStore>,
    catalog: Arc<dyn ProductCatalog>,
    skus: Arc<dyn SkuValidator>,
    settings: StockSettings,
}

impl Stock {
    pub fn new(
        store: Arc<StockStore>,
        catalog: Arc<dyn ProductCatalog>,
        skus: Arc<dyn SkuValidator>,
        settings: StockSettings,
    ) -> Self {
        Self {
            store,
            catalog,
            skus,
            settings,
        }
    }

    /// Fresh engine with a fresh store, default catalog and the
    /// permissive SKU validator. The usual constructor for tests.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(StockStore::new()),
            Arc::new(DefaultCatalog),
            Arc::new(NoopSkuValidator),
            StockSettings::default(),
        )
    }

    /// The shared record store.
    #[must_use]
    pub fn store(&self) -> &Arc<StockStore> {
        &self.store
    }

    #[must_use]
    pub fn settings(&self) -> &StockSettings {
        &self.settings
    }

    pub(crate) fn catalog(&self) -> &dyn ProductCatalog {
        self.catalog.as_ref()
    }

    pub(crate) fn skus(&self) -> &dyn SkuValidator {
        self.skus.as_ref()
    }
}

impl std::fmt::Debug for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stock")
            .field("quants", &self.store.quant_count())
            .field("moves", &self.store.move_count())
            .field("settings", &self.settings)
            .finish()
    }
}
