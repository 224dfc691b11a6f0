//! Catalog seams for the stockbook engine.
//!
//! The engine never inspects product objects. It resolves exactly two
//! attributes — shelf life and availability policy — through the
//! `ProductCatalog` trait, and optionally validates input SKUs through
//! the `SkuValidator` trait. Both are constructed once at startup and
//! injected, never ambient globals.

pub mod catalog;
pub mod sku;

pub use catalog::{DefaultCatalog, ProductCatalog, ProductTraits, StaticCatalog};
pub use sku::{NoopSkuValidator, SkuValidation, SkuValidator};
