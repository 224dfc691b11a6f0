//! Perishability windows.
//!
//! Decides whether a quant's stock is still usable on a target date,
//! given the product's shelf life (days a unit remains valid after
//! production).
//!
//! Examples:
//! - croissant (shelf life 0): only valid on production day
//! - cake (shelf life 3): valid for 3 days after production
//! - wine (no shelf life): never expires

use chrono::{Days, NaiveDate};
use stockbook_store::Quant;

/// Is this quant's stock usable on `target`?
///
/// No shelf life: physical stock always qualifies; planned stock
/// qualifies once its production date is not past the target.
///
/// Shelf life of `k` days: units produced before `target - k` are
/// already spoiled by `target`. Physical stock is judged by its
/// creation date (the production-date proxy); planned stock by its
/// scheduled date, which must also not be after the target.
pub fn quant_in_window(quant: &Quant, shelf_life_days: Option<u32>, target: NaiveDate) -> bool {
    let shelf_life = match shelf_life_days {
        None => {
            return match quant.target_date {
                None => true,
                Some(d) => d <= target,
            };
        }
        Some(days) => days,
    };

    let min_production = target
        .checked_sub_days(Days::new(u64::from(shelf_life)))
        .unwrap_or(NaiveDate::MIN);

    match quant.target_date {
        None => quant.created_at.date_naive() >= min_production,
        Some(d) => min_production <= d && d <= target,
    }
}
