//! Cart quantity rules

use crate::error::{ItemError, ItemResult};

/// Cart quantity after adding `requested` units.
///
/// The result may not exceed the active stock `available`.
pub fn quantity_after_add(in_cart: i32, requested: i32, available: i32) -> ItemResult<i32> {
    if requested <= 0 {
        return Err(ItemError::Validation("quantity must be positive".to_string()));
    }

    let total = i64::from(in_cart) + i64::from(requested);
    if total > i64::from(available) {
        return Err(ItemError::ExceedsAvailable);
    }

    // Bounded by `available`, so it fits.
    Ok(total as i32)
}

/// Cart quantity after removing `removed` units; `None` drops the line.
pub fn quantity_after_remove(in_cart: i32, removed: i32) -> ItemResult<Option<i32>> {
    if removed <= 0 {
        return Err(ItemError::Validation("quantity must be positive".to_string()));
    }

    Ok((in_cart > removed).then(|| in_cart - removed))
}
