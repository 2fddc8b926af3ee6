//! Paging window for the sales summary

use crate::error::{ItemError, ItemResult};

pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 7;
pub const MAX_LIMIT: i64 = 31;

/// Days to skip and days to return, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesPage {
    pub offset: i64,
    pub limit: i64,
}

impl SalesPage {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> ItemResult<Self> {
        let offset = offset.unwrap_or(DEFAULT_OFFSET);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if offset < 0 {
            return Err(ItemError::Validation(
                "offset must be greater than or equal to 0".to_string(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ItemError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok(Self { offset, limit })
    }
}

impl Default for SalesPage {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
        }
    }
}
