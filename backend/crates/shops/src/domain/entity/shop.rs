//! Shop Entity

use chrono::{DateTime, Utc};
use kernel::id::ShopId;

use crate::error::{ShopError, ShopResult};

const CITY_MAX_LENGTH: usize = 32;
const ADDRESS_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    pub shop_id: ShopId,
    pub city: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Shop {
    /// Create a new shop, validating field widths.
    pub fn new(city: String, address: String) -> ShopResult<Self> {
        let city = city.trim().to_string();
        let address = address.trim().to_string();

        check_field("city", &city, CITY_MAX_LENGTH)?;
        check_field("address", &address, ADDRESS_MAX_LENGTH)?;

        Ok(Self {
            shop_id: ShopId::new(),
            city,
            address,
            created_at: Utc::now(),
        })
    }
}

fn check_field(name: &str, value: &str, max: usize) -> ShopResult<()> {
    if value.is_empty() {
        return Err(ShopError::Validation(format!("{} cannot be empty", name)));
    }
    if value.chars().count() > max {
        return Err(ShopError::Validation(format!(
            "{} must be at most {} characters",
            name, max
        )));
    }
    Ok(())
}
