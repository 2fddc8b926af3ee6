//! Shops Backend Module
//!
//! Shop creation and listing, plus owner-managed shop access grants.
//! Grant storage itself lives in `auth`, which also enforces it.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use error::{ShopError, ShopResult};
pub use infra::postgres::PgShopRepository;
pub use presentation::router::shops_router;
