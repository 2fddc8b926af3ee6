//! Items Backend Module
//!
//! Catalog, per-shop stock with a FIFO replenishment queue, carts, purchase
//! confirmation and the sale ledger.
//!
//! Stock changes that span several rows go through
//! [`domain::repository::StockTransaction`]: receiving a shipment, cart
//! edits and purchase confirmation each run in one transaction.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use error::{ItemError, ItemResult};
pub use infra::postgres::PgItemStore;
pub use presentation::router::items_router;
