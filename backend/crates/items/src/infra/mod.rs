pub mod postgres;

pub use postgres::{PgItemStore, PgStockTransaction};
