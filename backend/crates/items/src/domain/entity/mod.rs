pub mod cart;
pub mod item;
pub mod sale;
pub mod stock;
