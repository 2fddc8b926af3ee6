//! Pure domain rules

pub mod cart_rules;
pub mod sales_page;

pub use sales_page::SalesPage;
