//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::shop::Shop;
pub use repository::ShopRepository;
