//! Application Layer

pub mod create_shop;
pub mod shop_access;

pub use create_shop::{CreateShopInput, CreateShopUseCase};
pub use shop_access::ShopAccessUseCase;
