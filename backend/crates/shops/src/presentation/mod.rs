//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ShopAppState;
pub use router::{shops_router, shops_router_generic};
