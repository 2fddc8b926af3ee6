//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ItemAppState;
pub use router::{items_router, items_router_generic};
