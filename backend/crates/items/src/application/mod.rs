//! Application Layer

pub mod cart;
pub mod catalog;
pub mod confirm_purchase;
pub mod receive_shipment;
pub mod sales;
pub mod shop_stock;

pub use cart::CartUseCase;
pub use catalog::CatalogUseCase;
pub use confirm_purchase::{ConfirmPurchaseUseCase, PurchaseReceipt};
pub use receive_shipment::{IntakeOutcome, ReceiveShipmentInput, ReceiveShipmentUseCase};
pub use sales::SalesReportUseCase;
pub use shop_stock::ShopStockUseCase;
