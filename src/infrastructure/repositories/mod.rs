//! SeaORM implementations of the domain repository traits

mod category_repository;
mod customer_repository;
mod invoice_detail_repository;
mod invoice_repository;
mod product_repository;
mod user_repository;

pub use category_repository::SeaOrmCategoryRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use invoice_detail_repository::SeaOrmInvoiceDetailRepository;
pub use invoice_repository::SeaOrmInvoiceRepository;
pub use product_repository::SeaOrmProductRepository;
pub use user_repository::SeaOrmUserRepository;

/// Current UTC time in the storage format used for all timestamps.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
