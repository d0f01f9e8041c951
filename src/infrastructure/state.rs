//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{
    CategoryRepository, CustomerRepository, InvoiceDetailRepository, InvoiceRepository,
    ProductRepository, UserRepository,
};
use crate::infrastructure::{
    SeaOrmCategoryRepository, SeaOrmCustomerRepository, SeaOrmInvoiceDetailRepository,
    SeaOrmInvoiceRepository, SeaOrmProductRepository, SeaOrmUserRepository,
};

/// Application state shared across all handlers. Owned by the process
/// entry point: the database handle is opened at startup and dropped at
/// shutdown, never held in a global.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Root of served static files (product images live underneath).
    pub static_dir: PathBuf,
    pub user_repo: Arc<dyn UserRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub invoice_repo: Arc<dyn InvoiceRepository>,
    pub invoice_detail_repo: Arc<dyn InvoiceDetailRepository>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_repo: Arc::new(SeaOrmUserRepository::new(db.clone())),
            category_repo: Arc::new(SeaOrmCategoryRepository::new(db.clone())),
            customer_repo: Arc::new(SeaOrmCustomerRepository::new(db.clone())),
            product_repo: Arc::new(SeaOrmProductRepository::new(db.clone())),
            invoice_repo: Arc::new(SeaOrmInvoiceRepository::new(db.clone())),
            invoice_detail_repo: Arc::new(SeaOrmInvoiceDetailRepository::new(db.clone())),
            static_dir: static_dir.into(),
            db,
        }
    }

    /// Read-only access for the report aggregator.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
