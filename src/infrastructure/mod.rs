pub mod auth;
pub mod config;
pub mod db;
pub mod repositories;
pub mod state;

pub use repositories::{
    SeaOrmCategoryRepository, SeaOrmCustomerRepository, SeaOrmInvoiceDetailRepository,
    SeaOrmInvoiceRepository, SeaOrmProductRepository, SeaOrmUserRepository,
};
pub use state::AppState;
