pub mod category;
pub mod customer;
pub mod invoice;
pub mod invoice_detail;
pub mod product;
pub mod user;
