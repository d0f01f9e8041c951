//! Repository trait definitions
//!
//! One trait per entity; implementations live in the infrastructure layer.
//! All validation and consistency rules (line-item totals, delete guards,
//! uniqueness) are enforced behind these traits so handlers never touch SQL.

use async_trait::async_trait;
use serde::Serialize;

use super::DomainError;
use crate::models::{category, customer, invoice, invoice_detail, product, user};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Input for creating a user. The password is hashed before it gets here.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Partial update: only supplied fields change.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<user::Model>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DomainError>;
    async fn create(&self, input: CreateUserInput) -> Result<user::Model, DomainError>;
    async fn update(&self, id: i32, patch: UserPatch) -> Result<user::Model, DomainError>;
    /// Delete and return the pre-deletion snapshot.
    async fn delete(&self, id: i32) -> Result<user::Model, DomainError>;
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<category::Model>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, DomainError>;
    async fn create(&self, name: String) -> Result<category::Model, DomainError>;
    async fn rename(&self, id: i32, name: String) -> Result<category::Model, DomainError>;
    /// Fails with Conflict while products still reference the category.
    async fn delete(&self, id: i32) -> Result<category::Model, DomainError>;
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<customer::Model>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<customer::Model>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<customer::Model>, DomainError>;
    async fn create(&self, input: CreateCustomerInput) -> Result<customer::Model, DomainError>;
    async fn update(&self, id: i32, patch: CustomerPatch)
        -> Result<customer::Model, DomainError>;
    /// Fails with Conflict while invoices still reference the customer.
    async fn delete(&self, id: i32) -> Result<customer::Model, DomainError>;
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub description: Option<String>,
    pub category_id: i32,
    /// Relative path of an already-saved upload, if any.
    pub image: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub image: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.image.is_none()
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<product::Model>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<product::Model>, DomainError>;
    /// Fails with Validation when category_id does not resolve.
    async fn create(&self, input: CreateProductInput) -> Result<product::Model, DomainError>;
    async fn update(&self, id: i32, patch: ProductPatch) -> Result<product::Model, DomainError>;
    /// Fails with Conflict while invoice line items still reference the product.
    async fn delete(&self, id: i32) -> Result<product::Model, DomainError>;
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    pub user_id: i32,
    pub customer_id: Option<i32>,
    pub total_amount: f64,
    pub status: String,
}

#[derive(Debug, Default, Clone)]
pub struct InvoicePatch {
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
}

impl InvoicePatch {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.customer_id.is_none()
            && self.total_amount.is_none()
            && self.status.is_none()
    }
}

/// One line item within an invoice, enriched with the product name.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    pub id: i32,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub price: f64,
    pub qty: i32,
    pub total: f64,
}

/// Invoice with its line items, as returned by `GET /invoice/id/{id}`.
#[derive(Debug, Serialize)]
pub struct InvoiceWithLines {
    #[serde(flatten)]
    pub invoice: invoice::Model,
    pub details: Vec<InvoiceLine>,
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<invoice::Model>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<InvoiceWithLines>, DomainError>;
    async fn create(&self, input: CreateInvoiceInput) -> Result<invoice::Model, DomainError>;
    async fn update(&self, id: i32, patch: InvoicePatch) -> Result<invoice::Model, DomainError>;
    /// Fails with Conflict while line items still reference the invoice.
    async fn delete(&self, id: i32) -> Result<invoice::Model, DomainError>;
}

// ---------------------------------------------------------------------------
// Invoice details
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateInvoiceDetailInput {
    pub invoice_id: i32,
    pub product_id: i32,
    pub price: f64,
    pub qty: i32,
}

#[derive(Debug, Default, Clone)]
pub struct InvoiceDetailPatch {
    pub invoice_id: Option<i32>,
    pub product_id: Option<i32>,
    pub price: Option<f64>,
    pub qty: Option<i32>,
}

impl InvoiceDetailPatch {
    pub fn is_empty(&self) -> bool {
        self.invoice_id.is_none()
            && self.product_id.is_none()
            && self.price.is_none()
            && self.qty.is_none()
    }
}

#[async_trait]
pub trait InvoiceDetailRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<invoice_detail::Model>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<invoice_detail::Model>, DomainError>;
    /// Computes `total = price * qty` before insertion.
    async fn create(
        &self,
        input: CreateInvoiceDetailInput,
    ) -> Result<invoice_detail::Model, DomainError>;
    /// Applies the patch and recomputes `total` from the new price/qty and
    /// the stored value for whichever was not supplied, atomically.
    async fn update(
        &self,
        id: i32,
        patch: InvoiceDetailPatch,
    ) -> Result<invoice_detail::Model, DomainError>;
    async fn delete(&self, id: i32) -> Result<invoice_detail::Model, DomainError>;
}
