//! SeaORM implementation of InvoiceDetailRepository
//!
//! Owns the line-item consistency rule: `total = price * qty` is computed
//! here on create and recomputed inside a transaction on every update that
//! touches price or qty, so a stale or null total can never be persisted.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set, TransactionTrait,
};

use crate::domain::{
    CreateInvoiceDetailInput, DomainError, InvoiceDetailPatch, InvoiceDetailRepository,
};
use crate::models::invoice_detail::{ActiveModel, Entity as DetailEntity, Model};

pub struct SeaOrmInvoiceDetailRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceDetailRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn line_total(price: f64, qty: i32) -> f64 {
    price * qty as f64
}

#[async_trait]
impl InvoiceDetailRepository for SeaOrmInvoiceDetailRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(DetailEntity::find().all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        Ok(DetailEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CreateInvoiceDetailInput) -> Result<Model, DomainError> {
        let detail = ActiveModel {
            invoice_id: Set(input.invoice_id),
            product_id: Set(input.product_id),
            price: Set(input.price),
            qty: Set(input.qty),
            total: Set(line_total(input.price, input.qty)),
            ..Default::default()
        };
        // Bad invoice_id/product_id surface as FK violations -> Conflict.
        Ok(detail.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, patch: InvoiceDetailPatch) -> Result<Model, DomainError> {
        // Changed fields and the recomputed total commit together or not
        // at all.
        let txn = self.db.begin().await?;

        let detail = DetailEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        let new_price = patch.price.unwrap_or(detail.price);
        let new_qty = patch.qty.unwrap_or(detail.qty);
        let recompute = patch.price.is_some() || patch.qty.is_some();

        let mut active: ActiveModel = detail.into();
        if let Some(invoice_id) = patch.invoice_id {
            active.invoice_id = Set(invoice_id);
        }
        if let Some(product_id) = patch.product_id {
            active.product_id = Set(product_id);
        }
        if recompute {
            active.price = Set(new_price);
            active.qty = Set(new_qty);
            active.total = Set(line_total(new_price, new_qty));
        }

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Model, DomainError> {
        let detail = DetailEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let snapshot = detail.clone();
        detail.delete(&self.db).await?;
        Ok(snapshot)
    }
}
