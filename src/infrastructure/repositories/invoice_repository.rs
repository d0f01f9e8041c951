//! SeaORM implementation of InvoiceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::domain::{
    CreateInvoiceInput, DomainError, InvoiceLine, InvoicePatch, InvoiceRepository,
    InvoiceWithLines,
};
use crate::models::invoice::{ActiveModel, Entity as InvoiceEntity, Model};
use crate::models::invoice_detail::{Column as DetailColumn, Entity as DetailEntity};
use crate::models::product::Entity as ProductEntity;

pub struct SeaOrmInvoiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InvoiceRepository for SeaOrmInvoiceRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(InvoiceEntity::find().all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<InvoiceWithLines>, DomainError> {
        let invoice = match InvoiceEntity::find_by_id(id).one(&self.db).await? {
            Some(inv) => inv,
            None => return Ok(None),
        };

        let details = DetailEntity::find()
            .filter(DetailColumn::InvoiceId.eq(id))
            .find_also_related(ProductEntity)
            .all(&self.db)
            .await?;

        let lines: Vec<InvoiceLine> = details
            .into_iter()
            .map(|(detail, product)| InvoiceLine {
                id: detail.id,
                product_id: detail.product_id,
                product_name: product.map(|p| p.name),
                price: detail.price,
                qty: detail.qty,
                total: detail.total,
            })
            .collect();

        Ok(Some(InvoiceWithLines {
            invoice,
            details: lines,
        }))
    }

    async fn create(&self, input: CreateInvoiceInput) -> Result<Model, DomainError> {
        // date_time is always server-side UTC now; total_amount is taken as
        // given and not cross-checked against details, which are created
        // independently.
        let invoice = ActiveModel {
            user_id: Set(input.user_id),
            customer_id: Set(input.customer_id),
            total_amount: Set(input.total_amount),
            date_time: Set(super::timestamp()),
            status: Set(input.status),
            ..Default::default()
        };
        Ok(invoice.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, patch: InvoicePatch) -> Result<Model, DomainError> {
        let invoice = InvoiceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = invoice.into();
        if let Some(user_id) = patch.user_id {
            active.user_id = Set(user_id);
        }
        if let Some(customer_id) = patch.customer_id {
            active.customer_id = Set(Some(customer_id));
        }
        if let Some(total_amount) = patch.total_amount {
            active.total_amount = Set(total_amount);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<Model, DomainError> {
        let invoice = InvoiceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let line_items = DetailEntity::find()
            .filter(DetailColumn::InvoiceId.eq(id))
            .count(&self.db)
            .await?;
        if line_items > 0 {
            return Err(DomainError::Conflict(format!(
                "Invoice still has {} line item(s); delete them first",
                line_items
            )));
        }

        let snapshot = invoice.clone();
        invoice.delete(&self.db).await?;
        Ok(snapshot)
    }
}
