//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::domain::{CreateCustomerInput, CustomerPatch, CustomerRepository, DomainError};
use crate::models::customer::{ActiveModel, Column, Entity as CustomerEntity, Model};
use crate::models::invoice::{Column as InvoiceColumn, Entity as InvoiceEntity};

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(CustomerEntity::find().all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        Ok(CustomerEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Model>, DomainError> {
        Ok(CustomerEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn create(&self, input: CreateCustomerInput) -> Result<Model, DomainError> {
        let customer = ActiveModel {
            name: Set(input.name),
            phone: Set(input.phone),
            email: Set(input.email),
            created_at: Set(super::timestamp()),
            ..Default::default()
        };
        Ok(customer.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, patch: CustomerPatch) -> Result<Model, DomainError> {
        let customer = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = customer.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(phone) = patch.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(email) = patch.email {
            active.email = Set(Some(email));
        }

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<Model, DomainError> {
        let customer = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let invoices = InvoiceEntity::find()
            .filter(InvoiceColumn::CustomerId.eq(id))
            .count(&self.db)
            .await?;
        if invoices > 0 {
            return Err(DomainError::Conflict(format!(
                "Customer still has {} invoice(s); delete them first",
                invoices
            )));
        }

        let snapshot = customer.clone();
        customer.delete(&self.db).await?;
        Ok(snapshot)
    }
}
