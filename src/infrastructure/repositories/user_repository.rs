//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::domain::{CreateUserInput, DomainError, UserPatch, UserRepository};
use crate::models::invoice::{Column as InvoiceColumn, Entity as InvoiceEntity};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity, Model};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(UserEntity::find().all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        Ok(UserEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Model>, DomainError> {
        Ok(UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Model>, DomainError> {
        Ok(UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn create(&self, input: CreateUserInput) -> Result<Model, DomainError> {
        let user = ActiveModel {
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            role: Set(input.role),
            created_at: Set(super::timestamp()),
            ..Default::default()
        };
        Ok(user.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, patch: UserPatch) -> Result<Model, DomainError> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = user.into();
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = patch.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = patch.role {
            active.role = Set(role);
        }

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<Model, DomainError> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let invoices = InvoiceEntity::find()
            .filter(InvoiceColumn::UserId.eq(id))
            .count(&self.db)
            .await?;
        if invoices > 0 {
            return Err(DomainError::Conflict(format!(
                "User still owns {} invoice(s); delete or reassign them first",
                invoices
            )));
        }

        let snapshot = user.clone();
        user.delete(&self.db).await?;
        Ok(snapshot)
    }
}
