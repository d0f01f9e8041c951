//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::domain::{CategoryRepository, DomainError};
use crate::models::category::{ActiveModel, Column, Entity as CategoryEntity, Model};
use crate::models::product::{Column as ProductColumn, Entity as ProductEntity};

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(CategoryEntity::find().all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        Ok(CategoryEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Model>, DomainError> {
        Ok(CategoryEntity::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn create(&self, name: String) -> Result<Model, DomainError> {
        let category = ActiveModel {
            name: Set(name),
            created_at: Set(super::timestamp()),
            ..Default::default()
        };
        Ok(category.insert(&self.db).await?)
    }

    async fn rename(&self, id: i32, name: String) -> Result<Model, DomainError> {
        let category = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = category.into();
        active.name = Set(name);
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<Model, DomainError> {
        let category = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let products = ProductEntity::find()
            .filter(ProductColumn::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if products > 0 {
            return Err(DomainError::Conflict(format!(
                "Category still has {} product(s); delete or move them first",
                products
            )));
        }

        let snapshot = category.clone();
        category.delete(&self.db).await?;
        Ok(snapshot)
    }
}
