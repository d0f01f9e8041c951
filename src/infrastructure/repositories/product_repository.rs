//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::domain::{CreateProductInput, DomainError, ProductPatch, ProductRepository};
use crate::models::category::Entity as CategoryEntity;
use crate::models::invoice_detail::{Column as DetailColumn, Entity as DetailEntity};
use crate::models::product::{ActiveModel, Entity as ProductEntity, Model};

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check_category(&self, category_id: i32) -> Result<(), DomainError> {
        CategoryEntity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::Validation("Category not found".to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> Result<Vec<Model>, DomainError> {
        Ok(ProductEntity::find().all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DomainError> {
        Ok(ProductEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: CreateProductInput) -> Result<Model, DomainError> {
        self.check_category(input.category_id).await?;

        let product = ActiveModel {
            name: Set(input.name),
            price: Set(input.price),
            stock: Set(input.stock),
            description: Set(input.description),
            category_id: Set(input.category_id),
            image: Set(input.image),
            created_at: Set(super::timestamp()),
            ..Default::default()
        };
        Ok(product.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, patch: ProductPatch) -> Result<Model, DomainError> {
        let product = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        if let Some(category_id) = patch.category_id {
            self.check_category(category_id).await?;
        }

        let mut active: ActiveModel = product.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(stock) = patch.stock {
            active.stock = Set(stock);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        if let Some(category_id) = patch.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(image) = patch.image {
            active.image = Set(Some(image));
        }

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<Model, DomainError> {
        let product = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let line_items = DetailEntity::find()
            .filter(DetailColumn::ProductId.eq(id))
            .count(&self.db)
            .await?;
        if line_items > 0 {
            return Err(DomainError::Conflict(format!(
                "Product is referenced by {} invoice line item(s); delete them first",
                line_items
            )));
        }

        let snapshot = product.clone();
        product.delete(&self.db).await?;
        Ok(snapshot)
    }
}
