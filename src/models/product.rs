use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub description: Option<String>,
    pub category_id: i32,
    /// Path relative to the static root, e.g. `uploads/products/xyz.png`.
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::invoice_detail::Entity")]
    InvoiceDetail,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::invoice_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
