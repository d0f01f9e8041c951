use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub customer_id: Option<i32>,
    pub total_amount: f64,
    /// UTC, `%Y-%m-%d %H:%M:%S`. Lexicographic order matches chronological.
    pub date_time: String,
    /// 'completed', 'pending' or 'cancelled'. Only completed invoices
    /// count toward sales reports.
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::invoice_detail::Entity")]
    InvoiceDetail,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::invoice_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
