//! Report aggregator - read-only sales reports over completed invoices
//!
//! Every query filters to `status = 'completed'`; pending and cancelled
//! invoices never count toward sales. Sums over an empty matching set are
//! 0, never null.

use chrono::{Datelike, Duration, NaiveDateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::DomainError;
use crate::models::category::{Column as CategoryColumn, Entity as CategoryEntity};
use crate::models::invoice::{self, Column as InvoiceColumn, Entity as InvoiceEntity};
use crate::models::invoice_detail::{Column as DetailColumn, Entity as DetailEntity};
use crate::models::product::Entity as ProductEntity;
use crate::models::user::Entity as UserEntity;

const COMPLETED: &str = "completed";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
pub struct DailyInvoiceEntry {
    pub id: i32,
    pub total_amount: f64,
    /// Time of day, e.g. "02:35 PM".
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct DailySalesReport {
    pub period: &'static str,
    pub date: String,
    pub total_sales: f64,
    pub total_invoices: usize,
    pub invoices: Vec<DailyInvoiceEntry>,
}

#[derive(Debug, Serialize)]
pub struct WeeklySalesReport {
    pub period: &'static str,
    pub start_date: String,
    pub end_date: String,
    pub total_sales: f64,
    pub total_invoices: usize,
}

#[derive(Debug, Serialize)]
pub struct MonthlySalesReport {
    pub period: &'static str,
    pub month: String,
    pub total_sales: f64,
    pub total_invoices: usize,
}

#[derive(Debug, Serialize)]
pub struct ProductSales {
    pub product_id: i32,
    pub product_name: String,
    pub total_qty_sold: i64,
    pub total_sales: f64,
}

#[derive(Debug, Serialize)]
pub struct CategorySales {
    pub category_id: i32,
    pub category_name: String,
    pub total_sales: f64,
}

#[derive(Debug, Serialize)]
pub struct UserSales {
    pub user_id: i32,
    pub username: String,
    pub total_invoices: i64,
    pub total_sales: f64,
}

async fn completed_invoices_between(
    db: &DatabaseConnection,
    start: &str,
    end: &str,
) -> Result<Vec<invoice::Model>, DomainError> {
    Ok(InvoiceEntity::find()
        .filter(InvoiceColumn::Status.eq(COMPLETED))
        .filter(InvoiceColumn::DateTime.between(start, end))
        .all(db)
        .await?)
}

/// Completed sales for today, `[start-of-day, end-of-day]` UTC.
pub async fn daily_sales(db: &DatabaseConnection) -> Result<DailySalesReport, DomainError> {
    let today = Utc::now().date_naive();
    let start = format!("{} 00:00:00", today);
    let end = format!("{} 23:59:59", today);

    let invoices = completed_invoices_between(db, &start, &end).await?;

    let total_sales: f64 = invoices.iter().map(|inv| inv.total_amount).sum();
    let entries: Vec<DailyInvoiceEntry> = invoices
        .iter()
        .map(|inv| DailyInvoiceEntry {
            id: inv.id,
            total_amount: inv.total_amount,
            time: NaiveDateTime::parse_from_str(&inv.date_time, DATE_TIME_FORMAT)
                .map(|dt| dt.format("%I:%M %p").to_string())
                .unwrap_or_else(|_| inv.date_time.clone()),
        })
        .collect();

    Ok(DailySalesReport {
        period: "daily",
        date: today.format("%Y-%m-%d").to_string(),
        total_sales,
        total_invoices: entries.len(),
        invoices: entries,
    })
}

/// Completed sales since Monday 00:00:00 of the current week (UTC).
pub async fn weekly_sales(db: &DatabaseConnection) -> Result<WeeklySalesReport, DomainError> {
    let now = Utc::now();
    let today = now.date_naive();
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let start = format!("{} 00:00:00", monday);
    let end = now.format(DATE_TIME_FORMAT).to_string();

    let invoices = completed_invoices_between(db, &start, &end).await?;
    let total_sales: f64 = invoices.iter().map(|inv| inv.total_amount).sum();

    Ok(WeeklySalesReport {
        period: "weekly",
        start_date: monday.format("%Y-%m-%d").to_string(),
        end_date: today.format("%Y-%m-%d").to_string(),
        total_sales,
        total_invoices: invoices.len(),
    })
}

/// Completed sales since the first day of the current month (UTC).
pub async fn monthly_sales(db: &DatabaseConnection) -> Result<MonthlySalesReport, DomainError> {
    let now = Utc::now();
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let start = format!("{} 00:00:00", first);
    let end = now.format(DATE_TIME_FORMAT).to_string();

    let invoices = completed_invoices_between(db, &start, &end).await?;
    let total_sales: f64 = invoices.iter().map(|inv| inv.total_amount).sum();

    Ok(MonthlySalesReport {
        period: "monthly",
        month: now.format("%B %Y").to_string(),
        total_sales,
        total_invoices: invoices.len(),
    })
}

async fn completed_invoice_ids(db: &DatabaseConnection) -> Result<Vec<i32>, DomainError> {
    let invoices = InvoiceEntity::find()
        .filter(InvoiceColumn::Status.eq(COMPLETED))
        .all(db)
        .await?;
    Ok(invoices.into_iter().map(|inv| inv.id).collect())
}

/// Line items of completed invoices grouped by product.
pub async fn sales_by_product(db: &DatabaseConnection) -> Result<Vec<ProductSales>, DomainError> {
    let invoice_ids = completed_invoice_ids(db).await?;
    if invoice_ids.is_empty() {
        return Ok(Vec::new());
    }

    let details = DetailEntity::find()
        .filter(DetailColumn::InvoiceId.is_in(invoice_ids))
        .find_also_related(ProductEntity)
        .all(db)
        .await?;

    let mut grouped: BTreeMap<i32, ProductSales> = BTreeMap::new();
    for (detail, product) in details {
        let entry = grouped.entry(detail.product_id).or_insert(ProductSales {
            product_id: detail.product_id,
            product_name: product.map(|p| p.name).unwrap_or_else(|| "Unknown".to_string()),
            total_qty_sold: 0,
            total_sales: 0.0,
        });
        entry.total_qty_sold += detail.qty as i64;
        entry.total_sales += detail.total;
    }

    Ok(grouped.into_values().collect())
}

/// Line items of completed invoices grouped by product category.
pub async fn sales_by_category(
    db: &DatabaseConnection,
) -> Result<Vec<CategorySales>, DomainError> {
    let invoice_ids = completed_invoice_ids(db).await?;
    if invoice_ids.is_empty() {
        return Ok(Vec::new());
    }

    let details = DetailEntity::find()
        .filter(DetailColumn::InvoiceId.is_in(invoice_ids))
        .find_also_related(ProductEntity)
        .all(db)
        .await?;

    // Fold line totals per category, then resolve names in one query.
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for (detail, product) in details {
        if let Some(product) = product {
            *totals.entry(product.category_id).or_insert(0.0) += detail.total;
        }
    }

    if totals.is_empty() {
        return Ok(Vec::new());
    }

    let categories = CategoryEntity::find()
        .filter(CategoryColumn::Id.is_in(totals.keys().copied().collect::<Vec<_>>()))
        .all(db)
        .await?;
    let names: BTreeMap<i32, String> =
        categories.into_iter().map(|c| (c.id, c.name)).collect();

    Ok(totals
        .into_iter()
        .map(|(category_id, total_sales)| CategorySales {
            category_id,
            category_name: names
                .get(&category_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
            total_sales,
        })
        .collect())
}

/// Completed invoices grouped by the issuing user.
pub async fn sales_by_user(db: &DatabaseConnection) -> Result<Vec<UserSales>, DomainError> {
    let invoices = InvoiceEntity::find()
        .filter(InvoiceColumn::Status.eq(COMPLETED))
        .find_also_related(UserEntity)
        .all(db)
        .await?;

    let mut grouped: BTreeMap<i32, UserSales> = BTreeMap::new();
    for (invoice, user) in invoices {
        let entry = grouped.entry(invoice.user_id).or_insert(UserSales {
            user_id: invoice.user_id,
            username: user.map(|u| u.username).unwrap_or_else(|| "Unknown".to_string()),
            total_invoices: 0,
            total_sales: 0.0,
        });
        entry.total_invoices += 1;
        entry.total_sales += invoice.total_amount;
    }

    Ok(grouped.into_values().collect())
}
