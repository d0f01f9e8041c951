use salepoint::db;
use salepoint::domain::{
    CategoryRepository, CreateCustomerInput, CreateInvoiceDetailInput, CreateInvoiceInput,
    CreateProductInput, CreateUserInput, CustomerRepository, DomainError, InvoiceDetailPatch,
    InvoiceDetailRepository, InvoiceRepository, ProductRepository, UserRepository,
};
use salepoint::infrastructure::{
    SeaOrmCategoryRepository, SeaOrmCustomerRepository, SeaOrmInvoiceDetailRepository,
    SeaOrmInvoiceRepository, SeaOrmProductRepository, SeaOrmUserRepository,
};
use sea_orm::DatabaseConnection;

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_user(db: &DatabaseConnection) -> i32 {
    let repo = SeaOrmUserRepository::new(db.clone());
    let user = repo
        .create(CreateUserInput {
            username: "cashier".to_string(),
            email: "cashier@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: "user".to_string(),
        })
        .await
        .expect("Failed to create user");
    user.id
}

async fn create_test_product(db: &DatabaseConnection, name: &str, price: f64) -> i32 {
    let categories = SeaOrmCategoryRepository::new(db.clone());
    let category = match categories.find_by_name("Beverages").await.unwrap() {
        Some(c) => c,
        None => categories
            .create("Beverages".to_string())
            .await
            .expect("Failed to create category"),
    };

    let products = SeaOrmProductRepository::new(db.clone());
    let product = products
        .create(CreateProductInput {
            name: name.to_string(),
            price,
            stock: 100,
            description: None,
            category_id: category.id,
            image: None,
        })
        .await
        .expect("Failed to create product");
    product.id
}

async fn create_test_invoice(db: &DatabaseConnection, user_id: i32) -> i32 {
    let repo = SeaOrmInvoiceRepository::new(db.clone());
    let invoice = repo
        .create(CreateInvoiceInput {
            user_id,
            customer_id: None,
            total_amount: 0.0,
            status: "completed".to_string(),
        })
        .await
        .expect("Failed to create invoice");
    invoice.id
}

#[tokio::test]
async fn test_detail_create_computes_total() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let product_id = create_test_product(&db, "Espresso", 1.5).await;
    let invoice_id = create_test_invoice(&db, user_id).await;

    let details = SeaOrmInvoiceDetailRepository::new(db.clone());
    let detail = details
        .create(CreateInvoiceDetailInput {
            invoice_id,
            product_id,
            price: 1.5,
            qty: 2,
        })
        .await
        .expect("Failed to create detail");

    assert_eq!(detail.total, 3.0);
}

#[tokio::test]
async fn test_detail_qty_patch_recomputes_with_stored_price() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let product_id = create_test_product(&db, "Espresso", 1.5).await;
    let invoice_id = create_test_invoice(&db, user_id).await;

    let details = SeaOrmInvoiceDetailRepository::new(db.clone());
    let detail = details
        .create(CreateInvoiceDetailInput {
            invoice_id,
            product_id,
            price: 1.5,
            qty: 2,
        })
        .await
        .expect("Failed to create detail");

    let updated = details
        .update(
            detail.id,
            InvoiceDetailPatch {
                qty: Some(3),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update detail");

    assert_eq!(updated.qty, 3);
    assert_eq!(updated.price, 1.5);
    assert_eq!(updated.total, 4.5);
}

#[tokio::test]
async fn test_detail_price_patch_recomputes_with_stored_qty() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let product_id = create_test_product(&db, "Latte", 2.0).await;
    let invoice_id = create_test_invoice(&db, user_id).await;

    let details = SeaOrmInvoiceDetailRepository::new(db.clone());
    let detail = details
        .create(CreateInvoiceDetailInput {
            invoice_id,
            product_id,
            price: 2.0,
            qty: 4,
        })
        .await
        .expect("Failed to create detail");

    let updated = details
        .update(
            detail.id,
            InvoiceDetailPatch {
                price: Some(2.5),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update detail");

    assert_eq!(updated.qty, 4);
    assert_eq!(updated.total, 10.0);
}

#[tokio::test]
async fn test_detail_patch_without_price_or_qty_keeps_total() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let first = create_test_product(&db, "Mocha", 3.0).await;
    let second = create_test_product(&db, "Flat White", 3.5).await;
    let invoice_id = create_test_invoice(&db, user_id).await;

    let details = SeaOrmInvoiceDetailRepository::new(db.clone());
    let detail = details
        .create(CreateInvoiceDetailInput {
            invoice_id,
            product_id: first,
            price: 3.0,
            qty: 2,
        })
        .await
        .expect("Failed to create detail");

    // Repointing the line at another product must not disturb the total.
    let updated = details
        .update(
            detail.id,
            InvoiceDetailPatch {
                product_id: Some(second),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update detail");

    assert_eq!(updated.product_id, second);
    assert_eq!(updated.total, 6.0);
}

#[tokio::test]
async fn test_detail_update_missing_returns_not_found() {
    let db = setup_test_db().await;
    let details = SeaOrmInvoiceDetailRepository::new(db.clone());

    let result = details
        .update(
            999,
            InvoiceDetailPatch {
                qty: Some(1),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_detail_delete_returns_snapshot() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let product_id = create_test_product(&db, "Espresso", 1.5).await;
    let invoice_id = create_test_invoice(&db, user_id).await;

    let details = SeaOrmInvoiceDetailRepository::new(db.clone());
    let detail = details
        .create(CreateInvoiceDetailInput {
            invoice_id,
            product_id,
            price: 1.5,
            qty: 2,
        })
        .await
        .expect("Failed to create detail");

    let snapshot = details.delete(detail.id).await.expect("Failed to delete");
    assert_eq!(snapshot, detail);

    assert!(details
        .find_by_id(detail.id)
        .await
        .expect("Lookup failed")
        .is_none());
}

#[tokio::test]
async fn test_invoice_create_stamps_date_time() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;

    let invoices = SeaOrmInvoiceRepository::new(db.clone());
    let invoice = invoices
        .create(CreateInvoiceInput {
            user_id,
            customer_id: None,
            total_amount: 12.5,
            status: "completed".to_string(),
        })
        .await
        .expect("Failed to create invoice");

    // %Y-%m-%d %H:%M:%S
    assert_eq!(invoice.date_time.len(), 19);
    assert_eq!(&invoice.date_time[4..5], "-");
    assert_eq!(&invoice.date_time[10..11], " ");
}

#[tokio::test]
async fn test_invoice_delete_blocked_by_line_items() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    let product_id = create_test_product(&db, "Espresso", 1.5).await;
    let invoice_id = create_test_invoice(&db, user_id).await;

    let details = SeaOrmInvoiceDetailRepository::new(db.clone());
    details
        .create(CreateInvoiceDetailInput {
            invoice_id,
            product_id,
            price: 1.5,
            qty: 1,
        })
        .await
        .expect("Failed to create detail");

    let invoices = SeaOrmInvoiceRepository::new(db.clone());
    let result = invoices.delete(invoice_id).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    // Once the line items are gone the invoice can be deleted.
    let all = details.find_all().await.expect("Failed to list details");
    for detail in all {
        details.delete(detail.id).await.expect("Failed to delete");
    }
    invoices
        .delete(invoice_id)
        .await
        .expect("Delete should succeed with no line items");
}

#[tokio::test]
async fn test_category_delete_blocked_by_products() {
    let db = setup_test_db().await;
    let product_id = create_test_product(&db, "Espresso", 1.5).await;

    let categories = SeaOrmCategoryRepository::new(db.clone());
    let category = categories
        .find_by_name("Beverages")
        .await
        .expect("Lookup failed")
        .expect("Category should exist");

    let result = categories.delete(category.id).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    let products = SeaOrmProductRepository::new(db.clone());
    products.delete(product_id).await.expect("Failed to delete");
    categories
        .delete(category.id)
        .await
        .expect("Delete should succeed with no products");
}

#[tokio::test]
async fn test_product_create_rejects_unknown_category() {
    let db = setup_test_db().await;
    let products = SeaOrmProductRepository::new(db.clone());

    let result = products
        .create(CreateProductInput {
            name: "Orphan".to_string(),
            price: 1.0,
            stock: 0,
            description: None,
            category_id: 999,
            image: None,
        })
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_customer_delete_blocked_by_invoices() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;

    let customers = SeaOrmCustomerRepository::new(db.clone());
    let customer = customers
        .create(CreateCustomerInput {
            name: "Walk-in".to_string(),
            phone: None,
            email: None,
        })
        .await
        .expect("Failed to create customer");

    let invoices = SeaOrmInvoiceRepository::new(db.clone());
    let invoice = invoices
        .create(CreateInvoiceInput {
            user_id,
            customer_id: Some(customer.id),
            total_amount: 10.0,
            status: "completed".to_string(),
        })
        .await
        .expect("Failed to create invoice");

    let result = customers.delete(customer.id).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    invoices
        .delete(invoice.id)
        .await
        .expect("Failed to delete invoice");
    customers
        .delete(customer.id)
        .await
        .expect("Delete should succeed with no invoices");
}

#[tokio::test]
async fn test_user_delete_blocked_by_invoices() {
    let db = setup_test_db().await;
    let user_id = create_test_user(&db).await;
    create_test_invoice(&db, user_id).await;

    let users = SeaOrmUserRepository::new(db.clone());
    let result = users.delete(user_id).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}
