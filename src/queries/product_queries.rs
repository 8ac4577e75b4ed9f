use crate::{
    error::Result,
    models::Product,
    store::{EnsureOutcome, ProductStore},
};

/// Provisions the Products table at startup. Safe to call against an
/// existing table; any other failure is fatal and propagates to the caller.
pub async fn ensure_table<S: ProductStore + ?Sized>(store: &S) -> Result<EnsureOutcome> {
    let outcome = store.ensure_table().await?;

    match outcome {
        EnsureOutcome::Created => tracing::info!("Products table created"),
        EnsureOutcome::AlreadyExists => tracing::info!("Products table already exists"),
    }

    Ok(outcome)
}

pub async fn list_products<S: ProductStore + ?Sized>(store: &S) -> Result<Vec<Product>> {
    let products = store.scan_products().await?;

    tracing::info!("Retrieved {} products from the store", products.len());

    Ok(products)
}

pub async fn add_product<S: ProductStore + ?Sized>(store: &S, product: &Product) -> Result<()> {
    store.put_product(product).await?;

    tracing::info!(
        "Product added successfully: ID={}, Name={}, Price={}",
        product.id,
        product.name,
        product.price
    );

    Ok(())
}
