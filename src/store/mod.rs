mod dynamodb;
mod memory;

use async_trait::async_trait;

use crate::{error::Result, models::Product};

pub use dynamodb::DynamoDbStore;
pub use memory::MemoryStore;

pub const TABLE_NAME: &str = "Products";
pub const KEY_ATTRIBUTE: &str = "Id";
pub const READ_CAPACITY_UNITS: i64 = 5;
pub const WRITE_CAPACITY_UNITS: i64 = 5;

/// Outcome of table provisioning. Finding the table already in place is a
/// normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExists,
}

/// Access to the product table. The live implementation talks to DynamoDB;
/// tests substitute [`MemoryStore`].
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Provisions the table if absent and waits until it is ready.
    /// Idempotent: a second call finds the existing table.
    async fn ensure_table(&self) -> Result<EnsureOutcome>;

    /// Full unfiltered scan. Record order is whatever the store returns.
    async fn scan_products(&self) -> Result<Vec<Product>>;

    /// Upserts one record keyed by `Id`; an existing id is overwritten.
    async fn put_product(&self, product: &Product) -> Result<()>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<()>;
}
