//! In-memory store used by tests and local demos in place of a live
//! DynamoDB. Failure flags let tests exercise the recoverable error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, Result},
    models::Product,
    store::{EnsureOutcome, ProductStore},
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<i64, Product>>,
    table_exists: AtomicBool,
    fail_ensure: AtomicBool,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    put_calls: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_ensure(&self, fail: bool) {
        self.fail_ensure.store(fail, Ordering::Relaxed);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of put calls that reached the store, successful or not.
    pub fn put_calls(&self) -> u64 {
        self.put_calls.load(Ordering::Relaxed)
    }

    pub fn table_exists(&self) -> bool {
        self.table_exists.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn ensure_table(&self) -> Result<EnsureOutcome> {
        if self.fail_ensure.load(Ordering::Relaxed) {
            return Err(AppError::Schema(
                "injected provisioning failure".to_string(),
            ));
        }

        if self.table_exists.swap(true, Ordering::Relaxed) {
            Ok(EnsureOutcome::AlreadyExists)
        } else {
            Ok(EnsureOutcome::Created)
        }
    }

    async fn scan_products(&self) -> Result<Vec<Product>> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(AppError::Read("injected read failure".to_string()));
        }

        Ok(self.items.lock().await.values().cloned().collect())
    }

    async fn put_product(&self, product: &Product) -> Result<()> {
        self.put_calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(AppError::Write("injected write failure".to_string()));
        }

        self.items.lock().await.insert(product.id, product.clone());

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
