use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client as DynamoDbClient,
    error::{DisplayErrorContext, SdkError},
    types::{
        AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
        ScalarAttributeType, TableStatus,
    },
};

use crate::{
    config::{StoreConfig, load_dynamodb_client},
    error::{AppError, Result},
    models::Product,
    store::{
        EnsureOutcome, KEY_ATTRIBUTE, ProductStore, READ_CAPACITY_UNITS, TABLE_NAME,
        WRITE_CAPACITY_UNITS,
    },
};

const NAME_ATTRIBUTE: &str = "Name";
const PRICE_ATTRIBUTE: &str = "Price";

const READY_POLL_INTERVAL: Duration = Duration::from_secs(1);
const READY_POLL_ATTEMPTS: u32 = 30;

/// Live store backed by a DynamoDB table. Constructed once at startup and
/// shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: DynamoDbClient,
}

impl DynamoDbStore {
    /// Builds the SDK client and verifies the endpoint is reachable with a
    /// single preflight call. An unreachable endpoint is reported as a
    /// connection failure, anything else as an SDK failure; both are fatal
    /// to startup.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = load_dynamodb_client(config).await;

        client
            .list_tables()
            .limit(1)
            .send()
            .await
            .map_err(|err| connect_error("could not connect to the product store", err))?;

        tracing::info!("Connected to the product store successfully");

        Ok(Self { client })
    }

    async fn wait_until_ready(&self) -> Result<()> {
        for _ in 0..READY_POLL_ATTEMPTS {
            match self.client.describe_table().table_name(TABLE_NAME).send().await {
                Ok(output) => {
                    let status = output.table.and_then(|table| table.table_status);
                    if status == Some(TableStatus::Active) {
                        return Ok(());
                    }
                }
                Err(err) => {
                    // The table may not be visible yet right after creation.
                    let not_found = err
                        .as_service_error()
                        .is_some_and(|e| e.is_resource_not_found_exception());
                    if !not_found {
                        return Err(AppError::Schema(format!(
                            "failed waiting for table {}: {}",
                            TABLE_NAME,
                            DisplayErrorContext(&err)
                        )));
                    }
                }
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }

        Err(AppError::Schema(format!(
            "table {} did not become active in time",
            TABLE_NAME
        )))
    }
}

#[async_trait]
impl ProductStore for DynamoDbStore {
    async fn ensure_table(&self) -> Result<EnsureOutcome> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(KEY_ATTRIBUTE)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|err| AppError::Sdk(err.to_string()))?;

        let key_attribute = AttributeDefinition::builder()
            .attribute_name(KEY_ATTRIBUTE)
            .attribute_type(ScalarAttributeType::N)
            .build()
            .map_err(|err| AppError::Sdk(err.to_string()))?;

        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(READ_CAPACITY_UNITS)
            .write_capacity_units(WRITE_CAPACITY_UNITS)
            .build()
            .map_err(|err| AppError::Sdk(err.to_string()))?;

        let created = self
            .client
            .create_table()
            .table_name(TABLE_NAME)
            .key_schema(key_schema)
            .attribute_definitions(key_attribute)
            .provisioned_throughput(throughput)
            .send()
            .await;

        let outcome = match created {
            Ok(_) => EnsureOutcome::Created,
            Err(err) => {
                let already_exists = err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_in_use_exception());
                if !already_exists {
                    return Err(AppError::Schema(format!(
                        "failed to create table {}: {}",
                        TABLE_NAME,
                        DisplayErrorContext(&err)
                    )));
                }
                EnsureOutcome::AlreadyExists
            }
        };

        self.wait_until_ready().await?;

        Ok(outcome)
    }

    async fn scan_products(&self) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(TABLE_NAME)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|err| {
                    AppError::Read(format!(
                        "scan of {} failed: {}",
                        TABLE_NAME,
                        DisplayErrorContext(&err)
                    ))
                })?;

            for item in output.items.unwrap_or_default() {
                match product_from_item(&item) {
                    Some(product) => products.push(product),
                    None => {
                        tracing::warn!("Skipping malformed record in {}: {:?}", TABLE_NAME, item)
                    }
                }
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(products)
    }

    async fn put_product(&self, product: &Product) -> Result<()> {
        self.client
            .put_item()
            .table_name(TABLE_NAME)
            .set_item(Some(product_to_item(product)))
            .send()
            .await
            .map_err(|err| {
                AppError::Write(format!(
                    "put into {} failed: {}",
                    TABLE_NAME,
                    DisplayErrorContext(&err)
                ))
            })?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .describe_table()
            .table_name(TABLE_NAME)
            .send()
            .await
            .map_err(|err| connect_error("product store is not reachable", err))?;

        Ok(())
    }
}

fn connect_error<E>(context: &str, err: SdkError<E>) -> AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let detail = format!("{}: {}", context, DisplayErrorContext(&err));
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => AppError::Connection(detail),
        _ => AppError::Sdk(detail),
    }
}

fn product_to_item(product: &Product) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            KEY_ATTRIBUTE.to_string(),
            AttributeValue::N(product.id.to_string()),
        ),
        (
            NAME_ATTRIBUTE.to_string(),
            AttributeValue::S(product.name.clone()),
        ),
        (
            PRICE_ATTRIBUTE.to_string(),
            AttributeValue::N(product.price.to_string()),
        ),
    ])
}

fn product_from_item(item: &HashMap<String, AttributeValue>) -> Option<Product> {
    let id = item.get(KEY_ATTRIBUTE)?.as_n().ok()?.parse().ok()?;
    let name = item.get(NAME_ATTRIBUTE)?.as_s().ok()?.clone();
    let price = item.get(PRICE_ATTRIBUTE)?.as_n().ok()?.parse().ok()?;

    Some(Product { id, name, price })
}
