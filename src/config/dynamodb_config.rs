use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::{Client as DynamoDbClient, config::Credentials};

use crate::config::StoreConfig;

/// Builds the DynamoDB client for the configured endpoint. Client
/// construction never touches the network; reachability is checked by the
/// store's connect preflight.
pub async fn load_dynamodb_client(config: &StoreConfig) -> DynamoDbClient {
    let credentials = Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.clone(),
        None,
        None,
        "env-credentials",
    );

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.endpoint)
        .load()
        .await;

    let client = DynamoDbClient::new(&sdk_config);

    tracing::info!("DynamoDB client initialized for {}", config.endpoint);

    client
}
