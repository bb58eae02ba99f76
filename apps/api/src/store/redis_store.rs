use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::store::{KvStore, StoreError};

/// Durable store backed by Redis string keys.
///
/// Every key is prefixed with `namespace` so several deployments can share
/// one Redis instance.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    namespace: String,
}

impl RedisStore {
    pub async fn connect(url: &str, namespace: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let connection = client.get_multiplexed_tokio_connection().await?;
        info!("Redis store connected (namespace '{namespace}')");
        Ok(Self {
            connection,
            namespace: namespace.to_string(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();
        connection.set::<_, _, ()>(self.key(key), value).await?;
        Ok(())
    }
}
