//! Redis-backed store using a multiplexed connection manager.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use crate::errors::domain::DomainError;
use crate::store::StateStore;

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect and hand back a store. The connection manager reconnects
    /// on its own; individual commands still surface errors.
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(url)
            .map_err(|e| DomainError::configuration(format!("invalid redis url: {e}")))?;
        let conn = ConnectionManager::new(client).await?;
        debug!("connected to redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl StateStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn get_list(&self, key: &str) -> Result<Vec<String>, DomainError> {
        let mut conn = self.conn.clone();
        let values: Vec<String> = conn.lrange(key, 0, -1).await?;
        Ok(values)
    }

    async fn set_list(&self, key: &str, values: &[String]) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        if !values.is_empty() {
            let _: () = conn.rpush(key, values).await?;
        }
        Ok(())
    }

    async fn push_list(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn.rpush(key, value).await?;
        Ok(())
    }

    async fn rem_list(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn.lrem(key, 0, value).await?;
        Ok(())
    }

    async fn get_dict(&self, key: &str) -> Result<HashMap<String, String>, DomainError> {
        let mut conn = self.conn.clone();
        let map: HashMap<String, String> = conn.hgetall(key).await?;
        Ok(map)
    }

    async fn set_dict(&self, key: &str, field: &str, value: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn.hset(key, field, value).await?;
        Ok(())
    }

    async fn rem_dict(&self, key: &str, field: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn.hdel(key, field).await?;
        Ok(())
    }

    async fn expire(&self, keys: &[String], ttl_secs: u64) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        for key in keys {
            let _: () = conn.expire(key, ttl_secs as i64).await?;
        }
        Ok(())
    }

    async fn flush_room(&self, room_id: i64) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{room_id}_*");
        let keys: Vec<String> = conn.keys(&pattern).await?;
        if !keys.is_empty() {
            let _: () = conn.del(keys).await?;
        }
        debug!(room_id, "flushed room keys");
        Ok(())
    }
}
