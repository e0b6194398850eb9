//! In-process store for tests and single-node runs. Mirrors the Redis
//! behavior closely enough that the engine cannot tell them apart,
//! including the wrong-type error on kind mismatch. TTLs are recorded
//! but never enforced; tests assert on the recorded values.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::errors::domain::DomainError;
use crate::store::StateStore;

#[derive(Clone, Debug)]
enum Value {
    Scalar(String),
    List(Vec<String>),
    Dict(HashMap<String, String>),
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    ttls: RwLock<HashMap<String, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded TTL for a key, if one was set.
    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.ttls.read().get(key).copied()
    }

    pub fn key_count(&self) -> usize {
        self.entries.read().len()
    }
}

fn wrong_type(key: &str) -> DomainError {
    DomainError::store(format!("wrong value kind at key {key}"))
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self.entries.read().get(key) {
            None => Ok(None),
            Some(Value::Scalar(s)) => Ok(Some(s.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .write()
            .insert(key.to_string(), Value::Scalar(value.to_string()));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn get_list(&self, key: &str) -> Result<Vec<String>, DomainError> {
        match self.entries.read().get(key) {
            None => Ok(Vec::new()),
            Some(Value::List(v)) => Ok(v.clone()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn set_list(&self, key: &str, values: &[String]) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        if values.is_empty() {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), Value::List(values.to_vec()));
        }
        Ok(())
    }

    async fn push_list(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Value::List(Vec::new()))
        {
            Value::List(v) => {
                v.push(value.to_string());
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn rem_list(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        let emptied = match entries.get_mut(key) {
            None => false,
            Some(Value::List(v)) => {
                v.retain(|e| e != value);
                v.is_empty()
            }
            Some(_) => return Err(wrong_type(key)),
        };
        if emptied {
            entries.remove(key);
        }
        Ok(())
    }

    async fn get_dict(&self, key: &str) -> Result<HashMap<String, String>, DomainError> {
        match self.entries.read().get(key) {
            None => Ok(HashMap::new()),
            Some(Value::Dict(m)) => Ok(m.clone()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn set_dict(&self, key: &str, field: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Dict(HashMap::new()))
        {
            Value::Dict(m) => {
                m.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(wrong_type(key)),
        }
    }

    async fn rem_dict(&self, key: &str, field: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write();
        let emptied = match entries.get_mut(key) {
            None => false,
            Some(Value::Dict(m)) => {
                m.remove(field);
                m.is_empty()
            }
            Some(_) => return Err(wrong_type(key)),
        };
        if emptied {
            entries.remove(key);
        }
        Ok(())
    }

    async fn expire(&self, keys: &[String], ttl_secs: u64) -> Result<(), DomainError> {
        let mut ttls = self.ttls.write();
        for key in keys {
            ttls.insert(key.clone(), ttl_secs);
        }
        Ok(())
    }

    async fn flush_room(&self, room_id: i64) -> Result<(), DomainError> {
        let prefix = format!("{room_id}_");
        self.entries.write().retain(|k, _| !k.starts_with(&prefix));
        self.ttls.write().retain(|k, _| !k.starts_with(&prefix));
        Ok(())
    }
}
