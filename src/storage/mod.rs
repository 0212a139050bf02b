pub mod memory;
pub mod rocks;

pub use memory::MemoryStore;
pub use rocks::RocksStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};

pub const SHIPS_KEY: &str = "ships";
pub const COMPONENTS_KEY: &str = "components";
pub const JOBS_KEY: &str = "jobs";
pub const NOTIFICATIONS_KEY: &str = "notifications";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// One entry of an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
}

impl WriteOp {
    pub fn key(&self) -> &str {
        match self {
            WriteOp::Put { key, .. } | WriteOp::Delete { key } => key,
        }
    }
}

/// Named blob storage. Everything the fleet store persists goes through this.
///
/// `write` must apply the whole batch or none of it.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn write(&mut self, batch: Vec<WriteOp>) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.write(vec![WriteOp::Put {
            key: key.to_string(),
            value,
        }])
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.write(vec![WriteOp::Delete {
            key: key.to_string(),
        }])
    }

    fn clear(&mut self) -> Result<()> {
        let batch = self
            .keys()?
            .into_iter()
            .map(|key| WriteOp::Delete { key })
            .collect();
        self.write(batch)
    }
}

/// Read and decode the JSON blob under `key`. A missing key is `Ok(None)`;
/// a blob that does not decode is an error.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get(key)? {
        Some(bytes) => {
            trace!("Decoding {} bytes from '{}'", bytes.len(), key);
            let value = serde_json::from_slice(&bytes).map_err(|source| Error::Serialization {
                key: key.to_string(),
                source,
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Encode `value` as a put of its JSON blob under `key`.
pub fn put_json<T>(key: &str, value: &T) -> Result<WriteOp>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(value).map_err(|source| Error::Serialization {
        key: key.to_string(),
        source,
    })?;
    Ok(WriteOp::Put {
        key: key.to_string(),
        value: bytes,
    })
}
