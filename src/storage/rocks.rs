use rocksdb::{IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use tracing::debug;

use super::{KvStore, WriteOp};
use crate::error::Result;

/// RocksDB-backed blob store. Each collection is a single key.
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening fleet store at '{}'", path.display());

        let mut db_options = Options::default();
        db_options.create_if_missing(true);
        let db = DB::open(&db_options, path)?;
        Ok(RocksStore { db })
    }

    pub fn count_keys(&self) -> Result<usize> {
        let mut count = 0usize;
        for item in self.db.iterator(IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }
}

impl KvStore for RocksStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key.as_bytes())?)
    }

    fn write(&mut self, batch: Vec<WriteOp>) -> Result<()> {
        let mut rocks_batch = WriteBatch::default();
        for op in &batch {
            match op {
                WriteOp::Put { key, value } => rocks_batch.put(key.as_bytes(), value),
                WriteOp::Delete { key } => rocks_batch.delete(key.as_bytes()),
            }
        }
        self.db.write(rocks_batch)?;
        debug!("Wrote batch of {} op(s)", batch.len());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for item in self.db.iterator(IteratorMode::Start) {
            let (key, _) = item?;
            keys.push(String::from_utf8_lossy(&key).into_owned());
        }
        Ok(keys)
    }
}
