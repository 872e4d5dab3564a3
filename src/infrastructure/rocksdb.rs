use crate::domain::loan::SimulationRequest;
use crate::domain::ports::{FORM_STORAGE_KEY, FormStore};
use crate::error::{Result, SimulationError};
use async_trait::async_trait;
use log::warn;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding remembered form values.
pub const CF_FORM: &str = "form";

/// Persistent form store backed by RocksDB.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBFormStore {
    db: Arc<DB>,
}

impl RocksDBFormStore {
    /// Opens or creates a database at `path`, creating the form column family if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_form = ColumnFamilyDescriptor::new(CF_FORM, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_form])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn form_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_FORM)
            .ok_or_else(|| SimulationError::Storage("Form column family not found".to_string()))
    }
}

#[async_trait]
impl FormStore for RocksDBFormStore {
    async fn load(&self) -> Result<Option<SimulationRequest>> {
        let cf = self.form_cf()?;
        let Some(bytes) = self.db.get_cf(cf, FORM_STORAGE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                warn!("Ignoring unreadable stored form data: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, request: &SimulationRequest) -> Result<()> {
        let cf = self.form_cf()?;
        let value = serde_json::to_vec(request)
            .map_err(|e| SimulationError::Storage(format!("Serialization error: {}", e)))?;
        self.db.put_cf(cf, FORM_STORAGE_KEY, value)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let cf = self.form_cf()?;
        self.db.delete_cf(cf, FORM_STORAGE_KEY)?;
        Ok(())
    }
}
