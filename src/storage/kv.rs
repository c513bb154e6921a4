//! redb-backed key-value store
//!
//! Layout:
//! - `links`: code bytes → target URL bytes
//! - `link_expiry`: code bytes → deadline (unix milliseconds)
//!
//! redb has no native TTL. A record whose deadline has passed is treated as
//! absent by every read, and `purge_expired` reclaims it physically.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use redb::{Database, ReadableTable, StorageError, TableDefinition};
use tracing::{debug, info};

use crate::errors::{Result, TinylinkError};
use crate::storage::ShortLink;

const LINKS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("links");
const EXPIRY: TableDefinition<&[u8], i64> = TableDefinition::new("link_expiry");

fn read_failure<E: Display>(context: &'static str) -> impl FnOnce(E) -> TinylinkError {
    move |e| TinylinkError::store_read(format!("{}: {}", context, e))
}

fn write_failure<E: Display>(context: &'static str) -> impl FnOnce(E) -> TinylinkError {
    move |e| TinylinkError::store_write(format!("{}: {}", context, e))
}

fn open_failure<E: Display>(context: &'static str) -> impl FnOnce(E) -> TinylinkError {
    move |e| TinylinkError::store_open(format!("{}: {}", context, e))
}

/// Deadline stored for `key`, if any.
fn deadline_of<T>(table: &T, key: &[u8]) -> std::result::Result<Option<i64>, StorageError>
where
    T: ReadableTable<&'static [u8], i64>,
{
    Ok(table.get(key)?.map(|guard| guard.value()))
}

/// Shared handle to the link database.
///
/// Cloning is cheap; the database is closed when the last clone is dropped.
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl KvStore {
    /// Open (or create) the database file and make sure both tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(open_failure("creating store directory"))?;
        }

        let db = Database::create(path)?;

        let txn = db
            .begin_write()
            .map_err(open_failure("beginning init transaction"))?;
        {
            txn.open_table(LINKS)
                .map_err(open_failure("creating links table"))?;
            txn.open_table(EXPIRY)
                .map_err(open_failure("creating expiry table"))?;
        }
        txn.commit().map_err(open_failure("committing init transaction"))?;

        info!("Opened link store at {}", path.display());

        Ok(Self {
            db: Arc::new(db),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `false` when the key is absent or its deadline has passed.
    pub fn exists(&self, key: &str) -> Result<bool> {
        let now = Utc::now().timestamp_millis();
        let txn = self
            .db
            .begin_read()
            .map_err(read_failure("beginning read transaction"))?;
        let links = txn
            .open_table(LINKS)
            .map_err(read_failure("opening links table"))?;

        if links
            .get(key.as_bytes())
            .map_err(read_failure("checking key"))?
            .is_none()
        {
            return Ok(false);
        }

        let expiry = txn
            .open_table(EXPIRY)
            .map_err(read_failure("opening expiry table"))?;
        let deadline =
            deadline_of(&expiry, key.as_bytes()).map_err(read_failure("reading deadline"))?;

        Ok(deadline.is_none_or(|at| at > now))
    }

    /// Fetch the value for `key`.
    ///
    /// The bytes are copied out of the transaction before it closes. A missing
    /// or expired key is a `StoreRead` error; callers that need to tell the two
    /// apart check [`KvStore::exists`] first.
    pub fn get(&self, key: &str) -> Result<String> {
        self.get_link(key)?
            .map(|link| link.target)
            .ok_or_else(|| TinylinkError::store_read(format!("getting value: key '{}' not found", key)))
    }

    /// Full record for `key`, `None` when absent or expired.
    pub fn get_link(&self, key: &str) -> Result<Option<ShortLink>> {
        let now = Utc::now();
        let txn = self
            .db
            .begin_read()
            .map_err(read_failure("beginning read transaction"))?;
        let links = txn
            .open_table(LINKS)
            .map_err(read_failure("opening links table"))?;

        let value = match links
            .get(key.as_bytes())
            .map_err(read_failure("getting value"))?
        {
            Some(guard) => guard.value().to_vec(),
            None => return Ok(None),
        };

        let expiry = txn
            .open_table(EXPIRY)
            .map_err(read_failure("opening expiry table"))?;
        let deadline =
            deadline_of(&expiry, key.as_bytes()).map_err(read_failure("reading deadline"))?;

        let expires_at = match deadline {
            Some(ms) => Some(DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| {
                TinylinkError::store_read(format!("invalid deadline {} for '{}'", ms, key))
            })?),
            None => None,
        };

        let link = ShortLink {
            code: key.to_string(),
            target: String::from_utf8(value).map_err(read_failure("copying value"))?,
            expires_at,
        };

        Ok((!link.is_expired_at(now)).then_some(link))
    }

    /// Write `value` under `key`. `ttl_minutes == 0` stores it without expiry.
    pub fn set(&self, key: &str, value: &str, ttl_minutes: u32) -> Result<()> {
        let deadline =
            (ttl_minutes > 0).then(|| Utc::now() + Duration::minutes(i64::from(ttl_minutes)));
        self.set_until(key, value, deadline)
    }

    /// Write `value` under `key` with an absolute deadline.
    ///
    /// Overwrites any previous record, including its deadline.
    pub fn set_until(&self, key: &str, value: &str, deadline: Option<DateTime<Utc>>) -> Result<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(write_failure("beginning write transaction"))?;
        {
            let mut links = txn
                .open_table(LINKS)
                .map_err(write_failure("opening links table"))?;
            links
                .insert(key.as_bytes(), value.as_bytes())
                .map_err(write_failure("setting value"))?;

            let mut expiry = txn
                .open_table(EXPIRY)
                .map_err(write_failure("opening expiry table"))?;
            match deadline {
                Some(at) => {
                    expiry
                        .insert(key.as_bytes(), at.timestamp_millis())
                        .map_err(write_failure("setting deadline"))?;
                }
                None => {
                    expiry
                        .remove(key.as_bytes())
                        .map_err(write_failure("clearing deadline"))?;
                }
            }
        }
        txn.commit().map_err(write_failure("committing write"))?;

        debug!("Stored key '{}' (deadline: {:?})", key, deadline);
        Ok(())
    }

    /// Remove `key`. Removing a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(write_failure("beginning write transaction"))?;
        {
            let mut links = txn
                .open_table(LINKS)
                .map_err(write_failure("opening links table"))?;
            links
                .remove(key.as_bytes())
                .map_err(write_failure("deleting value"))?;

            let mut expiry = txn
                .open_table(EXPIRY)
                .map_err(write_failure("opening expiry table"))?;
            expiry
                .remove(key.as_bytes())
                .map_err(write_failure("deleting deadline"))?;
        }
        txn.commit().map_err(write_failure("committing delete"))?;

        debug!("Deleted key '{}'", key);
        Ok(())
    }

    /// Physically remove every record whose deadline has passed.
    ///
    /// Returns the number of purged records.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now().timestamp_millis();
        let txn = self
            .db
            .begin_write()
            .map_err(write_failure("beginning purge transaction"))?;

        let purged = {
            let mut expiry = txn
                .open_table(EXPIRY)
                .map_err(write_failure("opening expiry table"))?;

            let elapsed = expiry
                .iter()
                .map_err(write_failure("scanning deadlines"))?
                .filter_map(|entry| match entry {
                    Ok((key, at)) if at.value() <= now => Some(Ok(key.value().to_vec())),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                })
                .collect::<std::result::Result<Vec<Vec<u8>>, StorageError>>()
                .map_err(write_failure("scanning deadlines"))?;

            let mut links = txn
                .open_table(LINKS)
                .map_err(write_failure("opening links table"))?;
            for key in &elapsed {
                links
                    .remove(key.as_slice())
                    .map_err(write_failure("purging value"))?;
                expiry
                    .remove(key.as_slice())
                    .map_err(write_failure("purging deadline"))?;
            }

            elapsed.len()
        };

        txn.commit().map_err(write_failure("committing purge"))?;
        Ok(purged)
    }
}
