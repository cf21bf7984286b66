use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::campaign::db::CampaignStore;
use crate::campaign::Campaign;
use crate::creative::db::CreativeStore;
use crate::creative::Creative;
use crate::error::Error;
use crate::placement::db::PlacementStore;
use crate::placement::Placement;
use crate::team::db::TeamStore;
use crate::team::TeamMember;
use crate::typedid::{parse_id_number, TypedId, TypedIdMarker};
use crate::user::db::UserStore;
use crate::user::User;

pub type CampaignCollection = Collection<Campaign>;
pub type CreativeCollection = Collection<Creative>;
pub type PlacementCollection = Collection<Placement>;
pub type UserCollection = Collection<User>;
pub type TeamCollection = Collection<TeamMember>;

/// What to do when a stored collection cannot be parsed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnCorrupt {
    /// Treat the collection as empty and leave the file alone.
    Empty,
    /// Move the file aside and treat the collection as empty.
    Quarantine,
    /// Surface the problem to the caller.
    Fail,
}

impl Default for OnCorrupt {
    fn default() -> OnCorrupt {
        OnCorrupt::Empty
    }
}

impl std::str::FromStr for OnCorrupt {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(OnCorrupt::Empty),
            "quarantine" => Ok(OnCorrupt::Quarantine),
            "fail" => Ok(OnCorrupt::Fail),
            other => Err(format!("unknown corruption policy '{}'", other)),
        }
    }
}

/// Whole-collection storage of loosely typed records.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn exists(&self, collection: &'static str) -> Result<bool, Error>;

    /// Missing collections read as empty.
    async fn read(&self, collection: &'static str) -> Result<Vec<Value>, Error>;

    /// Replaces the entire collection.
    async fn write(&self, collection: &'static str, records: Vec<Value>) -> Result<(), Error>;

    #[tracing::instrument(skip(self, records))]
    async fn seed(&self, collection: &'static str, records: Vec<Value>) -> Result<bool, Error> {
        if self.exists(collection).await? {
            return Ok(false);
        }

        self.write(collection, records).await?;
        info!("seeded collection {}", collection);

        Ok(true)
    }

    /// Returns `<prefix>-<max+1>` over the ids that follow `<prefix>-<digits>`.
    #[tracing::instrument(skip(self))]
    async fn next_id(
        &self,
        collection: &'static str,
        prefix: &'static str,
    ) -> Result<String, Error> {
        let records = self.read(collection).await?;
        let next = max_id_number(&records, prefix) + 1;

        Ok(format!("{}-{:03}", prefix, next))
    }
}

fn max_id_number(records: &[Value], prefix: &str) -> u64 {
    records
        .iter()
        .filter_map(|record| record.get("id").and_then(Value::as_str))
        .filter_map(|id| parse_id_number(prefix, id))
        .max()
        .unwrap_or(0)
}

/// Stores each collection as a pretty-printed json array in `<dir>/<collection>.json`.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    on_corrupt: OnCorrupt,
    write_locks: Mutex<HashMap<&'static str, Arc<tokio::sync::Mutex<()>>>>,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>, on_corrupt: OnCorrupt) -> Result<FileBackend, Error> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        Ok(FileBackend {
            dir,
            on_corrupt,
            write_locks: Mutex::new(HashMap::new()),
        })
    }

    fn path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    fn write_lock(&self, collection: &'static str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = match self.write_locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };

        Arc::clone(locks.entry(collection).or_default())
    }

    async fn recover(&self, collection: &'static str, path: &Path) -> Result<Vec<Value>, Error> {
        match self.on_corrupt {
            OnCorrupt::Empty => {
                warn!("collection {} is unreadable, treating as empty", collection);
                Ok(vec![])
            }
            OnCorrupt::Quarantine => {
                let quarantine = path.with_extension(format!(
                    "json.corrupt-{}",
                    Utc::now().timestamp_millis()
                ));
                tokio::fs::rename(path, &quarantine).await?;
                warn!(
                    "collection {} is unreadable, moved to {}",
                    collection,
                    quarantine.display()
                );
                Ok(vec![])
            }
            OnCorrupt::Fail => Err(Error::CorruptCollection { collection }),
        }
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn exists(&self, collection: &'static str) -> Result<bool, Error> {
        Ok(tokio::fs::metadata(self.path(collection)).await.is_ok())
    }

    #[tracing::instrument(skip(self))]
    async fn read(&self, collection: &'static str) -> Result<Vec<Value>, Error> {
        let path = self.path(collection);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(records) => Ok(records),
            Err(_) => self.recover(collection, &path).await,
        }
    }

    #[tracing::instrument(skip(self, records))]
    async fn write(&self, collection: &'static str, records: Vec<Value>) -> Result<(), Error> {
        let content = serde_json::to_string_pretty(&records)?;
        let path = self.path(collection);

        let lock = self.write_lock(collection);
        let _guard = lock.lock().await;
        tokio::task::spawn_blocking(move || write_atomic(&path, &content)).await??;

        Ok(())
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), Error> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|err| err.error)?;

    Ok(())
}

/// Keeps collections in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<&'static str, Vec<Value>>>,
}

impl MemoryBackend {
    pub fn new() -> MemoryBackend {
        MemoryBackend::default()
    }

    fn collections(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, Vec<Value>>> {
        match self.collections.lock() {
            Ok(collections) => collections,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn exists(&self, collection: &'static str) -> Result<bool, Error> {
        Ok(self.collections().contains_key(collection))
    }

    async fn read(&self, collection: &'static str) -> Result<Vec<Value>, Error> {
        let records = self.collections().get(collection).cloned();

        Ok(records.unwrap_or_default())
    }

    async fn write(&self, collection: &'static str, records: Vec<Value>) -> Result<(), Error> {
        self.collections().insert(collection, records);

        Ok(())
    }
}

/// A type that is stored as one record of a named collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// The field that uniquely identifies a record.
    const KEY: &'static str = "id";

    fn key(&self) -> String;
}

/// Typed access to one collection of a [`StorageBackend`].
pub struct Collection<T: Record> {
    backend: Arc<dyn StorageBackend>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for Collection<T> {
    fn clone(&self) -> Collection<T> {
        Collection {
            backend: Arc::clone(&self.backend),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Collection<T> {
        Collection {
            backend,
            _record: PhantomData,
        }
    }

    /// Reads every record that decodes as `T`, skipping the rest.
    pub async fn find_all(&self) -> Result<Vec<T>, Error> {
        let records = self.backend.read(T::COLLECTION).await?;
        let total = records.len();

        let decoded: Vec<T> = records
            .into_iter()
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect();

        if decoded.len() < total {
            warn!(
                "skipped {} undecodable records in {}",
                total - decoded.len(),
                T::COLLECTION
            );
        }

        Ok(decoded)
    }

    pub async fn find_one<F>(&self, predicate: F) -> Result<Option<T>, Error>
    where
        F: Fn(&T) -> bool + Send,
    {
        let records = self.find_all().await?;

        Ok(records.into_iter().find(|record| predicate(record)))
    }

    pub async fn insert_many(&self, new_records: &[T]) -> Result<(), Error> {
        let mut records = self.backend.read(T::COLLECTION).await?;
        for record in new_records {
            records.push(serde_json::to_value(record)?);
        }

        self.backend.write(T::COLLECTION, records).await
    }

    pub async fn insert_one(&self, record: &T) -> Result<(), Error> {
        self.insert_many(std::slice::from_ref(record)).await
    }

    /// Replaces the stored record with the same key, returning whether one matched.
    pub async fn replace_one(&self, record: &T) -> Result<bool, Error> {
        let key = record.key();
        let mut records = self.backend.read(T::COLLECTION).await?;

        let position = records
            .iter()
            .position(|r| record_key::<T>(r) == Some(key.as_str()));
        let index = match position {
            Some(index) => index,
            None => return Ok(false),
        };

        records[index] = serde_json::to_value(record)?;
        self.backend.write(T::COLLECTION, records).await?;

        Ok(true)
    }

    /// Removes the stored record with the given key, returning whether one matched.
    pub async fn delete_one(&self, key: &str) -> Result<bool, Error> {
        let mut records = self.backend.read(T::COLLECTION).await?;

        let position = records.iter().position(|r| record_key::<T>(r) == Some(key));
        let index = match position {
            Some(index) => index,
            None => return Ok(false),
        };

        records.remove(index);
        self.backend.write(T::COLLECTION, records).await?;

        Ok(true)
    }

    pub async fn seed(&self, records: &[T]) -> Result<bool, Error> {
        let records = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        self.backend.seed(T::COLLECTION, records).await
    }
}

impl<T: Record + TypedIdMarker> Collection<T> {
    pub async fn next_id(&self) -> Result<TypedId<T>, Error> {
        let id = self.backend.next_id(T::COLLECTION, T::prefix()).await?;

        id.parse()
            .map_err(|_| Error::ExistentialState(format!("generated id {} does not parse", id)))
    }
}

fn record_key<T: Record>(record: &Value) -> Option<&str> {
    record.get(T::KEY).and_then(Value::as_str)
}

pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
    fn creatives(&self) -> &dyn CreativeStore;
    fn placements(&self) -> &dyn PlacementStore;
    fn users(&self) -> &dyn UserStore;
    fn team(&self) -> &dyn TeamStore;
}

#[derive(Clone)]
pub struct ReachDatabase {
    campaigns: CampaignCollection,
    creatives: CreativeCollection,
    placements: PlacementCollection,
    users: UserCollection,
    team: TeamCollection,
}

impl ReachDatabase {
    pub fn new(backend: Arc<dyn StorageBackend>) -> ReachDatabase {
        ReachDatabase {
            campaigns: Collection::new(Arc::clone(&backend)),
            creatives: Collection::new(Arc::clone(&backend)),
            placements: Collection::new(Arc::clone(&backend)),
            users: Collection::new(Arc::clone(&backend)),
            team: Collection::new(backend),
        }
    }

    pub fn in_memory() -> ReachDatabase {
        ReachDatabase::new(Arc::new(MemoryBackend::new()))
    }
}

impl Database for ReachDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }

    fn creatives(&self) -> &dyn CreativeStore {
        &self.creatives
    }

    fn placements(&self) -> &dyn PlacementStore {
        &self.placements
    }

    fn users(&self) -> &dyn UserStore {
        &self.users
    }

    fn team(&self) -> &dyn TeamStore {
        &self.team
    }
}
