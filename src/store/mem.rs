use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock, RwLockReadGuard, TryLockError,
    },
    thread,
    time::{Duration, Instant},
};

use ahash::AHashMap;
use anyhow::{anyhow, bail, ensure, Result};
use geo::MultiPolygon;

use crate::{
    config::Config,
    geom::ZoneIndex,
    io::store as io,
    model::{Headers, ModelHandle, ModelId, ZoneId},
    point::ProjectedPoint,
    store::{LookupKey, RowKey, Session, Store},
    table::{Scope, TableName},
};

/// Everything the store holds for one model.
#[derive(Debug, Clone)]
pub struct ModelData {
    handle: ModelHandle,
    headers: Headers,
    zones: ZoneIndex,
    keyed: AHashMap<TableName, AHashMap<RowKey, Vec<f64>>>,
    rows: AHashMap<TableName, Vec<Vec<f64>>>,
}

impl ModelData {
    pub fn new(id: ModelId, name: &str, headers: Headers) -> Self {
        Self {
            handle: ModelHandle { id, name: Arc::from(name) },
            headers,
            zones: ZoneIndex::default(),
            keyed: AHashMap::new(),
            rows: AHashMap::new(),
        }
    }

    #[inline] pub fn handle(&self) -> &ModelHandle { &self.handle }

    #[inline] pub fn headers(&self) -> &Headers { &self.headers }

    /// Number of zone polygons.
    #[inline] pub fn zone_count(&self) -> usize { self.zones.len() }

    /// Add a zone polygon (projected plane) with its per-model attribute vector.
    pub fn add_zone(&mut self, id: ZoneId, shape: MultiPolygon<f64>, data: Vec<f64>) {
        self.zones.insert(id, shape);
        self.keyed.entry(TableName::Zones).or_default().insert(RowKey::zone(id), data);
    }

    /// Add a keyed row; `payload` is every column after the key columns.
    pub fn add_row(&mut self, table: TableName, key: RowKey, payload: Vec<f64>) -> Result<()> {
        let scope = table.scope();
        ensure!(scope != Scope::Model, "[store::mem] {table} is model-scoped, use add_record");
        ensure!(
            key.agent.is_some() == scope.has_agent()
                && key.ty.is_some() == scope.has_type()
                && key.zone.is_some(),
            "[store::mem] Key {key:?} does not fit {table} ({scope:?})",
        );
        self.keyed.entry(table).or_default().insert(key, payload);
        Ok(())
    }

    /// Add a full record to a model-scoped table.
    pub fn add_record(&mut self, table: TableName, record: Vec<f64>) -> Result<()> {
        ensure!(table.scope() == Scope::Model, "[store::mem] {table} is keyed, use add_row");
        self.rows.entry(table).or_default().push(record);
        Ok(())
    }

    /// Zone polygons in insertion order.
    pub(crate) fn zones(&self) -> impl Iterator<Item = (ZoneId, &MultiPolygon<f64>)> {
        self.zones.iter()
    }

    /// Keyed rows of a table, in no particular order.
    pub(crate) fn keyed_rows(&self, table: TableName) -> impl Iterator<Item = (&RowKey, &Vec<f64>)> {
        self.keyed.get(&table).into_iter().flat_map(|rows| rows.iter())
    }

    /// One keyed row.
    pub(crate) fn row(&self, table: TableName, key: &RowKey) -> Option<&Vec<f64>> {
        self.keyed.get(&table)?.get(key)
    }

    /// Records of a model-scoped table, in insertion order.
    pub(crate) fn records(&self, table: TableName) -> &[Vec<f64>] {
        self.rows.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Default)]
struct Catalog {
    models: AHashMap<ModelId, ModelData>,
    names: AHashMap<Arc<str>, ModelId>,
}

/// In-process store. All models sit behind one lock; a session holds a
/// read guard for the lifetime of the request.
#[derive(Debug)]
pub struct MemStore {
    catalog: RwLock<Catalog>,
    queries: AtomicUsize,
    checkout_timeout: Duration,
    request_timeout: Duration,
}

impl Default for MemStore {
    fn default() -> Self { Self::new() }
}

impl MemStore {
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            catalog: RwLock::new(Catalog::default()),
            queries: AtomicUsize::new(0),
            checkout_timeout: config.checkout_timeout(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Set how long `checkout` waits for the lock, and how long a session
    /// may run before its queries fail.
    pub fn with_timeouts(mut self, checkout: Duration, request: Duration) -> Self {
        self.checkout_timeout = checkout;
        self.request_timeout = request;
        self
    }

    /// Add or replace a model.
    pub fn insert_model(&self, model: ModelData) -> Result<()> {
        let mut catalog = self.catalog.write()
            .map_err(|_| anyhow!("[store::mem] Store lock poisoned"))?;

        let id = model.handle.id;
        let name = model.handle.name.clone();
        if let Some(&other) = catalog.names.get(&name) {
            ensure!(other == id, "[store::mem] Model name '{name}' already used by model {other}");
        }
        if let Some(old) = catalog.models.insert(id, model) {
            catalog.names.remove(&old.handle.name);
        }
        catalog.names.insert(name, id);
        Ok(())
    }

    /// Snapshot of every stored model, ordered by id.
    pub fn models(&self) -> Result<Vec<ModelData>> {
        let catalog = self.catalog.read()
            .map_err(|_| anyhow!("[store::mem] Store lock poisoned"))?;
        let mut models = catalog.models.values().cloned().collect::<Vec<_>>();
        models.sort_by_key(|model| model.handle.id);
        Ok(models)
    }

    /// Load a store directory (one folder per model).
    pub fn read_from_dir(path: &Path) -> Result<Self> {
        let store = Self::new();
        for model in io::read_store_dir(path)? {
            store.insert_model(model)?;
        }
        Ok(store)
    }

    /// Save every model to `path`, one folder per model.
    pub fn write_to_dir(&self, path: &Path) -> Result<()> {
        io::write_store_dir(&self.models()?, path)
    }

    /// Total number of round trips served by all sessions.
    #[inline] pub fn query_count(&self) -> usize { self.queries.load(Ordering::Relaxed) }

    pub fn reset_query_count(&self) { self.queries.store(0, Ordering::Relaxed) }
}

impl Store for MemStore {
    fn checkout(&self) -> Result<Box<dyn Session + '_>> {
        let started = Instant::now();
        let catalog = loop {
            match self.catalog.try_read() {
                Ok(guard) => break guard,
                Err(TryLockError::WouldBlock) => {
                    if started.elapsed() >= self.checkout_timeout {
                        bail!("[store::mem] Timed out after {:?} waiting for a session", self.checkout_timeout);
                    }
                    thread::sleep(Duration::from_millis(1));
                }
                Err(TryLockError::Poisoned(_)) => bail!("[store::mem] Store lock poisoned"),
            }
        };

        Ok(Box::new(MemSession {
            catalog,
            queries: &self.queries,
            deadline: started + self.request_timeout,
        }))
    }
}

struct MemSession<'a> {
    catalog: RwLockReadGuard<'a, Catalog>,
    queries: &'a AtomicUsize,
    deadline: Instant,
}

impl MemSession<'_> {
    /// Account for one round trip and enforce the request deadline.
    fn round_trip(&self) -> Result<()> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        ensure!(Instant::now() <= self.deadline, "[store::mem] Request deadline exceeded");
        Ok(())
    }

    fn model(&self, id: ModelId) -> Result<&ModelData> {
        self.catalog.models.get(&id)
            .ok_or_else(|| anyhow!("[store::mem] Unknown model id {id}"))
    }
}

impl Session for MemSession<'_> {
    fn find_model(&mut self, name: &str) -> Result<Option<ModelHandle>> {
        self.round_trip()?;
        Ok(self.catalog.names.get(name)
            .and_then(|id| self.catalog.models.get(id))
            .map(|model| model.handle.clone()))
    }

    fn model_headers(&mut self, model: ModelId) -> Result<Option<Headers>> {
        self.round_trip()?;
        Ok(self.catalog.models.get(&model).map(|model| model.headers.clone()))
    }

    fn locate(&mut self, model: ModelId, points: &[ProjectedPoint]) -> Result<Vec<(usize, ZoneId)>> {
        self.round_trip()?;
        let zones = &self.model(model)?.zones;
        if zones.is_empty() {
            return Ok(Vec::new());
        }
        Ok(points.iter()
            .filter_map(|point| zones.locate(point.coord).map(|zone| (point.index, zone)))
            .collect())
    }

    fn model_rows(&mut self, model: ModelId, table: TableName) -> Result<Vec<Vec<f64>>> {
        self.round_trip()?;
        ensure!(table.scope() == Scope::Model, "[store::mem] {table} is not model-scoped");
        Ok(self.model(model)?.records(table).to_vec())
    }

    fn lookup(&mut self, model: ModelId, table: TableName, keys: &[LookupKey]) -> Result<Vec<Option<Vec<f64>>>> {
        self.round_trip()?;
        ensure!(table.scope() != Scope::Model, "[store::mem] {table} is model-scoped");
        let rows = self.model(model)?.keyed.get(&table);
        Ok(keys.iter()
            .map(|key| rows.and_then(|rows| rows.get(&key.row_key())).cloned())
            .collect())
    }
}
