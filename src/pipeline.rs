use crate::{
    assemble::RecordAssembler,
    config::Config,
    error::{Error, Result},
    model::ModelCatalog,
    point::{Location, Point, ProjectedPoint},
    resolve::{ZoneMap, ZoneResolver},
    store::Store,
    table::{InputTables, TableName},
};

/// Runs one request end to end: resolve the model, project the points,
/// resolve zones, assemble the tables. Each request checks out its own
/// session, released when the request returns.
#[derive(Debug, Clone)]
pub struct Assembler<S: Store> {
    store: S,
    tables: Vec<TableName>,
}

impl<S: Store> Assembler<S> {
    /// Produce the ten core tables.
    pub fn new(store: S) -> Self {
        Self { store, tables: TableName::CORE.to_vec() }
    }

    /// Build from settings, honouring `extended_tables`.
    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store).with_extended_tables(config.extended_tables)
    }

    /// Also produce the subsidies and supply tables.
    pub fn with_extended_tables(mut self, enabled: bool) -> Self {
        self.tables = if enabled { TableName::ALL.to_vec() } else { TableName::CORE.to_vec() };
        self
    }

    #[inline] pub fn store(&self) -> &S { &self.store }

    /// Tables produced per request, in output order.
    #[inline] pub fn tables(&self) -> &[TableName] { &self.tables }

    /// Assemble the engine input tables for `locations` on model `model`.
    ///
    /// Every location must fall inside a zone of the model; otherwise the
    /// request fails with `PointOutsideCoverage` before any parameter
    /// table is read.
    #[tracing::instrument(skip(self, locations), fields(points = locations.len()))]
    pub fn assemble(&self, model: &str, locations: &[Location]) -> Result<InputTables> {
        let mut session = self.store.checkout().map_err(Error::store)?;

        let model = ModelCatalog::new(session.as_mut()).load(model)?;
        let points = Point::from_locations(locations);
        let projected = points.iter().map(Point::project).collect::<Vec<_>>();

        let zones = ZoneResolver::new(session.as_mut()).resolve(&model, &projected)?;
        if let Err(err) = zones.ensure_complete(&model, points.len()) {
            tracing::warn!(model = model.name(), "{err}");
            return Err(err);
        }

        let tables = RecordAssembler::new(session.as_mut(), &model)
            .assemble(&points, &zones, &self.tables)?;
        tracing::info!(model = model.name(), tables = tables.len(), zones = zones.scope().len(), "assembled input tables");
        Ok(tables)
    }

    /// Resolve the zone of each location without assembling anything.
    /// Unresolved points are simply absent from the map.
    #[tracing::instrument(skip(self, locations), fields(points = locations.len()))]
    pub fn locate(&self, model: &str, locations: &[Location]) -> Result<ZoneMap> {
        let mut session = self.store.checkout().map_err(Error::store)?;

        let model = ModelCatalog::new(session.as_mut()).load(model)?;
        let projected = Point::from_locations(locations).iter()
            .map(Point::project)
            .collect::<Vec<ProjectedPoint>>();

        ZoneResolver::new(session.as_mut()).resolve(&model, &projected)
    }
}
