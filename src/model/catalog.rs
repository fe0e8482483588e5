use crate::{
    error::{Error, Result},
    model::{Headers, Model, ModelHandle},
    store::Session,
};

/// Resolves model names to their identity and header definitions
/// through one store session.
pub struct ModelCatalog<'a> {
    session: &'a mut dyn Session,
}

impl<'a> ModelCatalog<'a> {
    pub fn new(session: &'a mut dyn Session) -> Self {
        Self { session }
    }

    /// Look up a model by name.
    pub fn resolve(&mut self, name: &str) -> Result<ModelHandle> {
        self.session.find_model(name)
            .map_err(Error::store)?
            .ok_or_else(|| Error::ModelNotFound(name.to_string()))
    }

    /// Fetch the four header lists of a model in one query.
    pub fn headers(&mut self, handle: &ModelHandle) -> Result<Headers> {
        self.session.model_headers(handle.id)
            .map_err(Error::store)?
            .ok_or_else(|| Error::ModelNotFound(handle.name.to_string()))
    }

    /// Resolve a model and its headers: two round trips.
    pub fn load(&mut self, name: &str) -> Result<Model> {
        let handle = self.resolve(name)?;
        let headers = self.headers(&handle)?;
        Ok(Model::new(handle, headers))
    }
}
