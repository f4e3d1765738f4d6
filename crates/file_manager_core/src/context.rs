//! Host service bundle injected into the file manager store.

use std::rc::Rc;

use datastore_host::{
    DatastoreGateway, DelayTimer, FileSaver, ImmediateDelay, NoopDatastoreGateway, NoopFileSaver,
    NoopTaskSpawner, TaskSpawner,
};

#[derive(Clone)]
/// Service bundle for the store's side effects.
///
/// Constructed once at application start and handed to
/// [`FileManagerStore::new`](crate::FileManagerStore::new); this replaces any
/// ambient global lookup with explicit injection.
pub struct StoreContext {
    gateway: Rc<dyn DatastoreGateway>,
    file_saver: Rc<dyn FileSaver>,
    spawner: Rc<dyn TaskSpawner>,
    timer: Rc<dyn DelayTimer>,
}

impl Default for StoreContext {
    fn default() -> Self {
        Self {
            gateway: Rc::new(NoopDatastoreGateway),
            file_saver: Rc::new(NoopFileSaver),
            spawner: Rc::new(NoopTaskSpawner),
            timer: Rc::new(ImmediateDelay),
        }
    }
}

impl StoreContext {
    /// Creates a context from concrete host services.
    pub fn new(
        gateway: Rc<dyn DatastoreGateway>,
        file_saver: Rc<dyn FileSaver>,
        spawner: Rc<dyn TaskSpawner>,
        timer: Rc<dyn DelayTimer>,
    ) -> Self {
        Self { gateway, file_saver, spawner, timer }
    }

    /// Returns the configured datastore gateway.
    pub fn gateway(&self) -> Rc<dyn DatastoreGateway> {
        self.gateway.clone()
    }

    /// Returns the configured save-to-disk service.
    pub fn file_saver(&self) -> Rc<dyn FileSaver> {
        self.file_saver.clone()
    }

    /// Returns the configured fire-and-forget task spawner.
    pub fn spawner(&self) -> Rc<dyn TaskSpawner> {
        self.spawner.clone()
    }

    /// Returns the configured coalescing delay timer.
    pub fn timer(&self) -> Rc<dyn DelayTimer> {
        self.timer.clone()
    }
}
