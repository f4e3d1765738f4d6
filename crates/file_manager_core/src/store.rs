//! File manager synchronization store.
//!
//! The store mediates every user intent through the datastore gateway and
//! keeps an observable projection of remote state consistent: the selection
//! never points at a record absent from the current file list, and after
//! every list refresh the selection is rebound to the freshly fetched record
//! instance.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use thiserror::Error;

use datastore_host::{
    ChangeListener, DatastoreEvent, FileId, FilePayload, FileRecord, PermissionGrant,
};

use crate::{
    context::StoreContext,
    signal::{StateCell, Subscription},
};

/// Coalescing delay before the selected file's permission list is fetched.
pub const PERMISSIONS_COALESCE_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Inline editing affordance currently active in the sidebar.
pub enum EditMode {
    /// No inline editing active.
    #[default]
    None,
    /// Renaming the selected file.
    Name,
    /// Replacing the selected file's content.
    Content,
    /// Changing the selected file's permissions.
    Permissions,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by store operations.
pub enum StoreError {
    /// A datastore or save-to-disk call was rejected.
    #[error("datastore call failed: {0}")]
    Gateway(String),
    /// An upload payload could not be read into bytes.
    #[error("reading upload {name} failed: {reason}")]
    Upload {
        /// Name of the payload that failed to read.
        name: String,
        /// Reason reported by the payload source.
        reason: String,
    },
}

struct StoreInner {
    ctx: StoreContext,
    files: StateCell<Vec<FileRecord>>,
    selected_file: StateCell<Option<FileRecord>>,
    edit_mode: StateCell<EditMode>,
    selected_file_permissions: StateCell<Vec<PermissionGrant>>,
    permissions_generation: Cell<u64>,
    permissions_watch: RefCell<Option<Subscription>>,
}

#[derive(Clone)]
/// Observable file manager state plus the intent surface mutating it.
///
/// Cheap to clone; all clones share state. Construct once at application
/// start with the injected [`StoreContext`], call
/// [`initialize`](Self::initialize), and hand clones to the presentation
/// layer.
pub struct FileManagerStore {
    inner: Rc<StoreInner>,
}

impl FileManagerStore {
    /// Creates a store bound to `ctx` with empty state.
    pub fn new(ctx: StoreContext) -> Self {
        let store = Self {
            inner: Rc::new(StoreInner {
                ctx,
                files: StateCell::new(Vec::new()),
                selected_file: StateCell::new(None),
                edit_mode: StateCell::new(EditMode::None),
                selected_file_permissions: StateCell::new(Vec::new()),
                permissions_generation: Cell::new(0),
                permissions_watch: RefCell::new(None),
            }),
        };
        store.install_permissions_watch();
        store
    }

    /// Observable file list, replaced wholesale on every refresh.
    pub fn files(&self) -> StateCell<Vec<FileRecord>> {
        self.inner.files.clone()
    }

    /// Observable selection; always a record from the current list, or none.
    pub fn selected_file(&self) -> StateCell<Option<FileRecord>> {
        self.inner.selected_file.clone()
    }

    /// Observable active inline edit mode.
    pub fn edit_mode(&self) -> StateCell<EditMode> {
        self.inner.edit_mode.clone()
    }

    /// Observable permission list of the selected file; empty while none is
    /// selected. Recomputed asynchronously after a short coalescing delay,
    /// last request wins.
    pub fn selected_file_permissions(&self) -> StateCell<Vec<PermissionGrant>> {
        self.inner.selected_file_permissions.clone()
    }

    /// Connects to the datastore and loads the initial file list.
    ///
    /// The change-event subscription is established first, so an event
    /// arriving before the initial refresh completes can only trigger a
    /// redundant second refresh; refresh is an idempotent full
    /// fetch-and-replace, so that is harmless.
    ///
    /// # Errors
    ///
    /// Propagates subscription or initial-fetch failure; the store is not
    /// usable afterwards.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let weak = Rc::downgrade(&self.inner);
        let listener: ChangeListener = Rc::new(move |_event: &DatastoreEvent| {
            let Some(inner) = weak.upgrade() else { return };
            let store = FileManagerStore { inner: inner.clone() };
            let spawner = inner.ctx.spawner();
            spawner.spawn_local(Box::pin(async move {
                // No caller to propagate to from the event path.
                if let Err(err) = store.refresh().await {
                    tracing::warn!(error = %err, "event-driven refresh failed");
                }
            }));
        });
        let gateway = self.inner.ctx.gateway();
        gateway
            .subscribe_changes(listener)
            .await
            .map_err(StoreError::Gateway)?;
        self.refresh().await
    }

    /// Full fetch-and-replace of the file list, then selection re-derivation.
    ///
    /// If a selection was active, it is rebound to the new list's record with
    /// the same id (never the stale instance), or cleared when absent.
    pub(crate) async fn refresh(&self) -> Result<(), StoreError> {
        let gateway = self.inner.ctx.gateway();
        let fresh = gateway.list_files().await.map_err(StoreError::Gateway)?;
        let previous_id = self
            .inner
            .selected_file
            .with(|selected| selected.as_ref().map(|record| record.id));
        self.inner.files.set(fresh);
        if let Some(id) = previous_id {
            let rebound = self
                .inner
                .files
                .with(|files| files.iter().find(|record| record.id == id).cloned());
            self.inner.selected_file.set(rebound);
        }
        Ok(())
    }

    /// Toggles the selection: an exact id match clears it, otherwise the
    /// matching record from the current list becomes selected. An unknown id
    /// leaves the selection unchanged.
    pub fn select_file(&self, id: FileId) {
        let already_selected = self
            .inner
            .selected_file
            .with(|selected| selected.as_ref().is_some_and(|record| record.id == id));
        if already_selected {
            self.inner.selected_file.set(None);
            return;
        }
        let found = self
            .inner
            .files
            .with(|files| files.iter().find(|record| record.id == id).cloned());
        if let Some(record) = found {
            self.inner.selected_file.set(Some(record));
        }
    }

    /// Returns whether `file` is the current selection.
    pub fn is_file_selected(&self, file: &FileRecord) -> bool {
        self.inner
            .selected_file
            .with(|selected| selected.as_ref().is_some_and(|record| record.id == file.id))
    }

    /// Activates an inline edit mode; any mode may follow any other.
    pub fn set_edit_mode(&self, mode: EditMode) {
        self.inner.edit_mode.set(mode);
    }

    /// Renames a file and leaves rename mode on success.
    ///
    /// The list is not refreshed here; the gateway's change event drives the
    /// eventual refresh.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure; edit mode is left unchanged then.
    pub async fn set_filename(&self, id: FileId, name: &str) -> Result<(), StoreError> {
        let gateway = self.inner.ctx.gateway();
        gateway
            .set_filename(id, name)
            .await
            .map_err(StoreError::Gateway)?;
        self.set_edit_mode(EditMode::None);
        Ok(())
    }

    /// Replaces a file's content and leaves content-edit mode on success.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure; edit mode is left unchanged then.
    pub async fn set_file_content(&self, id: FileId, bytes: &[u8]) -> Result<(), StoreError> {
        let gateway = self.inner.ctx.gateway();
        gateway
            .set_file_content(id, bytes)
            .await
            .map_err(StoreError::Gateway)?;
        self.set_edit_mode(EditMode::None);
        Ok(())
    }

    /// Grants write access on a file to `address`. Grant-only: this intent
    /// exposes no revoke path.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure.
    pub async fn add_write_permission(&self, id: FileId, address: &str) -> Result<(), StoreError> {
        let gateway = self.inner.ctx.gateway();
        gateway
            .set_write_permission(id, address, true)
            .await
            .map_err(StoreError::Gateway)
    }

    /// Uploads payloads strictly sequentially, in input order.
    ///
    /// Each payload is read into bytes, then stored under its original name.
    /// The first failure aborts the batch; payloads already uploaded stand,
    /// there is no rollback.
    ///
    /// # Errors
    ///
    /// [`StoreError::Upload`] when a payload cannot be read,
    /// [`StoreError::Gateway`] when storing one fails.
    pub async fn upload_files(&self, payloads: &[Rc<dyn FilePayload>]) -> Result<(), StoreError> {
        let gateway = self.inner.ctx.gateway();
        for payload in payloads {
            let bytes = payload.read_bytes().await.map_err(|reason| StoreError::Upload {
                name: payload.name().to_string(),
                reason,
            })?;
            gateway
                .add_file(payload.name(), &bytes)
                .await
                .map_err(StoreError::Gateway)?;
        }
        Ok(())
    }

    /// Fetches a file's full content and hands it to the save-to-disk
    /// service. No local state changes.
    ///
    /// # Errors
    ///
    /// Propagates gateway or saver failure.
    pub async fn download_file(&self, id: FileId) -> Result<(), StoreError> {
        let gateway = self.inner.ctx.gateway();
        let file = gateway.get_file(id).await.map_err(StoreError::Gateway)?;
        let saver = self.inner.ctx.file_saver();
        saver
            .save(&file.record.name, &file.bytes)
            .await
            .map_err(StoreError::Gateway)
    }

    /// Delete intent surfaced by the sidebar.
    ///
    /// The datastore exposes no delete operation yet, so this has no effect
    /// beyond a diagnostic.
    pub fn delete_file(&self, id: FileId) {
        tracing::warn!(file_id = id.0, "delete requested but the datastore does not support it");
    }

    /// Installs the derived permission computation: every selection change
    /// bumps a generation counter and spawns a task that waits out the
    /// coalescing delay, fetches the new selection's grants, and publishes
    /// them only when no later selection change superseded it.
    fn install_permissions_watch(&self) {
        let weak = Rc::downgrade(&self.inner);
        let subscription = self.inner.selected_file.subscribe(move |selected| {
            let Some(inner) = weak.upgrade() else { return };
            let generation = inner.permissions_generation.get().wrapping_add(1);
            inner.permissions_generation.set(generation);
            let selected_id = selected.as_ref().map(|record| record.id);
            let task_handle = weak.clone();
            let spawner = inner.ctx.spawner();
            spawner.spawn_local(Box::pin(async move {
                let Some(inner) = task_handle.upgrade() else { return };
                let timer = inner.ctx.timer();
                timer.delay(PERMISSIONS_COALESCE_MS).await;
                if inner.permissions_generation.get() != generation {
                    return;
                }
                let grants = match selected_id {
                    None => Vec::new(),
                    Some(id) => {
                        let gateway = inner.ctx.gateway();
                        match gateway.get_file_permissions(id).await {
                            Ok(grants) => grants,
                            Err(err) => {
                                tracing::warn!(error = %err, "selected-file permission fetch failed");
                                return;
                            }
                        }
                    }
                };
                if inner.permissions_generation.get() != generation {
                    return;
                }
                inner.selected_file_permissions.set(grants);
            }));
        });
        *self.inner.permissions_watch.borrow_mut() = Some(subscription);
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::task::LocalSpawnExt;
    use pretty_assertions::assert_eq;

    use datastore_host::{
        DatastoreGateway, FileContent, GatewayFuture, ImmediateDelay, LocalTask,
        MemoryDatastoreGateway, MemoryFilePayload, MemoryFileSaver, TaskSpawner,
    };

    use super::*;

    const LOCAL: &str = "0x00aa";
    const OTHER: &str = "0x00bb";

    struct PoolSpawner(LocalSpawner);

    impl TaskSpawner for PoolSpawner {
        fn spawn_local(&self, task: LocalTask) {
            self.0.spawn_local(task).expect("spawn task");
        }
    }

    fn harness() -> (LocalPool, MemoryDatastoreGateway, MemoryFileSaver, FileManagerStore) {
        let pool = LocalPool::new();
        let gateway = MemoryDatastoreGateway::new(LOCAL);
        let saver = MemoryFileSaver::default();
        let ctx = StoreContext::new(
            Rc::new(gateway.clone()),
            Rc::new(saver.clone()),
            Rc::new(PoolSpawner(pool.spawner())),
            Rc::new(ImmediateDelay),
        );
        let store = FileManagerStore::new(ctx);
        (pool, gateway, saver, store)
    }

    fn selected_id(store: &FileManagerStore) -> Option<FileId> {
        store
            .selected_file()
            .with(|selected| selected.as_ref().map(|record| record.id))
    }

    #[test]
    fn initialize_loads_the_list_with_no_selection() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add a");
        pool.run_until(gateway.add_file("b.txt", b"b")).expect("add b");

        pool.run_until(store.initialize()).expect("initialize");

        assert_eq!(store.files().with(Vec::len), 2);
        assert_eq!(selected_id(&store), None);
        assert_eq!(store.files().with(|files| files[0].id), a);
    }

    #[test]
    fn select_file_toggles_and_ignores_unknown_ids() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until(store.initialize()).expect("initialize");

        store.select_file(a);
        assert_eq!(selected_id(&store), Some(a));

        // Unknown id: neither clears nor changes the selection.
        store.select_file(FileId(99));
        assert_eq!(selected_id(&store), Some(a));

        // Exact match toggles the selection off.
        store.select_file(a);
        assert_eq!(selected_id(&store), None);

        // Selecting an unknown id with nothing selected stays a no-op.
        store.select_file(FileId(99));
        assert_eq!(selected_id(&store), None);
    }

    #[test]
    fn is_file_selected_matches_on_id_only() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add a");
        let b = pool.run_until(gateway.add_file("b.txt", b"b")).expect("add b");
        pool.run_until(store.initialize()).expect("initialize");

        let records = store.files().get();
        assert!(!store.is_file_selected(&records[0]));

        store.select_file(a);
        assert!(store.is_file_selected(&records[0]));
        assert!(!store.is_file_selected(&records[1]));

        store.select_file(b);
        assert!(store.is_file_selected(&records[1]));
    }

    #[test]
    fn refresh_rebinds_the_selection_to_the_fresh_record() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until(store.initialize()).expect("initialize");
        store.select_file(a);

        // Mutate behind the store's back; the change event schedules the
        // refresh that must rebind the selection to the new record.
        pool.run_until(gateway.set_filename(a, "renamed.txt")).expect("rename");
        pool.run_until_stalled();

        let selected = store.selected_file().get().expect("still selected");
        assert_eq!(selected.id, a);
        assert_eq!(selected.name, "renamed.txt");
    }

    #[test]
    fn refresh_clears_the_selection_when_the_id_disappears() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add a");
        let b = pool.run_until(gateway.add_file("b.txt", b"b")).expect("add b");
        pool.run_until(store.initialize()).expect("initialize");
        store.select_file(b);

        assert!(gateway.remove_file(b));
        pool.run_until_stalled();

        assert_eq!(selected_id(&store), None);
        assert_eq!(store.files().with(Vec::len), 1);
        assert_eq!(store.files().with(|files| files[0].id), a);
    }

    #[test]
    fn events_keep_the_list_fresh_without_explicit_refreshes() {
        let (mut pool, gateway, _saver, store) = harness();
        pool.run_until(store.initialize()).expect("initialize");
        assert_eq!(store.files().with(Vec::len), 0);

        pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until_stalled();

        assert_eq!(store.files().with(Vec::len), 1);
    }

    #[test]
    fn edit_mode_switches_freely_between_modes() {
        let (_pool, _gateway, _saver, store) = harness();
        assert_eq!(store.edit_mode().get(), EditMode::None);

        store.set_edit_mode(EditMode::Content);
        store.set_edit_mode(EditMode::Permissions);
        assert_eq!(store.edit_mode().get(), EditMode::Permissions);
    }

    #[test]
    fn successful_rename_resets_edit_mode_before_any_refresh() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until(store.initialize()).expect("initialize");

        store.set_edit_mode(EditMode::Name);
        pool.run_until(store.set_filename(a, "b.txt")).expect("rename");

        // The event-driven refresh has not run yet; the reset is immediate.
        assert_eq!(store.edit_mode().get(), EditMode::None);
        pool.run_until_stalled();
        assert_eq!(store.files().with(|files| files[0].name.clone()), "b.txt");
    }

    #[test]
    fn successful_content_update_resets_edit_mode() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until(store.initialize()).expect("initialize");

        store.set_edit_mode(EditMode::Content);
        pool.run_until(store.set_file_content(a, b"updated")).expect("write");
        assert_eq!(store.edit_mode().get(), EditMode::None);

        pool.run_until_stalled();
        assert_eq!(store.files().with(|files| files[0].file_size), 7);
    }

    #[test]
    fn failed_rename_leaves_edit_mode_active() {
        let (mut pool, _gateway, _saver, store) = harness();
        pool.run_until(store.initialize()).expect("initialize");

        store.set_edit_mode(EditMode::Name);
        let err = pool
            .run_until(store.set_filename(FileId(99), "x"))
            .expect_err("rename of unknown id");
        assert!(matches!(err, StoreError::Gateway(_)));
        assert_eq!(store.edit_mode().get(), EditMode::Name);
    }

    #[test]
    fn upload_stops_at_the_first_failing_payload() {
        let (mut pool, gateway, _saver, store) = harness();
        pool.run_until(store.initialize()).expect("initialize");

        let payloads: Vec<Rc<dyn FilePayload>> = vec![
            Rc::new(MemoryFilePayload::bytes("a.txt", b"a".to_vec())),
            Rc::new(MemoryFilePayload::failing("b.txt", "unreadable")),
            Rc::new(MemoryFilePayload::bytes("c.txt", b"c".to_vec())),
        ];
        let err = pool
            .run_until(store.upload_files(&payloads))
            .expect_err("second payload fails");
        assert_eq!(
            err,
            StoreError::Upload { name: "b.txt".to_string(), reason: "unreadable".to_string() }
        );

        // The first upload stands, the third was never attempted.
        let names: Vec<String> = pool
            .run_until(gateway.list_files())
            .expect("list")
            .into_iter()
            .map(|record| record.name)
            .collect();
        assert_eq!(names, vec!["a.txt".to_string()]);
    }

    #[test]
    fn upload_preserves_input_order() {
        let (mut pool, gateway, _saver, store) = harness();
        pool.run_until(store.initialize()).expect("initialize");

        let payloads: Vec<Rc<dyn FilePayload>> = vec![
            Rc::new(MemoryFilePayload::bytes("first.txt", b"1".to_vec())),
            Rc::new(MemoryFilePayload::bytes("second.txt", b"2".to_vec())),
        ];
        pool.run_until(store.upload_files(&payloads)).expect("upload");

        let names: Vec<String> = pool
            .run_until(gateway.list_files())
            .expect("list")
            .into_iter()
            .map(|record| record.name)
            .collect();
        assert_eq!(names, vec!["first.txt".to_string(), "second.txt".to_string()]);
    }

    #[test]
    fn download_hands_name_and_bytes_to_the_saver() {
        let (mut pool, gateway, saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"abc")).expect("add");
        pool.run_until(store.initialize()).expect("initialize");

        pool.run_until(store.download_file(a)).expect("download");

        assert_eq!(saver.saved(), vec![("a.txt".to_string(), b"abc".to_vec())]);
        // No local state changed.
        assert_eq!(selected_id(&store), None);
        assert_eq!(store.edit_mode().get(), EditMode::None);
    }

    #[test]
    fn add_write_permission_grants_write_access() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until(store.initialize()).expect("initialize");

        pool.run_until(store.add_write_permission(a, OTHER)).expect("grant");

        let grants = pool.run_until(gateway.get_file_permissions(a)).expect("grants");
        let other = grants.iter().find(|grant| grant.address == OTHER).expect("entry");
        assert!(other.write);
    }

    #[test]
    fn selected_file_permissions_follow_the_selection() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until(gateway.set_write_permission(a, OTHER, true)).expect("grant");
        pool.run_until(store.initialize()).expect("initialize");

        store.select_file(a);
        pool.run_until_stalled();
        let grants = store.selected_file_permissions().get();
        assert_eq!(grants.len(), 2);
        assert_eq!(grants[0].address, LOCAL);
        assert_eq!(grants[1].address, OTHER);

        // Deselecting yields the empty list again.
        store.select_file(a);
        pool.run_until_stalled();
        assert_eq!(store.selected_file_permissions().get(), Vec::new());
    }

    #[test]
    fn rapid_selection_changes_resolve_to_the_last_selection() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add a");
        let b = pool.run_until(gateway.add_file("b.txt", b"b")).expect("add b");
        pool.run_until(gateway.set_write_permission(b, OTHER, true)).expect("grant");
        pool.run_until(store.initialize()).expect("initialize");

        // Two selection changes before any fetch task runs: the first fetch
        // must be superseded by the second.
        store.select_file(a);
        store.select_file(b);
        pool.run_until_stalled();

        let grants = store.selected_file_permissions().get();
        assert_eq!(grants.len(), 2);
        assert!(grants.iter().any(|grant| grant.address == OTHER));
    }

    struct OfflineGateway;

    impl DatastoreGateway for OfflineGateway {
        fn list_files<'a>(&'a self) -> GatewayFuture<'a, Result<Vec<FileRecord>, String>> {
            Box::pin(async { Err("datastore offline".to_string()) })
        }

        fn get_file<'a>(&'a self, _id: FileId) -> GatewayFuture<'a, Result<FileContent, String>> {
            Box::pin(async { Err("datastore offline".to_string()) })
        }

        fn get_file_permissions<'a>(
            &'a self,
            _id: FileId,
        ) -> GatewayFuture<'a, Result<Vec<PermissionGrant>, String>> {
            Box::pin(async { Err("datastore offline".to_string()) })
        }

        fn add_file<'a>(
            &'a self,
            _name: &'a str,
            _bytes: &'a [u8],
        ) -> GatewayFuture<'a, Result<FileId, String>> {
            Box::pin(async { Err("datastore offline".to_string()) })
        }

        fn set_filename<'a>(
            &'a self,
            _id: FileId,
            _name: &'a str,
        ) -> GatewayFuture<'a, Result<(), String>> {
            Box::pin(async { Err("datastore offline".to_string()) })
        }

        fn set_file_content<'a>(
            &'a self,
            _id: FileId,
            _bytes: &'a [u8],
        ) -> GatewayFuture<'a, Result<(), String>> {
            Box::pin(async { Err("datastore offline".to_string()) })
        }

        fn set_write_permission<'a>(
            &'a self,
            _id: FileId,
            _address: &'a str,
            _enabled: bool,
        ) -> GatewayFuture<'a, Result<(), String>> {
            Box::pin(async { Err("datastore offline".to_string()) })
        }

        fn subscribe_changes<'a>(
            &'a self,
            _listener: ChangeListener,
        ) -> GatewayFuture<'a, Result<(), String>> {
            Box::pin(async { Ok(()) })
        }
    }

    #[test]
    fn initialize_propagates_gateway_failure() {
        let mut pool = LocalPool::new();
        let ctx = StoreContext::new(
            Rc::new(OfflineGateway),
            Rc::new(MemoryFileSaver::default()),
            Rc::new(PoolSpawner(pool.spawner())),
            Rc::new(ImmediateDelay),
        );
        let store = FileManagerStore::new(ctx);

        let err = pool.run_until(store.initialize()).expect_err("initial fetch fails");
        assert_eq!(err, StoreError::Gateway("datastore offline".to_string()));
    }

    #[test]
    fn delete_intent_changes_nothing() {
        let (mut pool, gateway, _saver, store) = harness();
        let a = pool.run_until(gateway.add_file("a.txt", b"a")).expect("add");
        pool.run_until(store.initialize()).expect("initialize");
        store.select_file(a);

        store.delete_file(a);
        pool.run_until_stalled();

        assert_eq!(store.files().with(Vec::len), 1);
        assert_eq!(selected_id(&store), Some(a));
    }
}
