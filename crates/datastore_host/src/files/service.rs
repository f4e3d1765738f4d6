//! Datastore gateway service contract and no-op adapter.

use std::{future::Future, pin::Pin, rc::Rc};

use super::types::{DatastoreEvent, FileContent, FileId, FileRecord, PermissionGrant};

/// Object-safe boxed future used by [`DatastoreGateway`] async methods.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback registered through [`DatastoreGateway::subscribe_changes`].
///
/// Fired after every successful backend mutation, on the single-threaded
/// runtime the gateway lives on.
pub type ChangeListener = Rc<dyn Fn(&DatastoreEvent)>;

/// Async service boundary for the external decentralized datastore.
///
/// Every call suspends until the remote operation resolves; failures are
/// reported as human-readable strings and are never retried here.
pub trait DatastoreGateway {
    /// Lists all files visible to the current caller.
    fn list_files<'a>(&'a self) -> GatewayFuture<'a, Result<Vec<FileRecord>, String>>;

    /// Fetches a single file's metadata and content.
    fn get_file<'a>(&'a self, id: FileId) -> GatewayFuture<'a, Result<FileContent, String>>;

    /// Fetches a file's per-address permission list.
    fn get_file_permissions<'a>(
        &'a self,
        id: FileId,
    ) -> GatewayFuture<'a, Result<Vec<PermissionGrant>, String>>;

    /// Stores a new file and returns its assigned id.
    fn add_file<'a>(
        &'a self,
        name: &'a str,
        bytes: &'a [u8],
    ) -> GatewayFuture<'a, Result<FileId, String>>;

    /// Renames an existing file.
    fn set_filename<'a>(
        &'a self,
        id: FileId,
        name: &'a str,
    ) -> GatewayFuture<'a, Result<(), String>>;

    /// Replaces an existing file's content.
    fn set_file_content<'a>(
        &'a self,
        id: FileId,
        bytes: &'a [u8],
    ) -> GatewayFuture<'a, Result<(), String>>;

    /// Grants or revokes write access for an address on a file.
    fn set_write_permission<'a>(
        &'a self,
        id: FileId,
        address: &'a str,
        enabled: bool,
    ) -> GatewayFuture<'a, Result<(), String>>;

    /// Registers a change listener fired after every backend mutation.
    ///
    /// Establishing the subscription is itself asynchronous: the backend may
    /// need to open its event stream before listeners can be attached.
    fn subscribe_changes<'a>(
        &'a self,
        listener: ChangeListener,
    ) -> GatewayFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op gateway for unsupported targets and baseline tests.
///
/// Queries succeed with empty results; mutations fail with a message naming
/// the rejected operation.
pub struct NoopDatastoreGateway;

impl NoopDatastoreGateway {
    fn unavailable(op: &str) -> String {
        format!("datastore unavailable: {op}")
    }
}

impl DatastoreGateway for NoopDatastoreGateway {
    fn list_files<'a>(&'a self) -> GatewayFuture<'a, Result<Vec<FileRecord>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn get_file<'a>(&'a self, _id: FileId) -> GatewayFuture<'a, Result<FileContent, String>> {
        Box::pin(async { Err(Self::unavailable("get_file")) })
    }

    fn get_file_permissions<'a>(
        &'a self,
        _id: FileId,
    ) -> GatewayFuture<'a, Result<Vec<PermissionGrant>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn add_file<'a>(
        &'a self,
        _name: &'a str,
        _bytes: &'a [u8],
    ) -> GatewayFuture<'a, Result<FileId, String>> {
        Box::pin(async { Err(Self::unavailable("add_file")) })
    }

    fn set_filename<'a>(
        &'a self,
        _id: FileId,
        _name: &'a str,
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unavailable("set_filename")) })
    }

    fn set_file_content<'a>(
        &'a self,
        _id: FileId,
        _bytes: &'a [u8],
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unavailable("set_file_content")) })
    }

    fn set_write_permission<'a>(
        &'a self,
        _id: FileId,
        _address: &'a str,
        _enabled: bool,
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unavailable("set_write_permission")) })
    }

    fn subscribe_changes<'a>(
        &'a self,
        _listener: ChangeListener,
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}
