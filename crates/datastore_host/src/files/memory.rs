//! In-memory datastore gateway used by headless tests and local development.

use std::{cell::RefCell, rc::Rc};

use super::service::{ChangeListener, DatastoreGateway, GatewayFuture};
use super::types::{
    DatastoreEvent, FileContent, FileId, FilePermissions, FileRecord, PermissionGrant,
};

const BASE_MODIFICATION_UNIX_S: u64 = 1_700_000_000;

#[derive(Debug, Clone)]
struct MemoryFile {
    id: FileId,
    name: String,
    owner: String,
    bytes: Vec<u8>,
    last_modification_unix_s: u64,
    grants: Vec<PermissionGrant>,
}

struct MemoryState {
    local_address: String,
    next_id: u64,
    clock_unix_s: u64,
    files: Vec<MemoryFile>,
    listeners: Vec<ChangeListener>,
}

#[derive(Clone)]
/// Single-threaded in-memory [`DatastoreGateway`].
///
/// Assigns sequential file ids, stamps modification times from a logical
/// monotonic clock, and fires registered change listeners after every
/// successful mutation. Records are derived for a configurable local caller
/// address: the owner sees full permissions, other callers see their grant.
pub struct MemoryDatastoreGateway {
    inner: Rc<RefCell<MemoryState>>,
}

impl MemoryDatastoreGateway {
    /// Creates an empty gateway whose caller is `local_address`.
    pub fn new(local_address: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryState {
                local_address: local_address.into(),
                next_id: 1,
                clock_unix_s: BASE_MODIFICATION_UNIX_S,
                files: Vec::new(),
                listeners: Vec::new(),
            })),
        }
    }

    /// Inserts a file owned by an arbitrary address without firing events.
    ///
    /// Test seam for pre-populating state the caller did not create itself.
    pub fn seed_file(
        &self,
        name: impl Into<String>,
        owner: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> FileId {
        let mut state = self.inner.borrow_mut();
        let id = FileId(state.next_id);
        state.next_id += 1;
        state.clock_unix_s += 1;
        let stamp = state.clock_unix_s;
        state.files.push(MemoryFile {
            id,
            name: name.into(),
            owner: owner.into(),
            bytes: bytes.into(),
            last_modification_unix_s: stamp,
            grants: Vec::new(),
        });
        id
    }

    /// Removes a file and fires a change event; returns whether it existed.
    pub fn remove_file(&self, id: FileId) -> bool {
        let removed = {
            let mut state = self.inner.borrow_mut();
            let before = state.files.len();
            state.files.retain(|file| file.id != id);
            state.files.len() != before
        };
        if removed {
            self.emit(DatastoreEvent::FileChanged(id));
        }
        removed
    }

    fn emit(&self, event: DatastoreEvent) {
        let listeners: Vec<ChangeListener> = self.inner.borrow().listeners.clone();
        for listener in listeners {
            listener(&event);
        }
    }

    fn record_for(state: &MemoryState, file: &MemoryFile) -> FileRecord {
        let is_owner = file.owner == state.local_address;
        let permissions = if is_owner {
            FilePermissions { read: true, write: true }
        } else {
            state_grant(file, &state.local_address)
        };
        FileRecord {
            id: file.id,
            name: file.name.clone(),
            owner: file.owner.clone(),
            file_size: file.bytes.len() as u64,
            last_modification_unix_s: file.last_modification_unix_s,
            permissions,
            is_owner,
        }
    }

    fn touch(state: &mut MemoryState, id: FileId) -> Result<&mut MemoryFile, String> {
        state.clock_unix_s += 1;
        let stamp = state.clock_unix_s;
        let file = state
            .files
            .iter_mut()
            .find(|file| file.id == id)
            .ok_or_else(|| format!("unknown file id {}", id.0))?;
        file.last_modification_unix_s = stamp;
        Ok(file)
    }
}

fn state_grant(file: &MemoryFile, address: &str) -> FilePermissions {
    file.grants
        .iter()
        .find(|grant| grant.address == address)
        .map(|grant| FilePermissions { read: grant.read, write: grant.write })
        .unwrap_or_default()
}

impl DatastoreGateway for MemoryDatastoreGateway {
    fn list_files<'a>(&'a self) -> GatewayFuture<'a, Result<Vec<FileRecord>, String>> {
        Box::pin(async move {
            let state = self.inner.borrow();
            Ok(state
                .files
                .iter()
                .map(|file| Self::record_for(&state, file))
                .collect())
        })
    }

    fn get_file<'a>(&'a self, id: FileId) -> GatewayFuture<'a, Result<FileContent, String>> {
        Box::pin(async move {
            let state = self.inner.borrow();
            let file = state
                .files
                .iter()
                .find(|file| file.id == id)
                .ok_or_else(|| format!("unknown file id {}", id.0))?;
            Ok(FileContent {
                record: Self::record_for(&state, file),
                bytes: file.bytes.clone(),
            })
        })
    }

    fn get_file_permissions<'a>(
        &'a self,
        id: FileId,
    ) -> GatewayFuture<'a, Result<Vec<PermissionGrant>, String>> {
        Box::pin(async move {
            let state = self.inner.borrow();
            let file = state
                .files
                .iter()
                .find(|file| file.id == id)
                .ok_or_else(|| format!("unknown file id {}", id.0))?;
            let mut grants = vec![PermissionGrant {
                address: file.owner.clone(),
                read: true,
                write: true,
            }];
            grants.extend(file.grants.iter().cloned());
            Ok(grants)
        })
    }

    fn add_file<'a>(
        &'a self,
        name: &'a str,
        bytes: &'a [u8],
    ) -> GatewayFuture<'a, Result<FileId, String>> {
        Box::pin(async move {
            let id = {
                let mut state = self.inner.borrow_mut();
                let id = FileId(state.next_id);
                state.next_id += 1;
                state.clock_unix_s += 1;
                let stamp = state.clock_unix_s;
                let owner = state.local_address.clone();
                state.files.push(MemoryFile {
                    id,
                    name: name.to_string(),
                    owner,
                    bytes: bytes.to_vec(),
                    last_modification_unix_s: stamp,
                    grants: Vec::new(),
                });
                id
            };
            self.emit(DatastoreEvent::FileAdded(id));
            Ok(id)
        })
    }

    fn set_filename<'a>(
        &'a self,
        id: FileId,
        name: &'a str,
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async move {
            {
                let mut state = self.inner.borrow_mut();
                let file = Self::touch(&mut state, id)?;
                file.name = name.to_string();
            }
            self.emit(DatastoreEvent::FileChanged(id));
            Ok(())
        })
    }

    fn set_file_content<'a>(
        &'a self,
        id: FileId,
        bytes: &'a [u8],
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async move {
            {
                let mut state = self.inner.borrow_mut();
                let file = Self::touch(&mut state, id)?;
                file.bytes = bytes.to_vec();
            }
            self.emit(DatastoreEvent::FileChanged(id));
            Ok(())
        })
    }

    fn set_write_permission<'a>(
        &'a self,
        id: FileId,
        address: &'a str,
        enabled: bool,
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async move {
            {
                let mut state = self.inner.borrow_mut();
                let file = Self::touch(&mut state, id)?;
                match file.grants.iter_mut().find(|grant| grant.address == address) {
                    Some(grant) => grant.write = enabled,
                    None => file.grants.push(PermissionGrant {
                        address: address.to_string(),
                        read: false,
                        write: enabled,
                    }),
                }
            }
            self.emit(DatastoreEvent::PermissionsChanged(id));
            Ok(())
        })
    }

    fn subscribe_changes<'a>(
        &'a self,
        listener: ChangeListener,
    ) -> GatewayFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().listeners.push(listener);
            Ok(())
        })
    }
}
