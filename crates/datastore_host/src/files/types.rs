//! File data types shared across the gateway contract and its adapters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque, stable file identity assigned by the datastore.
pub struct FileId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Effective read/write permissions of the current caller for one file.
pub struct FilePermissions {
    /// Whether the caller may read the file.
    pub read: bool,
    /// Whether the caller may write the file.
    pub write: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single file's metadata as reported by the datastore.
///
/// Records are created only by the gateway and are never mutated in place:
/// every list refresh replaces them wholesale with freshly fetched instances.
pub struct FileRecord {
    /// Stable file identity.
    pub id: FileId,
    /// Current file name.
    pub name: String,
    /// Owner address string.
    pub owner: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Last modification time in unix seconds.
    pub last_modification_unix_s: u64,
    /// Effective permissions of the current caller.
    pub permissions: FilePermissions,
    /// Whether the current caller owns the file.
    pub is_owner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of a file's per-address permission list.
pub struct PermissionGrant {
    /// Address the grant applies to.
    pub address: String,
    /// Whether the address may read the file.
    pub read: bool,
    /// Whether the address may write the file.
    pub write: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Full fetch result for a single file: metadata plus raw content.
pub struct FileContent {
    /// File metadata snapshot captured at fetch time.
    pub record: FileRecord,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "file_id", rename_all = "kebab-case")]
/// Change notification emitted by the datastore after a backend mutation.
pub enum DatastoreEvent {
    /// A new file was stored.
    FileAdded(FileId),
    /// An existing file's name or content changed, or it was removed.
    FileChanged(FileId),
    /// A file's permission list changed.
    PermissionsChanged(FileId),
}

impl DatastoreEvent {
    /// Returns the file the event refers to.
    pub fn file_id(&self) -> FileId {
        match self {
            Self::FileAdded(id) | Self::FileChanged(id) | Self::PermissionsChanged(id) => *id,
        }
    }
}
