//! Upload payload contract: a named source of bytes read asynchronously.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`FilePayload`].
pub type PayloadFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A single upload source: the original file name plus its raw bytes.
///
/// Reading the bytes may suspend (browser blob conversion, disk reads) and
/// may fail per payload; the embedding application supplies the concrete
/// implementation for its host environment.
pub trait FilePayload {
    /// Original file name to store the payload under.
    fn name(&self) -> &str;

    /// Reads the payload into a raw byte buffer.
    fn read_bytes<'a>(&'a self) -> PayloadFuture<'a, Result<Vec<u8>, String>>;
}

#[derive(Debug, Clone)]
/// In-memory payload carrying either bytes or a forced read failure.
pub struct MemoryFilePayload {
    name: String,
    outcome: Result<Vec<u8>, String>,
}

impl MemoryFilePayload {
    /// Creates a payload that reads successfully.
    pub fn bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), outcome: Ok(bytes.into()) }
    }

    /// Creates a payload whose read fails with `reason`.
    pub fn failing(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { name: name.into(), outcome: Err(reason.into()) }
    }
}

impl FilePayload for MemoryFilePayload {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes<'a>(&'a self) -> PayloadFuture<'a, Result<Vec<u8>, String>> {
        Box::pin(async move { self.outcome.clone() })
    }
}
