//! Save-to-disk service contract used by the download operation.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`FileSaver`].
pub type SaverFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that hands downloaded content to the user's disk.
pub trait FileSaver {
    /// Saves `bytes` under `name` in the host environment.
    fn save<'a>(&'a self, name: &'a str, bytes: &'a [u8]) -> SaverFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op saver for unsupported targets.
pub struct NoopFileSaver;

impl FileSaver for NoopFileSaver {
    fn save<'a>(&'a self, _name: &'a str, _bytes: &'a [u8]) -> SaverFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory saver recording every save for inspection in tests.
pub struct MemoryFileSaver {
    saves: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
}

impl MemoryFileSaver {
    /// Returns the `(name, bytes)` pairs saved so far, in order.
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saves.borrow().clone()
    }
}

impl FileSaver for MemoryFileSaver {
    fn save<'a>(&'a self, name: &'a str, bytes: &'a [u8]) -> SaverFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.saves.borrow_mut().push((name.to_string(), bytes.to_vec()));
            Ok(())
        })
    }
}
