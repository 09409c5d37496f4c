//! Client-local key/value storage.
//!
//! The tracker only ever sees string keys and string values, the same surface
//! a browser's `localStorage` offers. Implementations:
//! - [`MemoryStore`]: process-local map, used by tests and embedders
//! - [`FileStore`]: JSON map under the XDG state dir, so separate CLI
//!   invocations share state the way page loads share `localStorage`
//! - `LocalStorageStore` (feature `web`, wasm32 only)

mod error;
#[cfg(not(target_arch = "wasm32"))]
mod file;
mod memory;

pub use error::StoreError;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
pub use memory::MemoryStore;

/// String key/value store that survives page navigations within one origin.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
