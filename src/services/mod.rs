// Service exports
pub mod catalog;
pub mod session;

pub use catalog::{Catalog, CatalogError};
pub use session::{
    FileSessionStore, MemorySessionStore, SessionContext, SessionError, SessionStore, SESSION_STORAGE_KEY,
};
