//! Origin registry client for the Framer package manager.
//!
//! An origin is a static file tree served over HTTP (or read from a local
//! directory) with this layout:
//!
//! ```text
//! <origin>/
//!   map.json                 {"name": ..., "base": ..., "modules": [...]}
//!   <module>/info.json       module metadata
//!   <module>/require.json    dependency descriptor
//!   <module>/file.zip        packaged module tree
//! ```
//!
//! [`sync`] walks every trusted origin and merges their catalogs into a
//! [`ModuleCache`] keyed by qualified name (`module@origin`). [`search`]
//! queries that cache.

pub mod cache;
pub mod cancel;
pub mod error;
pub mod fetch;
pub mod origin;
pub mod search;
pub mod sync;
pub mod transport;

pub use cache::{ModuleCache, ModuleCacheEntry, local_name, qualified_name, split_reference};
pub use cancel::CancelFlag;
pub use error::{Error, Result};
pub use fetch::{DEFAULT_ATTEMPTS, DEFAULT_USER_AGENT, FetchPolicy, Fetcher};
pub use origin::OriginMap;
pub use search::search;
pub use sync::{sync, sync_project};
pub use transport::{FileTransport, HttpTransport, OriginTransport, Transport, TransportError};
