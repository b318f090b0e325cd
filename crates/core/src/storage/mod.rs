//! Object storage adapter for uploaded site assets, backed by Apache OpenDAL.
//!
//! ```text
//! <prefix><folder>/<YYYYMMDD_HHMMSS>_<random8>.<ext>
//!          │
//!          └── https://<bucket>.s3.<region>.amazonaws.com/<key>
//! ```
//!
//! The public URL is a pure function of bucket, region and key, so a URL
//! handed out by [`StorageService::upload`] can later be turned back into its
//! key by [`StorageService::delete`].

mod config;
mod error;
mod key;
mod service;

pub use config::StorageConfig;
pub use error::StorageError;
pub use key::generate_unique_key;
pub use service::{FileUpload, StorageService};
