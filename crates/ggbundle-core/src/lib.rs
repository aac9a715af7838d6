//! ggbundle core library
//!
//! Packs a server executable and an opaque model blob into a single
//! self-contained executable, and reads such bundles back:
//! - Trailer format (the fixed 20-byte record at the end of a bundle)
//! - Bundling (concatenate server + model, append trailer, mark executable)
//! - Reading (locate and extract an embedded payload via the trailer)

pub mod bundler;
pub mod error;
pub mod reader;
pub mod trailer;

pub use bundler::{bundle, BundleReport};
pub use error::BundleError;
pub use reader::{extract_payload, read_trailer, self_payload};
pub use trailer::{Trailer, BUNDLE_MAGIC, TRAILER_SIZE};
