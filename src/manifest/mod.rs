//! App manifest handling
//!
//! An app manifest (`app.yml`) declares metadata and an ordered list of
//! service containers. Three schema revisions are in circulation; all of
//! them are read and written here behind one accessor surface.
//!
//! - [`schema`]: the typed revisions and the uniform accessors
//! - [`document`]: main-container and update-target resolution
//! - [`editor`]: comment-preserving load/modify/save of manifest files

pub mod document;
pub mod editor;
pub mod error;
pub mod schema;

pub use editor::ManifestFile;
pub use error::ManifestError;
pub use schema::{ContainerSpec, Manifest, OneOrMany};
