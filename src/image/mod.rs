//! Container image handling
//!
//! [`reference`] splits and reassembles `repository[:tag][@digest]`
//! strings, [`puller`] is the registry boundary (the docker CLI in
//! production), and [`resolver`] turns a target version into the concrete
//! digest-pinned image reference written back into manifests.

pub mod puller;
pub mod reference;
pub mod resolver;

pub use puller::{DockerCli, ImagePuller, PullError};
pub use reference::ImageReference;
pub use resolver::resolve_new_image;
