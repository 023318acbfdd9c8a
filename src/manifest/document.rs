//! Container resolution over a parsed manifest

use crate::manifest::error::ManifestError;
use crate::manifest::schema::{ContainerSpec, Manifest};

/// Index of the main container: the metadata-named container when present
/// and matching, else `main`, else `web`, else the first listed. Never
/// fails for a non-empty container list.
fn main_container_index(manifest: &Manifest) -> Result<usize, ManifestError> {
    let containers = manifest.containers();
    if containers.is_empty() {
        return Err(ManifestError::NoContainers);
    }

    let position_of = |target: &str| {
        containers
            .iter()
            .position(|c| c.name.as_deref() == Some(target))
    };

    let index = manifest
        .main_container_name()
        .and_then(position_of)
        .or_else(|| position_of("main"))
        .or_else(|| position_of("web"))
        .unwrap_or(0);
    Ok(index)
}

/// The container that receives the app's network identity and, absent an
/// explicit update list, the update.
pub fn resolve_main_container(manifest: &Manifest) -> Result<&ContainerSpec, ManifestError> {
    Ok(&manifest.containers()[main_container_index(manifest)?])
}

/// Indices of the containers an update applies to, in the order the
/// `updateContainer` field lists them. An unset field targets the main
/// container; a listed name with no matching container is an error, never
/// a silent shrink of the target set.
pub fn resolve_update_targets(manifest: &Manifest) -> Result<Vec<usize>, ManifestError> {
    let containers = manifest.containers();
    match manifest.update_container() {
        None => Ok(vec![main_container_index(manifest)?]),
        Some(names) => names
            .iter()
            .map(|name| {
                containers
                    .iter()
                    .position(|c| c.name.as_deref() == Some(name.as_str()))
                    .ok_or_else(|| ManifestError::NoSuchContainer(name.clone()))
            })
            .collect(),
    }
}
