//! Local app directory catalog
//!
//! A local app store keeps one directory per app with its manifest at
//! `<dir>/<appId>/app.yml`. Records are built from the manifests
//! themselves, so a scan over a local store checks exactly what is
//! deployed there.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::catalog::{AppRecord, CatalogError};
use crate::manifest::ManifestFile;

pub fn scan_app_dir(dir: &Path) -> Result<Vec<AppRecord>, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut app_dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.path().is_dir() {
            app_dirs.push(entry.path());
        }
    }
    // directory iteration order is filesystem-dependent
    app_dirs.sort();

    let mut records = Vec::new();
    for app_dir in app_dirs {
        let manifest_path = app_dir.join("app.yml");
        if !manifest_path.is_file() {
            continue;
        }
        let Some(id) = app_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match ManifestFile::load(&manifest_path) {
            Ok(file) => records.push(AppRecord {
                id: id.to_string(),
                name: file.manifest.name().to_string(),
                version: file.manifest.app_version().to_string(),
                repo: file.manifest.repo().map(str::to_string),
            }),
            Err(err) => {
                warn!("skipping {}: {}", manifest_path.display(), err);
            }
        }
    }

    Ok(records)
}
