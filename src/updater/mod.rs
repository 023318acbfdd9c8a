//! Scan orchestration
//!
//! Apps are checked strictly one after another so a scan stays inside the
//! upstream API's rate limit. Within a single app, the target containers
//! resolve their new images concurrently, so one slow registry does not
//! serialize the others.
//!
//! Every per-app failure is caught here and turned into a result row or a
//! log line; no single app may take down the scan.

use std::path::Path;

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::AppRecord;
use crate::github::{RepoRef, TagSource};
use crate::image::puller::{ImagePuller, PullError};
use crate::image::resolver::resolve_new_image;
use crate::manifest::{ManifestError, ManifestFile, document};
use crate::notify::{self, Announcer};
use crate::report::{CHECK_FAILED_PLACEHOLDER, ReportRow};
use crate::version::{CheckError, CheckOutcome, VersioningPolicy};

/// Final state of one app after a scan pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppStatus {
    UpToDate,
    /// A newer version exists; there was no local manifest to rewrite
    UpdateAvailable { latest: String },
    /// A newer version exists and the local manifest now pins it
    UpdateApplied { latest: String },
    /// A newer version exists but could not be (fully) applied
    UpdateFailed { latest: String, reason: String },
    /// The check itself reached no verdict
    CheckFailed { reason: String },
}

/// Scan result for one app. Every scanned app produces exactly one of
/// these, whatever went wrong along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppResult {
    pub id: String,
    pub name: String,
    pub declared: String,
    pub status: AppStatus,
}

#[derive(Debug, Error)]
enum UpdateError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{failed} of {total} container update(s) failed")]
    ContainerUpdates { failed: usize, total: usize },
}

#[derive(Debug, Error)]
enum TargetError {
    #[error("container `{0}` has no image")]
    MissingImage(String),

    #[error(transparent)]
    Pull(#[from] PullError),
}

/// Scan all catalog records in order. When `app_dir` is given, available
/// updates are applied to the manifests beneath it.
pub async fn scan<S, P>(
    tags: &S,
    puller: &P,
    announcer: &dyn Announcer,
    records: &[AppRecord],
    app_dir: Option<&Path>,
) -> Vec<AppResult>
where
    S: TagSource + ?Sized,
    P: ImagePuller + ?Sized,
{
    let mut results = Vec::with_capacity(records.len());
    for record in records {
        info!("Checking app {}...", record.name);
        results.push(process_app(tags, puller, announcer, record, app_dir).await);
    }
    results
}

async fn process_app<S, P>(
    tags: &S,
    puller: &P,
    announcer: &dyn Announcer,
    record: &AppRecord,
    app_dir: Option<&Path>,
) -> AppResult
where
    S: TagSource + ?Sized,
    P: ImagePuller + ?Sized,
{
    let status = match check_app(tags, record).await {
        Ok(CheckOutcome::UpToDate) => AppStatus::UpToDate,
        Ok(CheckOutcome::UpdateAvailable { latest }) => match app_dir {
            Some(dir) => apply_update(puller, announcer, record, dir, &latest).await,
            None => AppStatus::UpdateAvailable { latest },
        },
        Err(err) => {
            warn!("Version check for {} failed: {}", record.id, err);
            AppStatus::CheckFailed {
                reason: err.to_string(),
            }
        }
    };

    AppResult {
        id: record.id.clone(),
        name: record.name.clone(),
        declared: record.version.clone(),
        status,
    }
}

async fn check_app<S: TagSource + ?Sized>(
    tags: &S,
    record: &AppRecord,
) -> Result<CheckOutcome, CheckError> {
    let reference = record
        .repo
        .as_deref()
        .ok_or_else(|| CheckError::UnsupportedRepository("<none>".to_string()))?;
    let repo = RepoRef::parse(reference)
        .ok_or_else(|| CheckError::UnsupportedRepository(reference.to_string()))?;

    let policy = VersioningPolicy::for_app(&record.id);
    let candidates = if policy.tracks_commits() {
        vec![tags.default_branch_tip(&repo).await?]
    } else {
        tags.list_tags(&repo).await?
    };
    policy.compare(&record.version, &candidates)
}

async fn apply_update<P: ImagePuller + ?Sized>(
    puller: &P,
    announcer: &dyn Announcer,
    record: &AppRecord,
    app_dir: &Path,
    latest: &str,
) -> AppStatus {
    match try_apply_update(puller, record, app_dir, latest).await {
        Ok(()) => {
            info!("Updated {} to {}", record.id, latest);
            announcer
                .announce(&notify::update_applied_message(&record.name, latest))
                .await;
            AppStatus::UpdateApplied {
                latest: latest.to_string(),
            }
        }
        Err(err) => {
            warn!("Update of {} to {} failed: {}", record.id, latest, err);
            announcer
                .announce(&notify::update_failed_message(&record.name, latest))
                .await;
            AppStatus::UpdateFailed {
                latest: latest.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

async fn try_apply_update<P: ImagePuller + ?Sized>(
    puller: &P,
    record: &AppRecord,
    app_dir: &Path,
    latest: &str,
) -> Result<(), UpdateError> {
    let manifest_path = app_dir.join(&record.id).join("app.yml");
    let mut file = ManifestFile::load(&manifest_path)?;
    let targets = document::resolve_update_targets(&file.manifest)?;

    // all target containers resolve concurrently; join preserves order
    let resolutions = targets.iter().map(|&index| {
        let container = &file.manifest.containers()[index];
        let label = container
            .name
            .clone()
            .unwrap_or_else(|| format!("#{index}"));
        let image = container.image.clone();
        async move {
            let resolved = match image {
                Some(image) => resolve_new_image(puller, &record.id, &image, latest)
                    .await
                    .map_err(TargetError::Pull),
                None => Err(TargetError::MissingImage(label.clone())),
            };
            (index, label, resolved)
        }
    });
    let outcomes = join_all(resolutions).await;

    let total = outcomes.len();
    let mut failed = 0;
    for (index, label, resolved) in outcomes {
        match resolved {
            Ok(new_image) => file.manifest.containers_mut()[index].image = Some(new_image),
            Err(err) => {
                warn!("Container {} of {} not updated: {}", label, record.id, err);
                failed += 1;
            }
        }
    }

    // the declared version only moves when every target moved with it;
    // containers that did resolve keep their new image either way
    if failed == 0 {
        file.manifest.set_app_version(latest);
    }
    file.save()?;

    if failed > 0 {
        return Err(UpdateError::ContainerUpdates { failed, total });
    }
    Ok(())
}

/// Project scan results onto report rows: one per app with an available or
/// attempted update, plus placeholder rows for failed checks. Up-to-date
/// apps stay out of the table.
pub fn report_rows(results: &[AppResult]) -> Vec<ReportRow> {
    results
        .iter()
        .filter_map(|result| match &result.status {
            AppStatus::UpToDate => None,
            AppStatus::UpdateAvailable { latest }
            | AppStatus::UpdateApplied { latest }
            | AppStatus::UpdateFailed { latest, .. } => Some(ReportRow {
                app: result.name.clone(),
                latest: latest.clone(),
                declared: result.declared.clone(),
            }),
            AppStatus::CheckFailed { .. } => Some(ReportRow {
                app: result.name.clone(),
                latest: CHECK_FAILED_PLACEHOLDER.to_string(),
                declared: CHECK_FAILED_PLACEHOLDER.to_string(),
            }),
        })
        .collect()
}
