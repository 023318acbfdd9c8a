//! Resolving a container's next image reference
//!
//! The comparator reports bare versions with any `v` prefix stripped, but
//! many upstream images publish their tags with the prefix. Resolution
//! tries the bare tag first and retries once with `v` prepended. Whatever
//! tag pulls successfully is then pinned to the image's content digest, so
//! the manifest never references a mutable tag.

use tracing::debug;

use crate::image::puller::{ImagePuller, PullError};
use crate::image::reference::ImageReference;

/// Registry publishing quirks, keyed by app id
fn tag_for_app(app_id: &str, version: &str) -> String {
    match app_id {
        // gitea publishes the variant these manifests run under a suffixed tag
        "gitea" => format!("{version}-rootless"),
        _ => version.to_string(),
    }
}

/// Compute the digest-pinned image reference for `new_version`, keeping the
/// repository portion of `current_image` untouched. On failure of both pull
/// attempts the caller must leave the container spec as it was.
pub async fn resolve_new_image<P: ImagePuller + ?Sized>(
    puller: &P,
    app_id: &str,
    current_image: &str,
    new_version: &str,
) -> Result<String, PullError> {
    let reference = ImageReference::parse(current_image);
    let tag = tag_for_app(app_id, new_version);

    let candidate = reference.with_tag(&tag);
    let pulled = match puller.pull(&candidate).await {
        Ok(()) => candidate,
        Err(err) => {
            let fallback = reference.with_tag(&format!("v{tag}"));
            debug!("pull of {candidate} failed ({err}), retrying as {fallback}");
            puller.pull(&fallback).await?;
            fallback
        }
    };

    let digest = puller.repo_digest(&pulled).await?;
    Ok(format!("{pulled}@{digest}"))
}
