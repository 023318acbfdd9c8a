//! End-to-end scan tests over a local app directory

mod helper;

use std::fs;
use std::path::Path;

use appcheck::catalog::{AppRecord, local};
use appcheck::report::CHECK_FAILED_PLACEHOLDER;
use appcheck::updater::{self, AppStatus};

use helper::{FakePuller, RecordingAnnouncer, StaticTagSource};

fn write_manifest(dir: &Path, id: &str, body: &str) {
    let app_dir = dir.join(id);
    fs::create_dir_all(&app_dir).unwrap();
    fs::write(app_dir.join("app.yml"), body).unwrap();
}

fn record(id: &str, name: &str, version: &str, repo: Option<&str>) -> AppRecord {
    AppRecord {
        id: id.to_string(),
        name: name.to_string(),
        version: version.to_string(),
        repo: repo.map(str::to_string),
    }
}

#[tokio::test]
async fn applied_update_pins_the_new_image_and_keeps_the_comment_block() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "example",
        "# Example app manifest\n# managed by tooling\nversion: 1\nmetadata:\n  name: Example\n  version: 1.0.0\n  repo: https://github.com/example/example\ncontainers:\n  - name: main\n    image: example/example:1.0.0@sha256:aaa\n  - name: db\n    image: library/postgres:14\n",
    );

    let tags = StaticTagSource::new().with_tags("example/example", &["v1.1.0", "v1.0.0"]);
    let puller = FakePuller::new().with_image("example/example:1.1.0", "sha256:bbb");
    let announcer = RecordingAnnouncer::new();

    let records = local::scan_app_dir(dir.path()).unwrap();
    let results = updater::scan(&tags, &puller, &announcer, &records, Some(dir.path())).await;

    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].status,
        AppStatus::UpdateApplied {
            latest: "1.1.0".to_string()
        }
    );

    let written = fs::read_to_string(dir.path().join("example/app.yml")).unwrap();
    assert!(written.starts_with("# Example app manifest\n# managed by tooling\n\n"));
    assert!(written.contains("version: 1.1.0"));
    assert!(written.contains("image: example/example:1.1.0@sha256:bbb"));
    // only the update target changes
    assert!(written.contains("image: library/postgres:14"));

    let messages = announcer.messages.lock().unwrap();
    assert_eq!(
        *messages,
        vec!["Example has been updated to 1.1.0 in the app store.".to_string()]
    );
}

#[tokio::test]
async fn update_falls_back_to_the_v_prefixed_tag() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "example",
        "version: 1\nmetadata:\n  name: Example\n  version: 1.0.0\n  repo: example/example\ncontainers:\n  - name: main\n    image: example/example:1.0.0\n",
    );

    let tags = StaticTagSource::new().with_tags("example/example", &["v1.1.0"]);
    // only the prefixed tag exists upstream
    let puller = FakePuller::new().with_image("example/example:v1.1.0", "sha256:bbb");
    let announcer = RecordingAnnouncer::new();

    let records = local::scan_app_dir(dir.path()).unwrap();
    let results = updater::scan(&tags, &puller, &announcer, &records, Some(dir.path())).await;

    assert_eq!(
        results[0].status,
        AppStatus::UpdateApplied {
            latest: "1.1.0".to_string()
        }
    );

    let written = fs::read_to_string(dir.path().join("example/app.yml")).unwrap();
    assert!(written.contains("image: example/example:v1.1.0@sha256:bbb"));

    let pulls = puller.pulls.lock().unwrap();
    assert_eq!(
        *pulls,
        vec![
            "example/example:1.1.0".to_string(),
            "example/example:v1.1.0".to_string()
        ]
    );
}

#[tokio::test]
async fn failed_sibling_container_reverts_the_version_but_keeps_applied_images() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        "multi",
        "version: 1\nmetadata:\n  name: Multi\n  version: 1.0.0\n  repo: multi/app\n  updateContainer:\n    - main\n    - helper\ncontainers:\n  - name: main\n    image: multi/app:1.0.0@sha256:aaa\n  - name: helper\n    image: multi/helper:1.0.0\n  - name: db\n    image: library/postgres:14\n",
    );

    let tags = StaticTagSource::new().with_tags("multi/app", &["v1.1.0"]);
    // the main image resolves, the helper image exists under no tag at all
    let puller = FakePuller::new().with_image("multi/app:1.1.0", "sha256:bbb");
    let announcer = RecordingAnnouncer::new();

    let records = local::scan_app_dir(dir.path()).unwrap();
    let results = updater::scan(&tags, &puller, &announcer, &records, Some(dir.path())).await;

    assert!(matches!(
        &results[0].status,
        AppStatus::UpdateFailed { latest, .. } if latest == "1.1.0"
    ));

    let written = fs::read_to_string(dir.path().join("multi/app.yml")).unwrap();
    // declared version stays put while the successful container keeps its
    // new, pinned image
    assert!(written.contains("version: 1.0.0"));
    assert!(written.contains("image: multi/app:1.1.0@sha256:bbb"));
    assert!(written.contains("image: multi/helper:1.0.0"));

    // both tag spellings were attempted for the failing container
    let pulls = puller.pulls.lock().unwrap();
    assert!(pulls.contains(&"multi/helper:1.1.0".to_string()));
    assert!(pulls.contains(&"multi/helper:v1.1.0".to_string()));

    let messages = announcer.messages.lock().unwrap();
    assert_eq!(
        *messages,
        vec!["An update of Multi to 1.1.0 could not be applied automatically.".to_string()]
    );
}

#[tokio::test]
async fn every_scanned_app_is_accounted_for() {
    let tags = StaticTagSource::new()
        .with_tags("fresh/fresh", &["v1.0.0"])
        .with_tags("stale/stale", &["v2.0.0"]);
    let puller = FakePuller::new();
    let announcer = RecordingAnnouncer::new();

    let records = vec![
        record("fresh", "Fresh", "1.0.0", Some("fresh/fresh")),
        record("stale", "Stale", "1.0.0", Some("stale/stale")),
        record("elsewhere", "Elsewhere", "1.0.0", Some("https://sr.ht/e/e")),
        record("gone", "Gone", "1.0.0", Some("gone/gone")),
    ];

    let results = updater::scan(&tags, &puller, &announcer, &records, None).await;
    assert_eq!(results.len(), records.len());

    let rows = updater::report_rows(&results);
    // three rows: the available update plus two failed checks; the
    // up-to-date app stays out of the table
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].app, "Stale");
    assert_eq!(rows[0].latest, "2.0.0");
    assert_eq!(rows[0].declared, "1.0.0");
    assert!(
        rows[1..]
            .iter()
            .all(|row| row.latest == CHECK_FAILED_PLACEHOLDER
                && row.declared == CHECK_FAILED_PLACEHOLDER)
    );
}

#[tokio::test]
async fn commit_tracked_apps_compare_against_the_branch_tip() {
    let tags = StaticTagSource::new().with_tip("lnbits/lnbits", "0a1b2c3");
    let puller = FakePuller::new();
    let announcer = RecordingAnnouncer::new();

    let records = vec![record("lnbits", "LNbits", "deadbee", Some("lnbits/lnbits"))];
    let results = updater::scan(&tags, &puller, &announcer, &records, None).await;

    assert_eq!(
        results[0].status,
        AppStatus::UpdateAvailable {
            latest: "0a1b2c3".to_string()
        }
    );
}
