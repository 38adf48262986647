mod common;

use std::path::Path;

use common::{MockClient, listing_path, options, recording_sink, repo, tree};
use hubpull_fetch::{Error, Hub, PathLoader, RemoteEntry, StaticManifest, TransferTask, noop_sink};
use tempfile::tempdir;

const REPO: &str = "org/model";

fn manifest() -> StaticManifest { StaticManifest::new().with_repository(repo(REPO), ["Encoder.mlmodelc"]) }

/// The `org/model` remote: one required package, one unrelated package and
/// a handful of top-level files.
fn serve_repository(client: &MockClient) {
    client.listing(
        REPO,
        "",
        &[
            RemoteEntry::directory("Encoder.mlmodelc"),
            RemoteEntry::directory("Other.mlmodelc"),
            RemoteEntry::directory("samples"),
            RemoteEntry::file("config.json", 16),
            RemoteEntry::file("vocab.txt", 4),
            RemoteEntry::file("README.md", 6),
            RemoteEntry::file("weights.safetensors", 8).with_lfs_size(4096),
        ],
    );
    client.listing(
        REPO,
        "Encoder.mlmodelc",
        &[
            RemoteEntry::file("Encoder.mlmodelc/model.mil", 3),
            RemoteEntry::directory("Encoder.mlmodelc/weights"),
        ],
    );
    client.listing(
        REPO,
        "Encoder.mlmodelc/weights",
        &[RemoteEntry::file("Encoder.mlmodelc/weights/weight.bin", 130).with_lfs_size(2048)],
    );
    client.file(REPO, "config.json", "{\"hidden\": 512}\n");
    client.file(REPO, "vocab.txt", "a\nb\n");
    client.file(REPO, "Encoder.mlmodelc/model.mil", "mil");
    client.file(REPO, "Encoder.mlmodelc/weights/weight.bin", vec![9u8; 2048]);
}

#[tokio::test]
async fn test_materializes_required_models_and_metadata() {
    let base = tempdir().unwrap();
    let client = MockClient::new();
    serve_repository(&client);
    let hub = Hub::new(client, manifest()).with_options(options());

    let report = hub.ensure_repository(&repo(REPO), base.path(), &noop_sink()).await.unwrap();

    assert!(!report.cached);
    assert_eq!(report.path(), base.path().join("org_model"));
    assert_eq!(
        tree(report.path()),
        vec![
            "Encoder.mlmodelc/model.mil",
            "Encoder.mlmodelc/weights/weight.bin",
            "config.json",
            "vocab.txt",
        ]
    );
    assert_eq!(report.downloaded().count(), 4);
    assert_eq!(report.warnings().count(), 0);
    assert_eq!(
        std::fs::metadata(report.path().join("Encoder.mlmodelc/weights/weight.bin")).unwrap().len(),
        2048
    );

    let client = hub.client();
    assert_eq!(client.count("Other.mlmodelc"), 0);
    assert_eq!(client.count("samples"), 0);
    assert_eq!(client.count("README.md"), 0);
    assert_eq!(client.count("weights.safetensors"), 0);
}

#[tokio::test]
async fn test_concrete_scenario() {
    let base = tempdir().unwrap();
    let client = MockClient::new();
    client.listing(
        REPO,
        "",
        &[
            RemoteEntry::directory("Encoder.mlmodelc"),
            RemoteEntry::directory("Other.mlmodelc"),
            RemoteEntry::file("config.json", 128),
        ],
    );
    client.listing(REPO, "Encoder.mlmodelc", &[RemoteEntry::file("Encoder.mlmodelc/coremldata.bin", 32)]);
    client.file(REPO, "Encoder.mlmodelc/coremldata.bin", vec![1u8; 32]);
    client.file(REPO, "config.json", vec![b' '; 128]);
    let hub = Hub::new(client, manifest()).with_options(options());

    let report = hub.ensure_repository(&repo(REPO), base.path(), &noop_sink()).await.unwrap();

    assert_eq!(tree(report.path()), vec!["Encoder.mlmodelc/coremldata.bin", "config.json"]);
    assert!(!hub.client().requests().contains(&listing_path(REPO, "Other.mlmodelc")));
}

#[tokio::test]
async fn test_existing_cache_skips_network() {
    let base = tempdir().unwrap();
    std::fs::create_dir_all(base.path().join("org_model")).unwrap();
    let hub = Hub::new(MockClient::new(), manifest()).with_options(options());

    let report = hub.ensure_repository(&repo(REPO), base.path(), &noop_sink()).await.unwrap();

    assert!(report.cached);
    assert!(report.transfers.is_empty());
    assert!(hub.client().requests().is_empty());
}

#[tokio::test]
async fn test_second_run_reuses_complete_files() {
    let base = tempdir().unwrap();
    let client = MockClient::new();
    serve_repository(&client);
    let hub = Hub::new(client, manifest()).with_options(options());
    let id = repo(REPO);

    let first = hub.ensure_repository(&id, base.path(), &noop_sink()).await.unwrap();

    let engine = hub.transfer_engine();
    let (sink, events) = recording_sink();
    for outcome in &first.transfers {
        let rel = outcome.destination.strip_prefix(first.path()).unwrap();
        let rel = rel.to_string_lossy().replace('\\', "/");
        let task = TransferTask::new(rel, &outcome.destination, outcome.bytes);
        assert!(engine.transfer(&id, task, &sink).await.unwrap().skipped);
    }

    let files = hub.client().requests().iter().filter(|r| r.contains("/resolve/")).count();
    assert_eq!(files, 4, "no file fetched twice");
    assert_eq!(events.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unknown_repository() {
    let base = tempdir().unwrap();
    let hub = Hub::new(MockClient::new(), manifest()).with_options(options());

    let err = hub
        .ensure_repository(&repo("org/unknown"), base.path(), &noop_sink())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownRepository(id) if id == "org/unknown"));
    assert!(hub.client().requests().is_empty());
    assert!(!base.path().join("org_unknown").exists());
}

#[tokio::test]
async fn test_listing_escaping_its_directory_is_rejected() {
    let base = tempdir().unwrap();
    let client = MockClient::new();
    client.listing(REPO, "", &[RemoteEntry::directory("Encoder.mlmodelc")]);
    client.listing(REPO, "Encoder.mlmodelc", &[RemoteEntry::file("Encoder.mlmodelc/../../evil", 1)]);
    let hub = Hub::new(client, manifest()).with_options(options());

    let err = hub.ensure_repository(&repo(REPO), base.path(), &noop_sink()).await.unwrap_err();

    assert!(matches!(err, Error::Protocol { .. }));
    assert!(!base.path().join("evil").exists());
}

#[tokio::test]
async fn test_depth_cap() {
    let base = tempdir().unwrap();
    let client = MockClient::new();
    client.listing(REPO, "", &[RemoteEntry::directory("Encoder.mlmodelc")]);
    let mut dir = String::from("Encoder.mlmodelc");
    for _ in 0..4 {
        let child = format!("{dir}/d");
        client.listing(REPO, &dir, &[RemoteEntry::directory(child.clone())]);
        dir = child;
    }
    client.listing(REPO, &dir, &[]);
    let hub = Hub::new(client, manifest()).with_options(options().max_depth(2));

    let err = hub.ensure_repository(&repo(REPO), base.path(), &noop_sink()).await.unwrap_err();

    assert!(matches!(err, Error::TooDeep { max_depth: 2, .. }));
}

#[tokio::test]
async fn test_load_recovers_from_corrupt_cache() {
    let base = tempdir().unwrap();
    // A cache directory left behind by an interrupted run: trusted, but empty.
    std::fs::create_dir_all(base.path().join("org_model")).unwrap();
    let client = MockClient::new();
    serve_repository(&client);
    let hub = Hub::new(client, manifest()).with_options(options());

    let loaded = hub
        .load_models(&repo(REPO), base.path(), &PathLoader, &noop_sink())
        .await
        .unwrap();

    assert_eq!(loaded.models, vec![base.path().join("org_model").join("Encoder.mlmodelc")]);
    assert!(!loaded.report.cached);
    assert_eq!(hub.client().count_exact(&listing_path(REPO, "")), 1);
}

#[tokio::test]
async fn test_load_gives_up_after_one_retry() {
    let base = tempdir().unwrap();
    let client = MockClient::new();
    client.raw_listing(REPO, "", 500, "oops");
    let hub = Hub::new(client, manifest()).with_options(options());

    let err = hub
        .load_models(&repo(REPO), base.path(), &PathLoader, &noop_sink())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Protocol { .. }));
    assert_eq!(hub.client().count_exact(&listing_path(REPO, "")), 2);
}

#[tokio::test]
async fn test_first_load_success_does_not_retry() {
    let base = tempdir().unwrap();
    let client = MockClient::new();
    serve_repository(&client);
    let hub = Hub::new(client, manifest()).with_options(options());
    let id = repo(REPO);

    hub.load_models(&id, base.path(), &PathLoader, &noop_sink()).await.unwrap();
    let requests = hub.client().requests().len();
    let again = hub.load_models(&id, base.path(), &PathLoader, &noop_sink()).await.unwrap();

    assert!(again.report.cached);
    assert_eq!(hub.client().requests().len(), requests);
}

#[tokio::test]
async fn test_every_file_ends_with_one_terminal_event() {
    let base = tempdir().unwrap();
    let client = MockClient::new().with_chunk_size(64);
    serve_repository(&client);
    let hub = Hub::new(client, manifest()).with_options(options().progress_threshold(1000));
    let (sink, events) = recording_sink();

    hub.ensure_repository(&repo(REPO), base.path(), &sink).await.unwrap();

    let events = events.lock().unwrap();
    let terminal: Vec<_> = events.iter().filter(|e| e.is_terminal()).map(|e| e.file_name.as_str()).collect();
    assert_eq!(terminal.len(), 4);
    for name in ["config.json", "vocab.txt", "model.mil", "weight.bin"] {
        assert!(terminal.contains(&name), "{name} missing a terminal event");
    }
    let weight: Vec<_> = events.iter().filter(|e| e.file_name == "weight.bin").collect();
    assert!(weight.len() > 1, "large file reports intermediate progress");
    assert!(weight.len() <= 10);
}

#[tokio::test]
async fn test_lister_errors() {
    let client = MockClient::new();
    client.raw_listing(REPO, "", 200, "{not json");
    client.fail_listing(REPO, "Encoder.mlmodelc", "timed out");
    let hub = Hub::new(client, manifest()).with_options(options());
    let lister = hub.lister();
    let id = repo(REPO);

    assert!(matches!(lister.list(&id, "").await.unwrap_err(), Error::Protocol { .. }));
    assert!(lister.list(&id, "Encoder.mlmodelc").await.unwrap_err().is_network());
    assert!(matches!(lister.list(&id, "missing").await.unwrap_err(), Error::Protocol { .. }));
}

#[test]
fn test_cache_layout() {
    let hub = Hub::new(MockClient::new(), manifest());
    assert_eq!(
        hub.repository_dir(&repo(REPO), Path::new("/cache")),
        Path::new("/cache").join("org_model")
    );
}
