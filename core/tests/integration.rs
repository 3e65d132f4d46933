//! End-to-end runs of the pipeline against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port on its own thread, then
//! drives `Gatherer` over real HTTP through `UreqTransport` and writes the
//! outputs into a scratch directory.

use std::fs;
use std::net::SocketAddr;

use collector_core::{
    persist, prepare_transport, write_outputs, AggregateRecord, ApiError, CollectorClient,
    CollectorConfig, GatherError, Gatherer, OutputPaths, Resource, UreqTransport,
};
use mock_server::{Fixtures, StatusCode};
use tempfile::TempDir;

/// Start the mock server on a random port and return its address.
fn spawn_mock(fixtures: Fixtures) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, fixtures).await
        })
        .unwrap();
    });

    addr
}

/// An address nothing is listening on.
fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn gatherer(addr: SocketAddr) -> Gatherer<UreqTransport> {
    gatherer_with(CollectorConfig {
        base_url: format!("http://{addr}/"),
        ..CollectorConfig::default()
    })
}

fn gatherer_with(config: CollectorConfig) -> Gatherer<UreqTransport> {
    Gatherer::new(
        CollectorClient::new(&config.base_url),
        prepare_transport(&config),
        config.api_source.as_str(),
    )
}

fn paths_in(dir: &TempDir) -> OutputPaths {
    OutputPaths {
        data_file: dir.path().join("collected_data.json"),
        summary_file: dir.path().join("data_summary.txt"),
    }
}

#[test]
fn collects_three_posts_two_users_five_comments_no_todos() {
    let addr = spawn_mock(Fixtures::sample(3, 2, 5, 0));
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let record = gatherer(addr).gather().unwrap();
    assert!(persist(Some(&record), &paths));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.data_file).unwrap()).unwrap();
    let meta = &written["metadata"];
    assert_eq!(meta["total_posts"], 3);
    assert_eq!(meta["total_users"], 2);
    assert_eq!(meta["total_comments"], 5);
    assert_eq!(meta["total_todos"], 0);
    assert_eq!(meta["api_source"], "JSONPlaceholder");

    for resource in Resource::ALL {
        let key = format!("total_{resource}");
        assert_eq!(
            meta[key.as_str()].as_u64().unwrap() as usize,
            written[resource.path()].as_array().unwrap().len(),
            "{resource}"
        );
    }
}

#[test]
fn written_file_matches_served_payload() {
    let fixtures = Fixtures::sample(4, 3, 2, 5);
    let addr = spawn_mock(fixtures.clone());
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let record = gatherer(addr).gather().unwrap();
    write_outputs(&record, &paths).unwrap();

    let text = fs::read_to_string(&paths.data_file).unwrap();
    let written: serde_json::Value = serde_json::from_str(&text).unwrap();
    for name in mock_server::RESOURCES {
        assert_eq!(
            written[name].as_array().unwrap().as_slice(),
            fixtures.items(name).unwrap(),
            "{name}"
        );
    }

    let back: AggregateRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
}

#[test]
fn summary_reports_actual_file_size() {
    let addr = spawn_mock(Fixtures::sample(10, 2, 20, 7));
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let record = gatherer(addr).gather().unwrap();
    let report = write_outputs(&record, &paths).unwrap();

    let size = fs::metadata(&paths.data_file).unwrap().len();
    assert_eq!(report.data_bytes, size);
    let summary = fs::read_to_string(&paths.summary_file).unwrap();
    assert!(summary.contains(&format!("File size: {size} bytes\n")), "{summary}");
    assert!(summary.contains(&format!("Data stored in: {}\n", paths.data_file.display())));
}

#[test]
fn unreachable_server_yields_no_record_and_no_files() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let err = gatherer(closed_addr()).gather().unwrap_err();
    assert!(matches!(
        err,
        GatherError::Transport {
            resource: Resource::Posts,
            ..
        }
    ));

    let record = gatherer(closed_addr()).collect();
    assert!(record.is_none());
    assert!(!persist(record.as_ref(), &paths));
    assert!(!paths.data_file.exists());
    assert!(!paths.summary_file.exists());
}

#[test]
fn failed_run_leaves_previous_outputs_untouched() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);
    let old_data = b"{\n  \"posts\": []\n}".to_vec();
    let old_summary = b"DATA COLLECTION SUMMARY\nfrom an earlier run\n".to_vec();
    fs::write(&paths.data_file, &old_data).unwrap();
    fs::write(&paths.summary_file, &old_summary).unwrap();

    let record = gatherer(closed_addr()).collect();
    assert!(record.is_none());
    assert!(!persist(record.as_ref(), &paths));

    assert_eq!(fs::read(&paths.data_file).unwrap(), old_data);
    assert_eq!(fs::read(&paths.summary_file).unwrap(), old_summary);
}

#[test]
fn oversized_body_is_a_transport_failure() {
    let addr = spawn_mock(Fixtures::sample(50, 1, 1, 1));
    let gatherer = gatherer_with(CollectorConfig {
        base_url: format!("http://{addr}"),
        max_body_bytes: 256,
        ..CollectorConfig::default()
    });

    let err = gatherer.gather().unwrap_err();
    assert!(matches!(
        err,
        GatherError::Transport {
            resource: Resource::Posts,
            ..
        }
    ));
}

/// Roughly 13 MB of comments, past ureq's 10 MB `read_to_string` cap.
#[test]
fn default_body_limit_accepts_multi_megabyte_collections() {
    let addr = spawn_mock(Fixtures::sample(1, 1, 100_000, 1));

    let record = gatherer(addr).gather().unwrap();
    assert_eq!(record.metadata().total_comments, 100_000);
}

#[test]
fn server_error_on_one_resource_aborts_gather() {
    let fixtures = Fixtures::sample(2, 2, 2, 2).failing(
        "comments",
        StatusCode::INTERNAL_SERVER_ERROR,
        "database offline",
    );
    let addr = spawn_mock(fixtures);

    let err = gatherer(addr).gather().unwrap_err();
    match err {
        GatherError::Api(ApiError::HttpStatus {
            resource,
            status,
            body,
        }) => {
            assert_eq!(resource, Resource::Comments);
            assert_eq!(status, 500);
            assert_eq!(body, "database offline");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_route_is_a_not_found_failure() {
    let addr = spawn_mock(Fixtures::sample(1, 1, 1, 1).without("todos"));

    let err = gatherer(addr).gather().unwrap_err();
    assert!(matches!(
        err,
        GatherError::Api(ApiError::HttpStatus {
            resource: Resource::Todos,
            status: 404,
            ..
        })
    ));
}

#[test]
fn running_twice_overwrites_outputs() {
    let dir = TempDir::new().unwrap();
    let paths = paths_in(&dir);

    let first = gatherer(spawn_mock(Fixtures::sample(50, 10, 100, 40)))
        .gather()
        .unwrap();
    let first_report = write_outputs(&first, &paths).unwrap();

    let second = gatherer(spawn_mock(Fixtures::sample(1, 1, 1, 1)))
        .gather()
        .unwrap();
    let second_report = write_outputs(&second, &paths).unwrap();

    assert!(second_report.data_bytes < first_report.data_bytes);
    let back: AggregateRecord =
        serde_json::from_str(&fs::read_to_string(&paths.data_file).unwrap()).unwrap();
    assert_eq!(back, second);

    let summary = fs::read_to_string(&paths.summary_file).unwrap();
    assert!(summary.contains("Total Posts: 1\n"));
    assert!(!summary.contains("Total Posts: 50\n"));
}
