//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in its own thread, then drives
//! `HttpSource`, the fetch client and both views over real HTTP. Validates
//! that request building, transport and rendering agree with the server.

use std::net::SocketAddr;
use std::rc::Rc;

use launch_core::{
    markers, Container, DetailView, FailureKind, FetchOutcome, HttpSource, LaunchClient, MemoryContainer,
    MemoryControl, RecordingSink, Rendered, SearchQuery, SearchView,
};
use mock_server::{seed, MockConfig};

/// Start a mock server on a random port and return its address.
fn start_server(config: MockConfig) -> SocketAddr {
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
            mock_server::run_with(listener, seed(), config).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr, sink: &RecordingSink) -> LaunchClient<HttpSource> {
    LaunchClient::new(&format!("http://{addr}"), HttpSource::default()).with_sink(sink.clone())
}

fn shared_client(addr: SocketAddr, source: &Rc<HttpSource>, sink: &RecordingSink) -> LaunchClient<Rc<HttpSource>> {
    LaunchClient::new(&format!("http://{addr}"), Rc::clone(source)).with_sink(sink.clone())
}

fn query(text: &str) -> SearchQuery {
    SearchQuery::new(text).unwrap()
}

#[tokio::test]
async fn search_and_detail_round_trip() {
    let addr = start_server(MockConfig::default());
    let sink = RecordingSink::new();
    // Both views share one connection pool.
    let source = Rc::new(HttpSource::new(reqwest::Client::new()));

    // Step 1: search renders both Falcon launches in server order.
    let view = SearchView::new(shared_client(addr, &source, &sink), MemoryContainer::new());
    let control = MemoryControl::new();
    let rendered = view.search_and_render(Some(&control), &query("falcon")).await;
    assert_eq!(rendered, Rendered::Results(2));
    assert!(control.is_enabled());

    let block = view.container().find(markers::RESULTS).unwrap();
    let items = block.find_all(markers::RESULT);
    assert!(items[0].text_content().contains("Falcon Heavy | Demo Flight"));
    assert!(items[1].text_content().contains("Go for Launch"));

    // Step 2: follow the first link to the detail view.
    let href = items[0].children[0].attribute("href").unwrap().to_string();
    let id = href.trim_start_matches("?id=");
    let detail = DetailView::new(shared_client(addr, &source, &sink), MemoryContainer::new());
    assert_eq!(detail.show(id).await, Rendered::Detail);
    let text = detail.container().find(markers::DETAIL).unwrap().text_content();
    assert!(text.contains("Window opens: 2018-02-06T20:45:00Z"));
    assert!(text.contains("Mission: Demo Flight"));

    // Step 3: a search with no match renders the message, not an error.
    assert_eq!(
        view.search_and_render(Some(&control), &query("zzz-no-match")).await,
        Rendered::NoResults
    );
    assert_eq!(view.container().count(markers::RESULTS), 1);

    // Step 4: an unknown id is missing, and reported as such.
    assert_eq!(detail.show("42").await, Rendered::Missing);

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].kind, FailureKind::NotFound);
}

#[tokio::test]
async fn query_with_spaces_reaches_server_decoded() {
    let addr = start_server(MockConfig::default());
    let sink = RecordingSink::new();
    let client = client(addr, &sink);

    let launches = client.search_launches(&query(" ariane 5 ")).await.ok().unwrap();
    assert_eq!(launches.len(), 1);
    assert!(launches[0].mission.is_none());
}

#[tokio::test]
async fn server_errors_render_error_message() {
    let addr = start_server(MockConfig {
        fail_with: Some(503),
        ..MockConfig::default()
    });
    let sink = RecordingSink::new();
    let view = SearchView::new(client(addr, &sink), MemoryContainer::new());
    let control = MemoryControl::new();

    assert_eq!(view.search_and_render(Some(&control), &query("falcon")).await, Rendered::Error);
    assert!(control.is_enabled());
    assert!(!view.container().contains(markers::LOADING));
    assert!(view.container().find(markers::RESULTS).unwrap().has_class(markers::ERROR));

    let recorded = sink.recorded();
    assert_eq!(recorded[0].kind, FailureKind::Http);
    assert_eq!(recorded[0].status, Some(503));
}

#[tokio::test]
async fn unreachable_server_is_a_failed_outcome() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let sink = RecordingSink::new();
    let client = client(addr, &sink);

    assert_eq!(client.get_launch("42").await, FetchOutcome::Failed);
    assert_eq!(sink.recorded()[0].kind, FailureKind::Network);
}
