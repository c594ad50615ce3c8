//! Browsing-session tests: pagination, filter changes and debounced input.

use std::time::{Duration, Instant};

use mcp_explorer::record::GithubStats;
use mcp_explorer::{Catalog, Explorer, FilterSpec, RawRecord, RecordType};

fn client(i: usize) -> RawRecord {
    RawRecord {
        name: Some(format!("Client {i:02}")),
        author_name: "acme".into(),
        category: Some(if i % 3 == 0 { "developer-tools" } else { "ai-chatbot" }.into()),
        ..Default::default()
    }
}

fn server(i: usize) -> RawRecord {
    RawRecord {
        name: Some(format!("Server {i:02}")),
        author_name: "mcp".into(),
        description: Some(format!("Connector number {i}")),
        github: Some(GithubStats {
            full_name: format!("mcp/server-{i:02}"),
            stargazers_count: Some(i as i64 * 10),
            language: Some(if i % 2 == 0 { "Rust" } else { "Python" }.into()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn explorer(clients: usize, servers: usize, page_size: usize) -> Explorer {
    let catalog = Catalog::build(
        (0..clients).map(client).collect(),
        (0..servers).map(server).collect(),
    );
    Explorer::new(catalog, page_size, Duration::from_millis(300))
}

#[test]
fn forty_five_records_make_three_pages() {
    let mut session = explorer(45, 0, 20);

    assert_eq!(session.total_pages(), 3);
    assert_eq!(session.current_page().items.len(), 20);

    assert!(session.go_to_page(3));
    let last = session.current_page();
    assert_eq!(last.items.len(), 5);
    assert!(last.has_prev);
    assert!(!last.has_next);

    assert!(!session.go_to_page(0));
    assert_eq!(session.page_index(), 3);
    assert!(!session.go_to_page(4));
    assert_eq!(session.page_index(), 3);
}

#[test]
fn pages_partition_the_filtered_list() {
    let mut session = explorer(45, 12, 20);
    let mut seen = Vec::new();
    loop {
        seen.extend(session.current_page().items.iter().map(|r| r.id));
        if !session.next_page() {
            break;
        }
    }
    let all: Vec<_> = session.catalog().iter().map(|r| r.id).collect();
    assert_eq!(seen, all);
    assert!(!session.next_page());
    assert!(session.prev_page());
}

#[test]
fn empty_filter_returns_catalog_order() {
    let session = explorer(3, 3, 50);
    let page = session.current_page();
    let ids: Vec<_> = page.items.iter().map(|r| r.id).collect();
    let expected: Vec<_> = session.catalog().iter().map(|r| r.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn every_filter_change_returns_to_page_one() {
    let mut session = explorer(45, 12, 10);

    session.go_to_page(4);
    session.set_type(Some(RecordType::Server));
    assert_eq!(session.page_index(), 1);
    assert_eq!(session.current_page().total_count, 12);

    session.go_to_page(2);
    session.set_language(Some("Rust".into()));
    assert_eq!(session.page_index(), 1);
    assert_eq!(session.current_page().total_count, 6);

    session.clear_filters();
    session.go_to_page(3);
    session.set_category(Some("developer-tools".into()));
    assert_eq!(session.page_index(), 1);
    assert_eq!(session.current_page().total_count, 15);
}

#[test]
fn filters_combine() {
    let mut session = explorer(10, 10, 20);
    session.set_filter(FilterSpec {
        query: "connector".into(),
        record_type: Some(RecordType::Server),
        category: None,
        language: Some("Python".into()),
    });
    let page = session.current_page();
    assert_eq!(page.total_count, 5);
    assert!(page.items.iter().all(|r| r.language() == Some("Python")));
}

#[test]
fn typed_query_applies_after_quiet_period() {
    let mut session = explorer(45, 0, 20);
    let start = Instant::now();
    session.go_to_page(2);

    session.input_query("Client 0", start);
    session.input_query("Client 04", start + Duration::from_millis(100));
    assert!(!session.poll(start + Duration::from_millis(350)));
    assert_eq!(session.filter().query, "");
    assert_eq!(session.page_index(), 2);

    assert!(session.poll(start + Duration::from_millis(400)));
    assert_eq!(session.filter().query, "Client 04");
    assert_eq!(session.page_index(), 1);
    assert_eq!(session.current_page().total_count, 1);
    assert!(!session.has_pending_input());
}

#[test]
fn detail_lookup_by_id_from_a_page() {
    let mut session = explorer(5, 5, 3);
    session.set_query("server-03");
    let page = session.current_page();
    assert_eq!(page.total_count, 1);
    let id = page.items[0].id;
    let record = session.record(id).unwrap();
    assert_eq!(record.display_name, "server-03");
    assert_eq!(record.stars(), 30);
}
