use serde_json::json;

use super::*;

const SEARCH_URL: &str = "https://www.airbnb.com/api/v3/StaysSearch/d4d9?operationName=StaysSearch";

fn search_body(ids: &[&str]) -> String {
    let results: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            json!({
                "__typename": "StaySearchResult",
                "listing": { "id": id, "avgRatingLocalized": "4.50 (10)" }
            })
        })
        .collect();
    json!({
        "data": { "presentation": { "staysSearch": {
            "results": { "__typename": "StaysSearchResponse", "searchResults": results }
        }}}
    })
    .to_string()
}

fn entry(method: &str, url: &str, status: i64, text: &str) -> serde_json::Value {
    json!({
        "startedDateTime": "2024-03-01T10:15:30.123+07:00",
        "request": { "method": method, "url": url },
        "response": { "status": status, "content": { "mimeType": "application/json", "text": text } }
    })
}

fn har(entries: Vec<serde_json::Value>) -> String {
    json!({ "log": { "version": "1.2", "entries": entries } }).to_string()
}

#[test]
fn new_rejects_invalid_json() {
    let err = HarReader::new("not a har").unwrap_err();
    assert!(matches!(err, HarError::Document(_)), "unexpected error: {err:?}");
}

#[test]
fn new_rejects_missing_entries() {
    let err = HarReader::new(r#"{"log":{"version":"1.2"}}"#).unwrap_err();
    assert!(matches!(err, HarError::Document(_)), "unexpected error: {err:?}");
}

#[test]
fn new_keeps_only_search_entries() {
    let reader = HarReader::new(&har(vec![
        entry("GET", "https://www.airbnb.com/s/homes", 200, "<html>"),
        entry("POST", SEARCH_URL, 200, &search_body(&["a"])),
        entry("POST", SEARCH_URL, 500, "oops"),
        entry("POST", "https://www.airbnb.com/api/v3/StaysMapS2Search/9a", 200, "{}"),
    ]))
    .unwrap();
    assert_eq!(reader.total_entries(), 4);
    assert_eq!(reader.entries().count(), 2);
}

#[test]
fn search_results_flattens_entries_in_order() {
    let reader = HarReader::new(&har(vec![
        entry("POST", SEARCH_URL, 200, &search_body(&["a", "b"])),
        entry("POST", SEARCH_URL, 200, &search_body(&["c"])),
    ]))
    .unwrap();
    let ids: Vec<String> = reader
        .search_results()
        .unwrap()
        .iter()
        .flat_map(|envelope| envelope.listings().iter().map(crate::Listing::id))
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn search_results_is_cached() {
    let reader = HarReader::new(&har(vec![entry("POST", SEARCH_URL, 200, &search_body(&["a"]))])).unwrap();
    let first = reader.search_results().unwrap().as_ptr();
    let second = reader.search_results().unwrap().as_ptr();
    assert_eq!(first, second);
}

#[test]
fn search_results_fails_on_malformed_body() {
    let reader = HarReader::new(&har(vec![
        entry("POST", SEARCH_URL, 200, &search_body(&["a"])),
        entry("POST", SEARCH_URL, 200, "{\"data\": "),
    ]))
    .unwrap();
    let err = reader.search_results().unwrap_err();
    assert!(
        matches!(err, HarError::ResponseBody { index: 1, ref url, .. } if url == SEARCH_URL),
        "unexpected error: {err:?}"
    );
}

#[test]
fn search_results_error_reports_original_entry_index() {
    let reader = HarReader::new(&har(vec![
        entry("GET", "https://www.airbnb.com/", 200, "<html>"),
        entry("POST", SEARCH_URL, 200, "garbage"),
    ]))
    .unwrap();
    let err = reader.search_results().unwrap_err();
    assert!(matches!(err, HarError::ResponseBody { index: 1, .. }), "unexpected error: {err:?}");
}

#[test]
fn search_results_fails_on_missing_body() {
    let raw = har(vec![json!({
        "request": { "method": "POST", "url": SEARCH_URL },
        "response": { "status": 200, "content": { "size": 0 } }
    })]);
    let reader = HarReader::new(&raw).unwrap();
    let err = reader.search_results().unwrap_err();
    assert!(matches!(err, HarError::MissingBody { index: 0, .. }), "unexpected error: {err:?}");
}

#[test]
fn search_results_fails_on_base64_body() {
    let raw = har(vec![json!({
        "request": { "method": "POST", "url": SEARCH_URL },
        "response": { "status": 200, "content": { "text": "e30=", "encoding": "base64" } }
    })]);
    let reader = HarReader::new(&raw).unwrap();
    let err = reader.search_results().unwrap_err();
    assert!(
        matches!(err, HarError::UnsupportedEncoding { ref encoding, .. } if encoding == "base64"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn body_without_listings_contributes_nothing() {
    let reader = HarReader::new(&har(vec![entry(
        "POST",
        SEARCH_URL,
        200,
        r#"{"data":{"presentation":{"staysSearch":null}}}"#,
    )]))
    .unwrap();
    assert!(reader.search_results().unwrap().is_empty());
}

#[test]
fn datetime_from_first_search_entry() {
    let reader = HarReader::new(&har(vec![entry("POST", SEARCH_URL, 200, "{}")])).unwrap();
    let dt = reader.datetime().unwrap();
    assert_eq!(dt.to_rfc3339(), "2024-03-01T10:15:30.123+07:00");
}

#[test]
fn datetime_without_search_entries_fails() {
    let reader = HarReader::new(&har(vec![entry("GET", "https://www.airbnb.com/", 200, "")])).unwrap();
    assert!(matches!(reader.datetime(), Err(HarError::NoSearchEntries)));
}

#[test]
fn datetime_with_invalid_timestamp_fails() {
    let raw = har(vec![json!({
        "startedDateTime": "yesterday",
        "request": { "method": "POST", "url": SEARCH_URL },
        "response": { "status": 200, "content": { "text": "{}" } }
    })]);
    let reader = HarReader::new(&raw).unwrap();
    assert!(
        matches!(reader.datetime(), Err(HarError::Timestamp { ref value, .. }) if value == "yesterday")
    );
}

#[test]
fn dump_responses_returns_parsed_bodies() {
    let reader = HarReader::new(&har(vec![
        entry("POST", SEARCH_URL, 200, r#"{"n":1}"#),
        entry("GET", SEARCH_URL, 200, r#"{"n":2}"#),
        entry("POST", SEARCH_URL, 200, r#"{"n":3}"#),
    ]))
    .unwrap();
    let dumped = reader.dump_responses().unwrap();
    assert_eq!(dumped, vec![json!({ "n": 1 }), json!({ "n": 3 })]);
}
