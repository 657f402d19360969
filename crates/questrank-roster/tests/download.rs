//! Integration tests for roster download against a local mock server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use questrank_roster::{download_roster_from, parse_roster, RosterError};

const SHEET_CSV: &str = "\
Timestamp,Email Address,Full name,Nickname,Quest profile link,Where do you live?
8/29/2019 10:23:11,an@example.com,An Tran,an,https://example.com/profiles/1,Hanoi
";

#[tokio::test]
async fn download_returns_csv_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .and(query_param("exportFormat", "csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHEET_CSV))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/export?exportFormat=csv&gid=0", server.uri());
    let body = download_roster_from(&client, &url)
        .await
        .expect("download should succeed");

    let roster = parse_roster(&body).expect("downloaded CSV should parse");
    assert_eq!(roster.participants.len(), 1);
    assert_eq!(roster.participants[0].email, "an@example.com");
}

#[tokio::test]
async fn download_maps_non_2xx_to_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/export", server.uri());
    let result = download_roster_from(&client, &url).await;

    match result.expect_err("expected Err for 403 response") {
        RosterError::UnexpectedStatus { status, .. } => assert_eq!(status, 403),
        other => panic!("expected RosterError::UnexpectedStatus, got: {other:?}"),
    }
}
