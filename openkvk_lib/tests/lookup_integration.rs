use openkvk_lib::{FilterSet, KvkClient, KvkResult, OpenKvkError};
use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

/// Mounts two pages for a 150-row request: offset 0 and offset 99.
async fn mount_two_pages(server: &MockServer, segment: &str, ext: &str) {
    Mock::given(method("GET"))
        .and(path_regex(format!(
            "^/{}/.*LIMIT%2099%20OFFSET%200;$",
            segment
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture(&format!("name_page1.{}", ext))),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(format!(
            "^/{}/.*LIMIT%2051%20OFFSET%2099;$",
            segment
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture(&format!("name_page2.{}", ext))),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn by_name_json_across_pages() {
    let server = MockServer::start().await;
    mount_two_pages(&server, "json", "json").await;

    let mut client = KvkClient::with_base_url(&server.uri());
    client.set_format("json").unwrap();

    let result = client
        .get_by_name("bank", 150, &["bedrijfsnaam"])
        .await
        .unwrap();

    assert_eq!(
        result,
        KvkResult::Json(
            r#"[{"bedrijfsnaam": "Friesland Bank N.V."}, {"bedrijfsnaam": "Bineko-export B.V."}, {"bedrijfsnaam": "Bytefabriek"}]"#
                .to_string()
        )
    );
}

#[tokio::test]
async fn by_name_structured_across_pages() {
    let server = MockServer::start().await;
    mount_two_pages(&server, "json", "json").await;

    let client = KvkClient::with_base_url(&server.uri());
    let result = client.get_by_name("bank", 150, &[]).await.unwrap();

    let records = result.records().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["bedrijfsnaam"], json!("Friesland Bank N.V."));
    assert_eq!(records[2]["bedrijfsnaam"], json!("Bytefabriek"));
}

#[tokio::test]
async fn by_city_csv_across_pages() {
    let server = MockServer::start().await;
    mount_two_pages(&server, "csv", "csv").await;

    let mut client = KvkClient::with_base_url(&server.uri());
    client.set_format("csv").unwrap();

    let result = client
        .get_by_city("Rotterdam", 150, &["bedrijfsnaam"], &FilterSet::new())
        .await
        .unwrap();

    assert_eq!(
        result,
        KvkResult::Csv("bedrijfsnaam\nFriesland Bank N.V.\nBineko-export B.V.\nBytefabriek".to_string())
    );
}

#[tokio::test]
async fn by_kvk_sends_encoded_statement() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(
            "^/json/SELECT%20bedrijfsnaam%20FROM%20kvk%20WHERE%20kvks%20=%2027312152%20AND%20isnull%28status%29%20LIMIT%201%20OFFSET%200;$",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"RESULT":{"HEADER":["bedrijfsnaam"],"ROWS":[["Kinkrsoftware"]]}}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = KvkClient::with_base_url(&server.uri());
    client.set_format("json").unwrap();
    let result = client.get_by_kvk(27312152, &["bedrijfsnaam"]).await.unwrap();

    assert_eq!(
        result.into_text().unwrap(),
        r#"[{"bedrijfsnaam": "Kinkrsoftware"}]"#
    );
}

#[tokio::test]
async fn failing_second_page_returns_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex("OFFSET%200;$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("name_page1.json")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("OFFSET%2099;$"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = KvkClient::with_base_url(&server.uri());
    let result = client.get_by_name("bank", 150, &[]).await;

    match result {
        Err(OpenKvkError::Api(openkvk_lib::openkvk_api::Error::HttpStatus { status, .. })) => {
            assert_eq!(status, 502)
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn bankruptcies_without_selector_make_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = KvkClient::with_base_url(&server.uri());
    let result = client.get_bankruptcies(&[], 10, &FilterSet::new()).await;
    assert!(matches!(result, Err(OpenKvkError::MissingParameter(_))));
}
