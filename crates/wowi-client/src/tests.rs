use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{body_string_contains, header, method, path, query_param},
};
use wowi_core::source::RemoteSource;

use crate::{ClientConfig, Error, WowiClient};

const DISTRICTS: &str = "/openwowi/v1.2/CommercialInventory/Districts";

fn client(server: &MockServer, page_size: usize) -> WowiClient {
  WowiClient::new(ClientConfig {
    host: server.uri(),
    user: "sync".into(),
    password: "secret".into(),
    api_key: "key".into(),
    user_agent: "WowiCache/1.0".into(),
    page_size,
  })
  .unwrap()
}

fn districts(ids: std::ops::Range<i64>) -> Value {
  Value::Array(ids.map(|id| json!({ "Id": id, "Name": format!("D{id}") })).collect())
}

async fn mount_token(server: &MockServer, token: &str) {
  Mock::given(method("POST"))
    .and(path("/oauth2/token"))
    .and(query_param("apiKey", "key"))
    .and(body_string_contains("grant_type=password"))
    .and(body_string_contains("username=sync"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "access_token": token, "token_type": "bearer" })),
    )
    .mount(server)
    .await;
}

async fn mount_page(server: &MockServer, token: &str, limit: &str, offset: &str, body: Value) {
  Mock::given(method("GET"))
    .and(path(DISTRICTS))
    .and(header("authorization", format!("Bearer {token}")))
    .and(query_param("apiKey", "key"))
    .and(query_param("limit", limit))
    .and(query_param("offset", offset))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .expect(1)
    .mount(server)
    .await;
}

#[tokio::test]
async fn pages_are_assembled_into_one_collection() {
  let server = MockServer::start().await;
  mount_token(&server, "t").await;
  mount_page(&server, "t", "2", "0", districts(1..3)).await;
  mount_page(&server, "t", "2", "2", districts(3..5)).await;
  mount_page(&server, "t", "2", "4", json!([])).await;

  let got = client(&server, 2).districts().await.unwrap();
  let ids: Vec<i64> = got.iter().map(|d| d.id).collect();
  assert_eq!(ids, vec![1, 2, 3, 4]);
  assert_eq!(got[0].name.as_deref(), Some("D1"));
}

#[tokio::test]
async fn short_pages_from_a_capped_server_do_not_end_the_walk() {
  let server = MockServer::start().await;
  mount_token(&server, "t").await;
  mount_page(&server, "t", "5", "0", districts(1..3)).await;
  mount_page(&server, "t", "5", "2", districts(3..5)).await;
  mount_page(&server, "t", "5", "4", districts(5..6)).await;
  mount_page(&server, "t", "5", "5", json!([])).await;

  let got = client(&server, 5).districts().await.unwrap();
  assert_eq!(got.len(), 5);
  assert_eq!(got.last().unwrap().id, 5);
}

#[tokio::test]
async fn rejected_token_is_replaced_once() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/oauth2/token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "stale" })))
    .up_to_n_times(1)
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/oauth2/token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh" })))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(DISTRICTS))
    .and(header("authorization", "Bearer stale"))
    .respond_with(ResponseTemplate::new(401))
    .expect(1)
    .mount(&server)
    .await;
  mount_page(&server, "fresh", "2", "0", districts(1..3)).await;
  mount_page(&server, "fresh", "2", "2", json!([])).await;

  let got = client(&server, 2).districts().await.unwrap();
  assert_eq!(got.len(), 2);
}

#[tokio::test]
async fn second_rejection_is_a_status_error() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/oauth2/token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "t" })))
    .expect(2)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(DISTRICTS))
    .respond_with(ResponseTemplate::new(401))
    .expect(2)
    .mount(&server)
    .await;

  let err = client(&server, 2).districts().await.unwrap_err();
  let Error::Status { path, status } = &err else { panic!("unexpected error: {err}") };
  assert_eq!(*status, StatusCode::UNAUTHORIZED);
  assert!(path.ends_with("Districts"), "{path}");
}

#[tokio::test]
async fn failed_token_request_is_an_auth_error() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/oauth2/token"))
    .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
    .expect(0)
    .mount(&server)
    .await;

  let err = client(&server, 2).districts().await.unwrap_err();
  assert!(matches!(err, Error::Auth(_)), "{err}");
}

#[tokio::test]
async fn empty_token_is_an_auth_error() {
  let server = MockServer::start().await;
  mount_token(&server, "").await;

  let err = client(&server, 2).districts().await.unwrap_err();
  assert!(matches!(err, Error::Auth(_)), "{err}");
}

#[tokio::test]
async fn server_error_is_a_status_error() {
  let server = MockServer::start().await;
  mount_token(&server, "t").await;
  Mock::given(method("GET"))
    .and(path(DISTRICTS))
    .respond_with(ResponseTemplate::new(500))
    .expect(1)
    .mount(&server)
    .await;

  let err = client(&server, 2).districts().await.unwrap_err();
  assert!(
    matches!(err, Error::Status { status: StatusCode::INTERNAL_SERVER_ERROR, .. }),
    "{err}"
  );
}

#[tokio::test]
async fn persons_request_embedded_sub_records() {
  let server = MockServer::start().await;
  mount_token(&server, "t").await;
  Mock::given(method("GET"))
    .and(path("/openwowi/v1.2/PersonManagement/Persons"))
    .and(query_param("includeAddresses", "true"))
    .and(query_param("includeCommunications", "true"))
    .and(query_param("offset", "0"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "Id": 42 }])))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/openwowi/v1.2/PersonManagement/Persons"))
    .and(query_param("offset", "1"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
    .expect(1)
    .mount(&server)
    .await;

  let got = client(&server, 10).persons().await.unwrap();
  assert_eq!(got.len(), 1);
  assert_eq!(got[0].id, 42);
}
