// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Initialization and fallback against mock Atlassian hosts
//!
//! Two mock servers stand in for the tenant site and the API gateway; they
//! listen on different ports, so they are distinct origins.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assets_client::config::DEFAULT_BASE_URL;
use assets_client::endpoints::DISCOVERY_PATH;
use assets_client::{
    AssetsClient, Bootstrap, ClientOptions, ConfigurationError, DiscoveryError, Endpoints,
    InitError, WorkspaceDiscoverer,
};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTH: &str = "Basic b3BzQGV4YW1wbGUuY29tOnNlY3JldA==";

struct Hosts {
    site: MockServer,
    gateway: MockServer,
}

impl Hosts {
    async fn start() -> Self {
        Self {
            site: MockServer::start().await,
            gateway: MockServer::start().await,
        }
    }

    fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new()
            .with_env(|_| None)
            .with_endpoints(Endpoints::new(self.site.uri(), self.gateway.uri()))
    }

    fn workspace_base(&self, id: &str) -> String {
        format!("{}/jsm/assets/workspace/{}/v1", self.gateway.uri(), id)
    }

    async fn expect_no_discovery(&self) {
        Mock::given(method("GET"))
            .and(path(DISCOVERY_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.site)
            .await;
    }

    async fn discovery_returns(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(DISCOVERY_PATH))
            .and(header("authorization", AUTH))
            .and(header("accept", "application/json"))
            .respond_with(response)
            .expect(1)
            .mount(&self.site)
            .await;
    }
}

fn credentials() -> ClientOptions {
    ClientOptions::new()
        .with_email("ops@example.com")
        .with_api_token("secret")
}

fn asset_object(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "label": "web-01",
        "objectKey": "ITSM-42",
        "objectType": { "id": "7", "name": "Host" }
    })
}

/// A local URL nothing listens on
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

async fn workspace_client(hosts: &Hosts) -> AssetsClient {
    hosts.expect_no_discovery().await;
    hosts
        .bootstrap()
        .init(credentials().with_instance("acme").with_workspace_id("W9"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_missing_token_makes_no_request() {
    let hosts = Hosts::start().await;
    hosts.expect_no_discovery().await;

    let err = hosts
        .bootstrap()
        .init(
            ClientOptions::new()
                .with_instance("acme")
                .with_email("ops@example.com"),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InitError::Configuration(ConfigurationError::MissingApiToken)
    ));
    assert!(err.to_string().contains("API token"));
}

#[tokio::test]
async fn test_missing_email_makes_no_request() {
    let hosts = Hosts::start().await;
    hosts.expect_no_discovery().await;

    let err = hosts
        .bootstrap()
        .init(ClientOptions::new().with_instance("acme").with_api_token("secret"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InitError::Configuration(ConfigurationError::MissingEmail)
    ));
}

#[tokio::test]
async fn test_discovered_workspace_first_wins() {
    let hosts = Hosts::start().await;
    hosts
        .discovery_returns(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{ "workspaceId": "W1" }, { "workspaceId": "W2" }]
        })))
        .await;

    let client = hosts
        .bootstrap()
        .init(credentials().with_instance("acme"))
        .await
        .unwrap();
    assert_eq!(client.base_url(), hosts.workspace_base("W1"));
    assert_eq!(client.config().interceptors.len(), 1);
}

#[tokio::test]
async fn test_no_workspaces_falls_back_to_legacy() {
    let hosts = Hosts::start().await;
    hosts
        .discovery_returns(ResponseTemplate::new(200).set_body_json(json!({ "values": [] })))
        .await;

    let client = hosts
        .bootstrap()
        .init(credentials().with_instance("acme"))
        .await
        .unwrap();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    assert!(client.config().interceptors.is_empty());
}

#[tokio::test]
async fn test_discovery_rejection_is_not_fatal() {
    let hosts = Hosts::start().await;
    hosts
        .discovery_returns(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .await;

    let client = hosts
        .bootstrap()
        .init(
            credentials()
                .with_instance("acme")
                .with_base_url("https://acme.atlassian.net/rest/assets/1.0/"),
        )
        .await
        .unwrap();
    assert_eq!(client.base_url(), "https://acme.atlassian.net/rest/assets/1.0");
}

#[tokio::test]
async fn test_explicit_workspace_skips_discovery() {
    let hosts = Hosts::start().await;
    let client = workspace_client(&hosts).await;
    assert_eq!(client.base_url(), hosts.workspace_base("W9"));
    assert_eq!(client.config().interceptors.len(), 1);
}

#[tokio::test]
async fn test_generated_operation_sends_configured_headers() {
    let hosts = Hosts::start().await;
    let client = workspace_client(&hosts).await;

    Mock::given(method("GET"))
        .and(path("/jsm/assets/workspace/W9/v1/object/42"))
        .and(header("authorization", AUTH))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_object("42")))
        .expect(1)
        .mount(&hosts.gateway)
        .await;

    let object = client
        .without_fallback()
        .get_object()
        .id("42")
        .send()
        .await
        .unwrap()
        .into_inner();
    assert_eq!(object.id, "42");
    assert_eq!(object.object_key, "ITSM-42");
}

#[tokio::test]
async fn test_failed_call_retried_on_instance_site() {
    let hosts = Hosts::start().await;
    let client = workspace_client(&hosts).await;

    Mock::given(method("GET"))
        .and(path("/jsm/assets/workspace/W9/v1/object/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&hosts.gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/jsm/assets/workspace/W9/v1/object/42"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_object("42")))
        .expect(1)
        .mount(&hosts.site)
        .await;

    let object = client
        .call(|c| async move { c.get_object().id("42").send().await })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(object.label, "web-01");
}

#[tokio::test]
async fn test_second_failure_is_returned_unchanged() {
    let hosts = Hosts::start().await;
    let client = workspace_client(&hosts).await;

    Mock::given(method("GET"))
        .and(path("/jsm/assets/workspace/W9/v1/object/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&hosts.gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/jsm/assets/workspace/W9/v1/object/42"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&hosts.site)
        .await;

    let err = client
        .call(|c| async move { c.get_object().id("42").send().await })
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
}

#[tokio::test]
async fn test_raw_request_retried_with_body() {
    let hosts = Hosts::start().await;
    let client = workspace_client(&hosts).await;

    Mock::given(method("POST"))
        .and(path("/jsm/assets/workspace/W9/v1/object/aql"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&hosts.gateway)
        .await;
    Mock::given(method("POST"))
        .and(path("/jsm/assets/workspace/W9/v1/object/aql"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "values": [] })))
        .expect(1)
        .mount(&hosts.site)
        .await;

    let url = format!("{}/object/aql", client.base_url());
    let mut request = reqwest::Request::new(reqwest::Method::POST, url.parse().unwrap());
    *request.body_mut() = Some(r#"{"qlQuery":"objectType = Host"}"#.into());

    let response = client.execute(request).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_legacy_client_has_no_fallback() {
    let hosts = Hosts::start().await;
    let legacy = format!("{}/rest/assets/1.0", hosts.site.uri());
    let client = hosts
        .bootstrap()
        .init(credentials().with_base_url(legacy.as_str()))
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/assets/1.0/object/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&hosts.site)
        .await;

    let err = client
        .call(|c| async move { c.get_object().id("42").send().await })
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_unreachable_site_is_transport_error() {
    let gateway = MockServer::start().await;
    let endpoints = Endpoints::new(closed_port_url(), gateway.uri());

    let err = WorkspaceDiscoverer::new(endpoints)
        .unwrap()
        .discover("acme", "ops@example.com", &SecretString::from("secret"))
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_site_still_yields_legacy_client() {
    let gateway = MockServer::start().await;
    let client = Bootstrap::new()
        .with_env(|_| None)
        .with_endpoints(Endpoints::new(closed_port_url(), gateway.uri()))
        .init(credentials().with_instance("acme"))
        .await
        .unwrap();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    assert!(client.config().interceptors.is_empty());
}

#[tokio::test]
async fn test_discovery_without_values_list() {
    let hosts = Hosts::start().await;
    hosts
        .discovery_returns(ResponseTemplate::new(200).set_body_json(json!({ "size": 0 })))
        .await;

    let err = WorkspaceDiscoverer::new(Endpoints::new(hosts.site.uri(), hosts.gateway.uri()))
        .unwrap()
        .discover("acme", "ops@example.com", &SecretString::from("secret"))
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::MissingValues));
}

#[tokio::test]
async fn test_streaming_body_is_sent_once() {
    let hosts = Hosts::start().await;
    let client = workspace_client(&hosts).await;

    Mock::given(method("POST"))
        .and(path("/jsm/assets/workspace/W9/v1/object/aql"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&hosts.gateway)
        .await;
    Mock::given(method("POST"))
        .and(path("/jsm/assets/workspace/W9/v1/object/aql"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&hosts.site)
        .await;

    let url = format!("{}/object/aql", client.base_url());
    let mut request = reqwest::Request::new(reqwest::Method::POST, url.parse().unwrap());
    let chunks = futures_util::stream::iter(vec![Ok::<_, std::io::Error>(
        r#"{"qlQuery":"objectType = Host"}"#,
    )]);
    *request.body_mut() = Some(reqwest::Body::wrap_stream(chunks));
    assert!(request.try_clone().is_none());

    let response = client.execute(request).await.unwrap();
    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn test_without_fallback_never_retries() {
    let hosts = Hosts::start().await;
    let client = workspace_client(&hosts).await;

    Mock::given(method("GET"))
        .and(path("/jsm/assets/workspace/W9/v1/object/42"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&hosts.gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/jsm/assets/workspace/W9/v1/object/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_object("42")))
        .expect(0)
        .mount(&hosts.site)
        .await;

    let err = client
        .without_fallback()
        .get_object()
        .id("42")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}
