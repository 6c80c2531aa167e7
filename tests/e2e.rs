//! End-to-end tests for the Keyfront proxy.
//!
//! Starts a real Axum server on a random port, with wiremock standing in
//! for the manifest origin and the ClearKey license server, and drives the
//! full HTTP pipeline through both public endpoints.

use keyfront::config::{Config, LicenseHeaders};
use keyfront::server::build_router;
use serde_json::json;
use std::net::SocketAddr;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Protected manifest fixture. Deliberately omits the `xmlns:cenc`
/// declaration so the normalizer has to splice it in, mirroring what the
/// real origin serves.
const PROTECTED_MPD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static" mediaPresentationDuration="PT634S">
  <Period id="p0">
    <AdaptationSet id="0" contentType="video" mimeType="video/mp4">
      <ContentProtection schemeIdUri="urn:mpeg:dash:mp4protection:2011" value="cenc" cenc:default_KID="00000000-0000-0000-0000-000000000000"/>
      <ContentProtection schemeIdUri="urn:uuid:edef8ba9-79d6-4ace-a3c8-27dcd51d21ed">
        <cenc:pssh>AAAAOHBzc2g=</cenc:pssh>
      </ContentProtection>
      <Representation id="video-1" bandwidth="2000000"/>
    </AdaptationSet>
    <AdaptationSet id="1" contentType="audio" lang="en">
      <ContentProtection schemeIdUri="urn:mpeg:dash:mp4protection:2011" cenc:default_KID="00000000-0000-0000-0000-000000000000"/>
      <Representation id="audio-1" bandwidth="128000"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

/// Manifest with only DRM-system-specific protection — no generic KID.
const DRM_ONLY_MPD: &str = r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011">
  <Period>
    <AdaptationSet id="0">
      <ContentProtection schemeIdUri="urn:uuid:edef8ba9-79d6-4ace-a3c8-27dcd51d21ed"/>
      <Representation id="video-1"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

// ── Test server helpers ───────────────────────────────────────────────────────

/// Spin up a Keyfront server wired to the given upstream URLs.
async fn start_server(mpd_url: String, license_url: String) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().unwrap();

    let config = Config {
        port: 0,
        is_dev: true,
        mpd_url,
        license_url,
        license_headers: LicenseHeaders {
            user_agent: "test-agent/1.0".to_string(),
            page_origin: "https://watch.example.com".to_string(),
            referer: "https://watch.example.com/".to_string(),
            forwarded_for: Some("203.0.113.7".to_string()),
        },
    };

    let app = build_router(config);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Mock origin serving the given manifest body at /manifest.mpd.
async fn mock_origin(body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manifest.mpd"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_check() {
    let origin = mock_origin(PROTECTED_MPD, 200).await;
    let addr = start_server(
        format!("{}/manifest.mpd", origin.uri()),
        format!("{}/license", origin.uri()),
    )
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn stream_mpd_serves_sanitized_manifest() {
    let origin = mock_origin(PROTECTED_MPD, 200).await;
    let addr = start_server(
        format!("{}/manifest.mpd", origin.uri()),
        format!("{}/license", origin.uri()),
    )
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{}/stream.mpd", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/dash+xml"
    );

    let body = resp.text().await.unwrap();
    assert!(body.contains("<MPD"));
    assert!(!body.contains("ContentProtection"));
    assert!(!body.contains("pssh"));
    // Non-protection content survives with attributes intact
    assert!(body.contains(r#"<AdaptationSet id="0" contentType="video" mimeType="video/mp4">"#));
    assert!(body.contains(r#"<Representation id="audio-1" bandwidth="128000"/>"#));
    // No serializer prefix artifacts
    assert!(!body.contains("ns0:"));
}

#[tokio::test]
async fn stream_mpd_maps_origin_failure_to_502() {
    let origin = mock_origin("unavailable", 503).await;
    let addr = start_server(
        format!("{}/manifest.mpd", origin.uri()),
        format!("{}/license", origin.uri()),
    )
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{}/stream.mpd", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
}

#[tokio::test]
async fn keys_resolves_clearkey_pair_end_to_end() {
    let origin = mock_origin(PROTECTED_MPD, 200).await;

    let license = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/license"))
        // The fixture KID is all zeroes — 16 zero bytes encode to 22 'A's
        .and(body_json(json!({
            "kids": ["AAAAAAAAAAAAAAAAAAAAAA"],
            "type": "temporary"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keys": [{"kty": "oct", "kid": "ABCD", "k": "EFGH"}]
        })))
        .mount(&license)
        .await;

    let addr = start_server(
        format!("{}/manifest.mpd", origin.uri()),
        format!("{}/license", license.uri()),
    )
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{}/keys", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["kid_hex"], "001083");
    assert_eq!(body["key_hex"], "105187");
}

#[tokio::test]
async fn keys_returns_400_when_manifest_has_no_generic_kid() {
    let origin = mock_origin(DRM_ONLY_MPD, 200).await;
    let addr = start_server(
        format!("{}/manifest.mpd", origin.uri()),
        format!("{}/license", origin.uri()),
    )
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{}/keys", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("No default_KID found")
    );
}

#[tokio::test]
async fn keys_maps_license_server_failure_to_502() {
    let origin = mock_origin(PROTECTED_MPD, 200).await;

    let license = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&license)
        .await;

    let addr = start_server(
        format!("{}/manifest.mpd", origin.uri()),
        format!("{}/license", license.uri()),
    )
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{}/keys", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
}

#[tokio::test]
async fn keys_maps_garbage_license_body_to_500() {
    let origin = mock_origin(PROTECTED_MPD, 200).await;

    let license = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&license)
        .await;

    let addr = start_server(
        format!("{}/manifest.mpd", origin.uri()),
        format!("{}/license", license.uri()),
    )
    .await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{}/keys", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to parse license server response");
    assert!(body["details"].is_string());
}
