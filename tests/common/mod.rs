#![allow(dead_code)]

use std::time::Duration;

use enricher::{
    configuration::InsightSettings,
    services::{CompanyLookup, EnrichmentPipeline, OpenaiClient, WebsiteScraper},
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLEARBIT_KEY: &str = "test-clearbit-key";
pub const OPENAI_KEY: &str = "test-openai-key";

pub fn insight_settings(api_base: &str) -> InsightSettings {
    InsightSettings {
        api_base: api_base.to_string(),
        model: "gpt-4o-mini".to_string(),
        max_tokens: 300,
        temperature: 0.7,
    }
}

pub fn lookup_client(server: &MockServer) -> CompanyLookup {
    CompanyLookup::new(CLEARBIT_KEY.to_string(), &server.uri())
}

pub fn scraper() -> WebsiteScraper {
    WebsiteScraper::new(Duration::from_secs(5)).unwrap()
}

pub fn openai_client(server: &MockServer) -> OpenaiClient {
    OpenaiClient::new(OPENAI_KEY.to_string(), &insight_settings(&server.uri()))
}

pub fn pipeline(lookup_server: &MockServer, openai_server: &MockServer) -> EnrichmentPipeline {
    EnrichmentPipeline::new(
        lookup_client(lookup_server),
        scraper(),
        openai_client(openai_server),
    )
}

/// `host:port` of a mock server, usable where a bare hostname is expected.
pub fn host_of(server: &MockServer) -> String {
    server.address().to_string()
}

/// Mounts a directory lookup answer for one company name. Unmatched names get
/// wiremock's default 404.
pub async fn mock_lookup(server: &MockServer, company_name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v2/companies/find"))
        .and(query_param("name", company_name))
        .and(header("authorization", format!("Bearer {}", CLEARBIT_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_homepage(html: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    server
}

pub fn chat_completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 50, "completion_tokens": 30, "total_tokens": 80}
    })
}

pub async fn mock_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {}", OPENAI_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body(content)))
        .mount(server)
        .await;
}

/// Fails on drop if the completion endpoint was called at all.
pub async fn forbid_completion(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
