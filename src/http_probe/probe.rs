use std::time::Instant;

use reqwest::Client;

use super::prelude::{ProbeRequest, ProbeResult};
use crate::error::Result;

/// Send `request` and collect the status code and body text.
/// Any HTTP status counts as a result; only transport failures are errors.
pub async fn send_probe(client: &Client, request: ProbeRequest) -> Result<ProbeResult> {
    let ProbeRequest {
        method,
        url,
        headers,
        body,
        timeout,
    } = request;

    log::debug!("{method} {url} (timeout {}s)", timeout.as_secs());

    let mut builder = client.request(method, url.clone()).headers(headers).timeout(timeout);
    if let Some(body) = &body {
        builder = builder.json(body);
    }

    let start = Instant::now();
    let response = builder.send().await?;
    let status_code = response.status().as_u16();
    let body_text = response.text().await?;

    log::debug!(
        "{url} answered {status_code} in {:.2}ms ({} bytes)",
        start.elapsed().as_secs_f64() * 1000.0,
        body_text.len()
    );

    Ok(ProbeResult {
        status_code,
        body_text,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::error::ProbeError;
    use crate::http_probe::request::endpoint;

    #[tokio::test]
    async fn non_success_status_is_still_a_result() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = endpoint(&mock_server.uri(), "/health").expect("valid url");
        let result = send_probe(&Client::new(), ProbeRequest::get(url, Duration::from_secs(5)))
            .await
            .expect("probe returns a result");

        assert_eq!(result.status_code, 503);
        assert_eq!(result.body_text, "down");
    }

    #[tokio::test]
    async fn post_sends_headers_and_json_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("Authorization", "Bearer token-1"))
            .and(header("Accept", "application/json"))
            .and(body_json(json!([{"id": 1}])))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = endpoint(&mock_server.uri(), "/echo").expect("valid url");
        let request = ProbeRequest::post_json(url, json!([{"id": 1}]), Duration::from_secs(5))
            .bearer("token-1")
            .expect("valid token");
        let result = send_probe(&Client::new(), request).await.expect("probe returns a result");

        assert_eq!(result.status_code, 200);
    }

    #[tokio::test]
    async fn slow_server_times_out_as_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let url = endpoint(&mock_server.uri(), "/health").expect("valid url");
        let result = send_probe(&Client::new(), ProbeRequest::get(url, Duration::from_millis(100))).await;

        match result {
            Err(ProbeError::Transport(e)) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {other:?}"),
        }
    }
}
