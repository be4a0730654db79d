//! REST sink for hosted Postgres (PostgREST-style `/rest/v1/<table>` endpoint)

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::{RecordSink, SinkError};
use crate::import::TypedRecord;

/// Inserts batches with one `POST` per call
#[derive(Debug, Clone)]
pub struct RestSink {
    client: reqwest::Client,
    base_url: String,
}

impl RestSink {
    /// Create a sink for the project at `base_url` (e.g. `https://xyz.supabase.co`)
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("API key is not a valid header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("return=minimal"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Insert endpoint for a table
    pub fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, urlencoding::encode(table))
    }
}

#[async_trait]
impl RecordSink for RestSink {
    async fn insert_batch(&self, table: &str, records: &[TypedRecord]) -> Result<(), SinkError> {
        let url = self.endpoint(table);
        log::debug!("POST {} ({} records)", url, records.len());

        let response = self
            .client
            .post(&url)
            .json(records)
            .send()
            .await
            .map_err(|e| SinkError::new(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        log::debug!("Insert into '{}' rejected with {}: {}", table, status, body);
        Err(SinkError::with_status(status.as_u16(), body.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::Value;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one HTTP request, answer with `response`, return the raw request
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });

        (url, handle)
    }

    fn sample_record() -> TypedRecord {
        let mut record = TypedRecord::new();
        record.insert("handle", Value::String("pupcake".into()));
        record.insert("variant_price", Value::Float(12.5));
        record
    }

    #[test]
    fn test_endpoint() {
        let sink = RestSink::new("https://xyz.supabase.co/", "key", Duration::from_secs(5)).unwrap();
        assert_eq!(
            sink.endpoint("shopify_products"),
            "https://xyz.supabase.co/rest/v1/shopify_products"
        );
        assert_eq!(sink.endpoint("odd table"), "https://xyz.supabase.co/rest/v1/odd%20table");
    }

    #[test]
    fn test_rejects_unprintable_key() {
        assert!(RestSink::new("https://xyz.supabase.co", "bad\nkey", Duration::from_secs(5)).is_err());
    }

    #[tokio::test]
    async fn test_insert_sends_json_array() {
        let (url, server) =
            serve_once("HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
        let sink = RestSink::new(&url, "secret", Duration::from_secs(5)).unwrap();

        sink.insert_batch("shopify_products", &[sample_record()])
            .await
            .unwrap();

        let request = server.await.unwrap();
        let lowered = request.to_lowercase();
        assert!(request.starts_with("POST /rest/v1/shopify_products HTTP/1.1"));
        assert!(lowered.contains("apikey: secret"));
        assert!(lowered.contains("authorization: bearer secret"));
        assert!(lowered.contains("prefer: return=minimal"));

        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"handle": "pupcake", "variant_price": 12.5}])
        );
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let response = "HTTP/1.1 409 Conflict\r\nContent-Type: application/json\r\n\
                        Content-Length: 27\r\nConnection: close\r\n\r\n\
                        {\"message\":\"duplicate key\"}";
        let (url, server) = serve_once(response).await;
        let sink = RestSink::new(&url, "secret", Duration::from_secs(5)).unwrap();

        let err = sink
            .insert_batch("products", &[sample_record()])
            .await
            .unwrap_err();
        server.await.unwrap();

        assert_eq!(err.status, Some(409));
        assert!(err.message.contains("duplicate key"));
    }

    #[tokio::test]
    async fn test_connection_failure_has_no_status() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let sink = RestSink::new(&url, "secret", Duration::from_secs(5)).unwrap();
        let err = sink.insert_batch("products", &[]).await.unwrap_err();
        assert_eq!(err.status, None);
    }
}
