use anyhow::{Context, Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin PostgREST client for the hosted Supabase project.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.anon_key).context("anon key is not a valid header value")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Public reads authenticate with the anon key itself.
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
                .context("anon key is not a valid bearer token")?,
        );

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.base_url.is_empty() {
            return Err(anyhow!("Supabase URL is not configured"));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let headers = self.get_headers()?;

        let response = self.client.request(method, &url).headers(headers).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// `select * from <table>` through the REST endpoint.
    pub async fn select_all<T>(&self, table: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}?select=*", table);
        self.request(Method::GET, &path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(url: &str) -> AppConfig {
        AppConfig {
            supabase_url: url.to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            doctors_table: "doctors".to_string(),
            geocoding_base_url: "http://localhost:0".to_string(),
            server_port: 3000,
        }
    }

    #[tokio::test]
    async fn test_select_all_sends_anon_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/doctors"))
            .and(query_param("select", "*"))
            .and(header("apikey", "test-anon-key"))
            .and(header("Authorization", "Bearer test-anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "d-1" }])))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&config_for(&mock_server.uri()));
        let rows: Vec<Value> = client.select_all("doctors").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "d-1");
    }

    #[tokio::test]
    async fn test_request_maps_server_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/doctors"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&config_for(&mock_server.uri()));
        let err = client.select_all::<Value>("doctors").await.unwrap_err();

        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_fast() {
        let client = SupabaseClient::new(&config_for(""));
        assert!(client.select_all::<Value>("doctors").await.is_err());
    }
}
