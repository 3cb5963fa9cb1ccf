use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::types::DashboardError;

use super::super::api::ApiEnvelope;
use super::super::helpers::join_url;

/// Thin wrapper around `reqwest` that knows the backend's response envelope.
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, language: &str, timeout: Duration) -> Result<Self, DashboardError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let language = HeaderValue::from_str(language)
            .map_err(|err| DashboardError::Config(format!("invalid language header: {err}")))?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(DashboardError::Http)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_data<T>(&self, path: &str) -> Result<Option<T>, DashboardError>
    where
        T: DeserializeOwned,
    {
        self.get_data_with_query(path, &()).await
    }

    /// GET `path` and unwrap the envelope.
    /// - `Ok(Some(data))` on success with a payload
    /// - `Ok(None)` when the envelope succeeded but carried no `data`
    /// - `Err` for transport failures, non-2xx statuses and `success: false`
    pub async fn get_data_with_query<T, Q>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Option<T>, DashboardError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = join_url(&self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(DashboardError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(rejection(path, response).await);
        }

        let bytes = response.bytes().await.map_err(DashboardError::Http)?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
        if !envelope.success {
            let (code, message) = match envelope.error {
                Some(error) => (error.code, error.message),
                None => ("UNKNOWN".to_string(), envelope.message),
            };
            return Err(DashboardError::Api { code, message });
        }
        if envelope.data.is_none() {
            warn!(path, "Response envelope carried no data");
        }
        Ok(envelope.data)
    }
}

/// Prefer the backend's own error body over the bare status code.
async fn rejection(path: &str, response: Response) -> DashboardError {
    let status = response.status().as_u16();
    match response.json::<ApiEnvelope<serde_json::Value>>().await {
        Ok(ApiEnvelope {
            error: Some(error), ..
        }) => DashboardError::Api {
            code: error.code,
            message: error.message,
        },
        _ => DashboardError::Status {
            path: path.to_string(),
            status,
        },
    }
}
