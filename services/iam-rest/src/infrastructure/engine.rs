//! 远程访问控制引擎客户端

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use tracing::{debug, warn};
use url::Url;
use warden_common::{RequestEnvelope, ResultEnvelope};
use warden_config::EngineConfig;
use warden_errors::SecurityError;

use crate::application::{AccessEngine, EngineError};

/// 通过 HTTP 调用访问控制引擎
///
/// 请求信封 POST 到 `{endpoint}/{operation}`；引擎以 2xx 返回结果信封，
/// 以 401/403 返回 SecurityError
#[derive(Clone)]
pub struct RemoteEngine {
    client: Client,
    endpoint: Url,
    api_key: Option<Secret<String>>,
}

impl RemoteEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut endpoint = Url::parse(&config.endpoint)
            .map_err(|e| EngineError::Transport(format!("invalid engine endpoint: {e}")))?;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn operation_url(&self, operation: &str) -> Result<Url, EngineError> {
        self.endpoint
            .join(operation)
            .map_err(|e| EngineError::Transport(format!("invalid operation path {operation}: {e}")))
    }
}

#[async_trait]
impl AccessEngine for RemoteEngine {
    async fn invoke(
        &self,
        operation: &str,
        request: RequestEnvelope,
    ) -> Result<ResultEnvelope, EngineError> {
        let url = self.operation_url(operation)?;
        debug!(%operation, %url, "Invoking access engine");

        let mut builder = self.client.post(url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<ResultEnvelope>()
                .await
                .map_err(|e| EngineError::Transport(format!("failed to parse engine response: {e}")));
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%operation, %status, "Access engine returned an error status");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if let Ok(err) = serde_json::from_str::<SecurityError>(&body) {
                return Err(EngineError::Security(err));
            }
        }
        Err(EngineError::Transport(format!("HTTP {status}: {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> EngineConfig {
        EngineConfig {
            endpoint: endpoint.to_string(),
            api_key: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_operation_url() {
        let engine = RemoteEngine::new(&config("http://engine:9000/fortress")).unwrap();
        assert_eq!(
            engine.operation_url("addUser").unwrap().as_str(),
            "http://engine:9000/fortress/addUser"
        );

        let engine = RemoteEngine::new(&config("http://engine:9000/fortress/")).unwrap();
        assert_eq!(
            engine.operation_url("readUser").unwrap().as_str(),
            "http://engine:9000/fortress/readUser"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            RemoteEngine::new(&config("not a url")),
            Err(EngineError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_transport_error() {
        let engine = RemoteEngine::new(&config("http://127.0.0.1:1/engine")).unwrap();
        let err = engine
            .invoke("addUser", RequestEnvelope::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Transport(_)));
    }
}
