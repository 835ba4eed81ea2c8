//! Provider discovery: local Ollama first, then remote providers

use crate::error::{OracleError, OracleResult};
use crate::provider::{create_provider, ChatProvider};
use crate::settings::OracleSettings;
use std::sync::Arc;
use tracing::{debug, info};

/// Check whether a local Ollama server answers `GET /api/tags` within the
/// probe timeout
pub async fn probe_local(settings: &OracleSettings) -> bool {
    if !settings.probe_local {
        return false;
    }

    let client = match reqwest::Client::builder()
        .timeout(settings.probe_timeout())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            debug!("Could not build probe client: {}", e);
            return false;
        }
    };

    let url = format!("{}/api/tags", settings.ollama_base_url.trim_end_matches('/'));
    match client
        .get(&url)
        .header(reqwest::header::CONNECTION, "close")
        .send()
        .await
    {
        Ok(resp) => resp.status() == reqwest::StatusCode::OK,
        Err(e) => {
            debug!("Ollama not reachable at {}: {}", url, e);
            false
        }
    }
}

/// Pick the provider to use for this request
pub async fn discover_provider(settings: &OracleSettings) -> OracleResult<Arc<dyn ChatProvider>> {
    if probe_local(settings).await {
        info!("Using local Ollama at {}", settings.ollama_base_url);
        return create_provider(settings.local_config());
    }

    match settings.remote_config() {
        Some(config) => {
            info!("Using remote provider {}", config.provider.as_str());
            create_provider(config)
        }
        None => Err(OracleError::Unavailable(
            "no local server and no API key configured".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderKind;

    #[tokio::test]
    async fn test_no_provider_available() {
        let settings = OracleSettings::default().without_local_probe();
        let result = discover_provider(&settings).await;
        assert!(matches!(result, Err(OracleError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_falls_back_to_remote() {
        let settings = OracleSettings::default()
            .without_local_probe()
            .groq_key("gsk-test");
        let provider = discover_provider(&settings).await.unwrap();
        assert_eq!(provider.kind(), ProviderKind::Groq);
    }

    #[tokio::test]
    async fn test_probe_disabled() {
        let settings = OracleSettings::default().without_local_probe();
        assert!(!probe_local(&settings).await);
    }
}
