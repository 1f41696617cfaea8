//! Configuration loading and the provider factory

use inference_dispatch::Config;
use inference_dispatch::GatewayError;
use inference_dispatch::core::providers::{HttpTransport, build_registry};
use inference_dispatch::core::types::RequestMode;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_full_config_builds_registry() {
    let file = write_config(
        r#"
server:
  host: "127.0.0.1"
  port: 9100
  cors:
    allowed_origins: ["https://chat.example"]

dispatch:
  max_retries: 1
  base_delay_ms: 250
  max_delay_ms: 2000
  call_timeout: 20
  total_timeout: 60
  preferred_providers:
    image: huggingface

providers:
  - name: openrouter
    api_key: "sk-or-inline"
    priority: 1
    settings:
      site_name: "Example Chat"
  - name: huggingface
    api_key: "hf-inline"
    priority: 2
    models:
      image: ["stabilityai/sdxl-turbo"]
  - name: ai_horde
    priority: 9
    timeout: 300
    settings:
      poll_interval_ms: 1500
"#,
    );

    let config = Config::from_file(file.path()).await.unwrap();
    let router = config.dispatch().to_router_config();
    assert_eq!(router.max_retries, 1);
    assert_eq!(router.base_delay, Duration::from_millis(250));
    assert_eq!(router.call_timeout, Duration::from_secs(20));
    assert_eq!(
        router.preferred_providers.get(&RequestMode::Image).map(String::as_str),
        Some("huggingface")
    );
    assert!(!config.server().cors.allows_all_origins());

    let registry =
        build_registry(config.providers(), HttpTransport::new("config-tests").unwrap()).unwrap();
    assert_eq!(registry.names(), vec!["openrouter", "huggingface", "ai_horde"]);

    let image: Vec<String> = registry
        .list_eligible(RequestMode::Image)
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(image, vec!["huggingface", "ai_horde"]);

    let horde = registry.get("ai_horde").unwrap();
    assert_eq!(horde.call_timeout(), Some(Duration::from_secs(300)));
    let hf = registry.get("huggingface").unwrap();
    assert_eq!(
        hf.descriptor().resolve_model(RequestMode::Image, &[]),
        Some("stabilityai/sdxl-turbo")
    );
}

#[tokio::test]
async fn test_duplicate_provider_rejected() {
    let file = write_config(
        r#"
providers:
  - name: together
    api_key: a
  - name: together
    api_key: b
"#,
    );

    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Config(msg) if msg.contains("Duplicate provider name")));
}

#[tokio::test]
async fn test_zero_timeout_rejected() {
    let file = write_config("dispatch:\n  call_timeout: 0\n");
    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Config(msg) if msg.contains("Call timeout")));
}

#[tokio::test]
async fn test_unparseable_yaml_rejected() {
    let file = write_config("server: [not, a, map");
    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Config(msg) if msg.contains("Failed to parse")));
}

#[tokio::test]
async fn test_empty_file_uses_defaults() {
    let file = write_config("{}\n");
    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.server().port, 8000);
    assert_eq!(config.providers().len(), 4);
    assert_eq!(config.dispatch().max_retries, 3);
    assert_eq!(
        config.dispatch().preferred_providers[&RequestMode::Research],
        "together"
    );
}
