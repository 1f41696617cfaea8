//! Live dispatch through the real provider adapters

use crate::skip_without_api_key;
use inference_dispatch::config::ProviderConfig;
use inference_dispatch::core::providers::{HttpTransport, build_registry};
use inference_dispatch::core::types::{InferenceRequest, Payload, RequestMode};
use inference_dispatch::{Dispatcher, RouterConfig};
use std::sync::Arc;
use std::time::Duration;

fn live_dispatcher(names: &[&str]) -> Dispatcher {
    let configs: Vec<ProviderConfig> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let key = crate::common::providers::get_api_key(name).unwrap_or_default();
            ProviderConfig::new(*name, i as i32 + 1).with_api_key(key)
        })
        .collect();
    let registry = build_registry(&configs, HttpTransport::new("inference-dispatch-e2e").unwrap())
        .unwrap();
    Dispatcher::new(
        Arc::new(registry),
        RouterConfig::default()
            .with_max_retries(1)
            .with_timeouts(Duration::from_secs(60), Duration::from_secs(180)),
    )
}

#[tokio::test]
#[ignore]
async fn test_openrouter_live_chat() {
    skip_without_api_key!("openrouter");

    let dispatcher = live_dispatcher(&["openrouter"]);
    let request = InferenceRequest::new("Reply with the single word: pong", RequestMode::Chat)
        .with_system_prompt("Answer in one word.");

    let outcome = dispatcher.dispatch(&request).await.unwrap();
    assert_eq!(outcome.result.provider_name, "openrouter");
    assert!(!outcome.result.payload.as_text().unwrap_or_default().trim().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_together_live_image() {
    skip_without_api_key!("together");

    let dispatcher = live_dispatcher(&["together"]);
    let request = InferenceRequest::new("a small red square", RequestMode::Image);

    let outcome = dispatcher.dispatch(&request).await.unwrap();
    match outcome.result.payload {
        Payload::Binary { data, .. } => assert!(!data.is_empty()),
        other => panic!("expected image payload, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn test_live_failover_to_horde() {
    // A bogus OpenRouter key forces failover to the anonymous horde
    let configs = vec![
        ProviderConfig::new("openrouter", 1).with_api_key("sk-or-invalid"),
        ProviderConfig::new("ai_horde", 2),
    ];
    let registry =
        build_registry(&configs, HttpTransport::new("inference-dispatch-e2e").unwrap()).unwrap();
    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        RouterConfig::default().with_timeouts(Duration::from_secs(300), Duration::from_secs(600)),
    );

    let outcome = dispatcher
        .dispatch(&InferenceRequest::new("Say hello", RequestMode::Chat))
        .await
        .unwrap();
    assert!(outcome.used_fallback());
    assert_eq!(outcome.result.provider_name, "ai_horde");
}
