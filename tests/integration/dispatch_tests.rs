//! Dispatch across real adapters and scripted providers

use crate::common::OutcomeAssertions;
use crate::common::fixtures::{RequestFactory, fast_router, mock_provider};
use crate::common::providers::{ScriptedProvider, http, registry_of};
use inference_dispatch::core::providers::{HttpTransport, build_registry};
use inference_dispatch::core::types::{Payload, RequestMode};
use inference_dispatch::{DispatchError, Dispatcher, ErrorKind};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::task;
use tokio_test::{assert_pending, assert_ready_err};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: [u8; 4] = [0x89, b'P', b'N', b'G'];

fn transport() -> HttpTransport {
    HttpTransport::new("dispatch-tests").unwrap()
}

#[tokio::test]
async fn test_rate_limited_vendor_fails_over_to_next() {
    let openrouter = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(4)
        .mount(&openrouter)
        .await;

    let together = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "served by together"}}]
        })))
        .expect(1)
        .mount(&together)
        .await;

    let configs = vec![
        mock_provider("openrouter", 1, &openrouter.uri()),
        mock_provider("together", 2, &together.uri()),
    ];
    let registry = build_registry(&configs, transport()).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry), fast_router());

    let outcome = dispatcher
        .dispatch(&RequestFactory::chat("hello"))
        .await
        .unwrap();

    outcome.assert_served_by("together");
    outcome.assert_tried(&["openrouter", "together"]);
    assert_eq!(outcome.total_attempts(), 5);
    assert_eq!(outcome.result.payload.as_text(), Some("served by together"));
    let last_failure = outcome.attempts[3].error.as_ref().unwrap();
    assert_eq!(last_failure.kind(), ErrorKind::RateLimit);
    assert_eq!(last_failure.http_status(), Some(429));
}

#[tokio::test]
async fn test_image_goes_to_preferred_vendor_then_falls_back() {
    // Together is preferred for images but keeps failing
    let together = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&together)
        .await;

    let huggingface = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/stabilityai/stable-diffusion-xl-base-1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG.to_vec(), "image/png"))
        .expect(1)
        .mount(&huggingface)
        .await;

    let configs = vec![
        mock_provider("huggingface", 1, &huggingface.uri()),
        mock_provider("together", 5, &together.uri()),
    ];
    let registry = build_registry(&configs, transport()).unwrap();
    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        fast_router().with_preferred(RequestMode::Image, "together"),
    );

    let outcome = dispatcher
        .dispatch(&RequestFactory::image("a lighthouse"))
        .await
        .unwrap();

    outcome.assert_tried(&["together", "huggingface"]);
    outcome.assert_served_by("huggingface");
    match &outcome.result.payload {
        Payload::Binary { mime_type, data } => {
            assert_eq!(mime_type, "image/png");
            assert_eq!(&data[..], &PNG[..]);
        }
        other => panic!("expected image, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bad_credentials_everywhere_exhausts_quickly() {
    let openrouter = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .expect(1)
        .mount(&openrouter)
        .await;
    let together = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&together)
        .await;

    let configs = vec![
        mock_provider("openrouter", 1, &openrouter.uri()),
        mock_provider("together", 2, &together.uri()),
    ];
    let registry = build_registry(&configs, transport()).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry), fast_router());

    let err = dispatcher
        .dispatch(&RequestFactory::chat("hello"))
        .await
        .unwrap_err();

    assert_eq!(err.attempts(), 2);
    assert_eq!(err.kind_name(), "Authorization");
    assert_eq!(err.last_error().and_then(|e| e.http_status()), Some(403));
}

#[tokio::test]
async fn test_unconfigured_vendors_are_skipped() {
    let together = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "hi"}}]
        })))
        .expect(1)
        .mount(&together)
        .await;

    let configs = vec![
        // No key, never called
        mock_provider("openrouter", 1, "http://127.0.0.1:9").with_api_key(""),
        mock_provider("together", 2, &together.uri()),
    ];
    let registry = build_registry(&configs, transport()).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry), fast_router());

    let outcome = dispatcher
        .dispatch(&RequestFactory::chat("hello"))
        .await
        .unwrap();
    outcome.assert_tried(&["together"]);
    assert_eq!(outcome.total_attempts(), 1);
}

#[tokio::test]
async fn test_research_without_capable_vendor() {
    let configs = vec![mock_provider("huggingface", 1, "http://127.0.0.1:9")];
    let registry = build_registry(&configs, transport()).unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry), fast_router());

    let err = dispatcher
        .dispatch(&RequestFactory::research("anything"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::NoProvidersAvailable {
            mode: RequestMode::Research
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_provider_is_working() {
    let slow = Arc::new(ScriptedProvider::healthy("slow", 1).with_latency(Duration::from_secs(10)));
    let dispatcher = Dispatcher::new(Arc::new(registry_of(&[slow.clone()])), fast_router());
    let request = RequestFactory::chat("hello");
    let cancel = CancellationToken::new();

    let mut dispatch = task::spawn(dispatcher.dispatch_with_cancel(&request, cancel.clone()));
    assert_pending!(dispatch.poll());
    assert_eq!(slow.calls(), 1);

    cancel.cancel();
    assert!(dispatch.is_woken());
    let err = assert_ready_err!(dispatch.poll());
    assert_eq!(err, DispatchError::Cancelled { attempts: 1 });
}

#[tokio::test(start_paused = true)]
async fn test_flaky_provider_recovers_without_failover() {
    let flaky = Arc::new(
        ScriptedProvider::healthy("flaky", 1)
            .then(Err(http(503)))
            .then(Err(http(502))),
    );
    let backup = Arc::new(ScriptedProvider::healthy("backup", 2));
    let dispatcher = Dispatcher::new(
        Arc::new(registry_of(&[flaky.clone(), backup.clone()])),
        fast_router(),
    );

    let outcome = dispatcher
        .dispatch(&RequestFactory::chat("hello"))
        .await
        .unwrap();

    outcome.assert_served_by("flaky");
    assert!(!outcome.used_fallback());
    assert_eq!(flaky.calls(), 3);
    assert_eq!(backup.calls(), 0);
}
