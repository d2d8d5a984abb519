use std::time::Duration;

use lingolens_client::{
    ClientError, ClientEvent, ClientHandle, ClientSettings, ReqwestTranslateClient,
    TranslateClient,
};
use lingolens_core::{update, AppState, ImageCandidate, Msg};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestTranslateClient {
    ReqwestTranslateClient::new(ClientSettings::with_base_url(&server.uri()).unwrap())
}

fn unreachable_settings() -> ClientSettings {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    ClientSettings::with_base_url(&format!("http://127.0.0.1:{port}")).unwrap()
}

#[tokio::test]
async fn catalog_is_read_from_languages_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "languages": {"en": "English", "ko": "Korean", "ar": "Arabic"}
        })))
        .mount(&server)
        .await;

    let catalog = client_for(&server).fetch_languages().await.unwrap();
    let entries: Vec<_> = catalog.iter().collect();
    assert_eq!(
        entries,
        vec![("ar", "Arabic"), ("en", "English"), ("ko", "Korean")]
    );
}

#[tokio::test]
async fn catalog_status_error_is_catalog_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_languages().await.unwrap_err();
    assert!(matches!(err, ClientError::CatalogFetch(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_catalog_is_catalog_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"langs": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_languages().await.unwrap_err();
    assert!(matches!(err, ClientError::CatalogFetch(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_catalog_falls_back_to_builtin_languages() {
    let client = ReqwestTranslateClient::new(unreachable_settings());
    let err = client.fetch_languages().await.unwrap_err();
    assert!(matches!(err, ClientError::CatalogFetch(_)), "{err:?}");

    let (state, _) = update(AppState::new(), Msg::CatalogLoaded(Err(err.to_string())));
    let view = state.view();
    let names: Vec<_> = view.languages.iter().map(|(_, name)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["German", "English", "Spanish", "French", "Japanese", "Chinese"]
    );
    assert_eq!(view.target_language, "en");
}

#[tokio::test]
async fn health_reflects_status_class() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    assert!(client_for(&server).health_check().await);

    let failing = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing)
        .await;
    assert!(!client_for(&failing).health_check().await);
}

#[tokio::test]
async fn health_is_false_when_unreachable() {
    let client = ReqwestTranslateClient::new(unreachable_settings());
    assert!(!client.health_check().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn handle_reports_progress_then_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate-image"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "OCR engine unavailable"})),
        )
        .mount(&server)
        .await;

    let handle = ClientHandle::new(ClientSettings::with_base_url(&server.uri()).unwrap());
    let image = ImageCandidate::new("a.png", "image/png", b"png-bytes".to_vec());
    handle.submit(42, image, "de");

    let mut events = Vec::new();
    while let Some(event) = handle.recv_timeout(Duration::from_secs(5)) {
        let done = matches!(event, ClientEvent::SubmissionCompleted { .. });
        events.push(event);
        if done {
            break;
        }
    }

    assert_eq!(
        events,
        vec![
            ClientEvent::Progress {
                submission_id: 42,
                percent: 100
            },
            ClientEvent::SubmissionCompleted {
                submission_id: 42,
                result: Err(ClientError::Backend("OCR engine unavailable".to_string())),
            },
        ]
    );
}
