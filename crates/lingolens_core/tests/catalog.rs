use lingolens_core::{update, AppState, Effect, ImageCandidate, LanguageCatalog, Msg};
use pretty_assertions::assert_eq;

fn remote_catalog() -> LanguageCatalog {
    [("en", "English"), ("ko", "Korean"), ("pt", "Portuguese")]
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
}

fn codes(state: &AppState) -> Vec<String> {
    state
        .view()
        .languages
        .into_iter()
        .map(|(code, _)| code)
        .collect()
}

#[test]
fn mount_requests_catalog_and_health() {
    let (_, effects) = update(AppState::new(), Msg::Mounted);
    assert_eq!(effects, vec![Effect::FetchCatalog, Effect::CheckHealth]);
}

#[test]
fn catalog_failure_installs_six_entry_fallback() {
    let (state, effects) = update(
        AppState::new(),
        Msg::CatalogLoaded(Err("Network error occurred".to_string())),
    );

    assert!(effects.is_empty());
    assert_eq!(codes(&state), vec!["de", "en", "es", "fr", "ja", "zh"]);
    assert_eq!(state.view().target_language, "en");
    assert!(state.view().error.is_none());
}

#[test]
fn empty_remote_catalog_is_treated_as_failure() {
    let (state, _) = update(
        AppState::new(),
        Msg::CatalogLoaded(Ok(LanguageCatalog::new(Default::default()))),
    );
    assert_eq!(state.view().languages.len(), 6);
}

#[test]
fn remote_catalog_replaces_fallback_and_keeps_selection() {
    let (state, _) = update(AppState::new(), Msg::CatalogLoaded(Ok(remote_catalog())));

    assert_eq!(codes(&state), vec!["en", "ko", "pt"]);
    assert_eq!(state.target_language(), "en");
}

#[test]
fn selection_outside_new_catalog_resets_to_default() {
    let (state, _) = update(AppState::new(), Msg::LanguageSelected("fr".to_string()));
    assert_eq!(state.target_language(), "fr");

    let (state, _) = update(state, Msg::CatalogLoaded(Ok(remote_catalog())));
    assert_eq!(state.target_language(), "en");
}

#[test]
fn unknown_language_selection_is_ignored() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::LanguageSelected("tlh".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state, next);
}

#[test]
fn selected_language_flows_into_submission() {
    let (state, _) = update(AppState::new(), Msg::CatalogLoaded(Ok(remote_catalog())));
    let (state, _) = update(state, Msg::LanguageSelected("ko".to_string()));
    let image = ImageCandidate::new("sign.png", "image/png", b"png".to_vec());
    let (_, effects) = update(state, Msg::FilesPicked(vec![image]));

    match effects.as_slice() {
        [Effect::Submit {
            target_language, ..
        }] => assert_eq!(target_language, "ko"),
        other => panic!("expected submit, got {other:?}"),
    }
}

#[test]
fn health_status_is_reported_on_the_view() {
    let state = AppState::new();
    assert_eq!(state.view().backend_online, None);

    let (state, _) = update(state, Msg::HealthChecked(false));
    assert_eq!(state.view().backend_online, Some(false));
}
