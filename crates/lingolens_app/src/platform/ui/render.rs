use lingolens_core::AppViewModel;

/// Lines of the result area: either the error alone, or the result sections
/// that have content.
pub fn result_lines(view: &AppViewModel) -> Vec<String> {
    if let Some(error) = &view.error {
        return vec![error.clone()];
    }
    let Some(result) = &view.result else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    if let Some(original) = &result.original_text {
        lines.push(format!(
            "Original Text ({}): {}",
            result.source_language, original
        ));
    }
    if let Some(translated) = &result.translated_text {
        lines.push(format!(
            "Translated Text ({}): {}",
            result.target_language_name, translated
        ));
    }
    if let Some(message) = &result.message {
        lines.push(format!("Note: {message}"));
    }
    lines
}

pub fn status_line(view: &AppViewModel) -> String {
    let target_name = view
        .languages
        .iter()
        .find(|(code, _)| *code == view.target_language)
        .map(|(_, name)| name.as_str())
        .unwrap_or("?");
    let backend = match view.backend_online {
        Some(true) => "online",
        Some(false) => "offline",
        None => "unknown",
    };
    let activity = if view.busy {
        format!("uploading {}%", view.progress)
    } else {
        "idle".to_string()
    };
    format!(
        "Target: {} ({}) | Backend: {} | {}",
        target_name, view.target_language, backend, activity
    )
}

pub fn language_lines(view: &AppViewModel) -> Vec<String> {
    view.languages
        .iter()
        .map(|(code, name)| {
            let marker = if *code == view.target_language { "*" } else { " " };
            format!("{marker} {code:<6} {name}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lingolens_core::ResultView;
    use pretty_assertions::assert_eq;

    use super::*;

    fn view_with(result: Option<ResultView>, error: Option<&str>) -> AppViewModel {
        AppViewModel {
            languages: vec![
                ("en".to_string(), "English".to_string()),
                ("es".to_string(), "Spanish".to_string()),
            ],
            target_language: "en".to_string(),
            result,
            error: error.map(str::to_string),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn result_shows_original_and_translation() {
        let view = view_with(
            Some(ResultView {
                source_language: "es".to_string(),
                original_text: Some("Hola".to_string()),
                target_language_name: "English".to_string(),
                translated_text: Some("Hello".to_string()),
                message: None,
            }),
            None,
        );
        assert_eq!(
            result_lines(&view),
            vec![
                "Original Text (es): Hola".to_string(),
                "Translated Text (English): Hello".to_string(),
            ]
        );
    }

    #[test]
    fn optional_sections_are_omitted_and_message_shown() {
        let view = view_with(
            Some(ResultView {
                source_language: "unknown".to_string(),
                original_text: None,
                target_language_name: "English".to_string(),
                translated_text: None,
                message: Some("No text detected in image".to_string()),
            }),
            None,
        );
        assert_eq!(
            result_lines(&view),
            vec!["Note: No text detected in image".to_string()]
        );
    }

    #[test]
    fn error_is_shown_verbatim() {
        let view = view_with(None, Some("OCR engine unavailable"));
        assert_eq!(result_lines(&view), vec!["OCR engine unavailable".to_string()]);
    }

    #[test]
    fn status_and_languages_mark_selection() {
        let view = AppViewModel {
            busy: true,
            progress: 42,
            backend_online: Some(true),
            ..view_with(None, None)
        };
        assert_eq!(
            status_line(&view),
            "Target: English (en) | Backend: online | uploading 42%"
        );
        assert_eq!(
            language_lines(&view),
            vec!["* en     English".to_string(), "  es     Spanish".to_string()]
        );
    }
}
