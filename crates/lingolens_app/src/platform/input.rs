//! Line commands of the interactive session.
//!
//! Dragging a file onto most terminals types its (possibly quoted) path, so a
//! line that names an existing file is treated as a drop.
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Quit,
    Help,
    Copy,
    ListLanguages,
    Status,
    SelectLanguage(String),
    /// `open <path>`: the file-picker channel.
    Pick(PathBuf),
    /// A bare path: the drag-and-drop channel.
    Drop(PathBuf),
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  open <path>   translate a file (file picker)
  <path>        translate a file dragged onto the terminal
  lang <code>   choose the target language
  langs         list target languages
  copy          copy the translated text
  status        show the current state
  quit          leave
Images copied to the clipboard are translated automatically.";

pub fn parse_line(line: &str, exists: impl Fn(&Path) -> bool) -> InputCommand {
    let line = line.trim();
    if line.is_empty() {
        return InputCommand::Empty;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word, rest.is_empty()) {
        ("quit" | "exit" | ":q", true) => InputCommand::Quit,
        ("help" | "?", true) => InputCommand::Help,
        ("copy", true) => InputCommand::Copy,
        ("langs" | "languages", true) => InputCommand::ListLanguages,
        ("status", true) => InputCommand::Status,
        ("lang", false) => InputCommand::SelectLanguage(rest.to_string()),
        ("open", false) => InputCommand::Pick(dropped_path(rest)),
        _ => {
            let path = dropped_path(line);
            if exists(&path) {
                InputCommand::Drop(path)
            } else {
                InputCommand::Unknown(line.to_string())
            }
        }
    }
}

/// Undoes the quoting terminals apply to dropped paths.
fn dropped_path(raw: &str) -> PathBuf {
    let raw = raw.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|quote| {
            raw.strip_prefix(*quote)
                .and_then(|inner| inner.strip_suffix(*quote))
        })
        .unwrap_or(raw);
    let unprefixed = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    PathBuf::from(unprefixed.replace("\\ ", " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &Path) -> bool {
        false
    }

    #[test]
    fn keywords_are_recognised() {
        assert_eq!(parse_line("quit", never), InputCommand::Quit);
        assert_eq!(parse_line("  copy ", never), InputCommand::Copy);
        assert_eq!(
            parse_line("lang es", never),
            InputCommand::SelectLanguage("es".to_string())
        );
        assert_eq!(
            parse_line("open ~/shots/menu.png", never),
            InputCommand::Pick(PathBuf::from("~/shots/menu.png"))
        );
        assert_eq!(parse_line("", never), InputCommand::Empty);
    }

    #[test]
    fn existing_paths_are_drops() {
        let exists = |path: &Path| path == Path::new("/tmp/my shot.png");
        assert_eq!(
            parse_line("'/tmp/my shot.png'", exists),
            InputCommand::Drop(PathBuf::from("/tmp/my shot.png"))
        );
        assert_eq!(
            parse_line("/tmp/my\\ shot.png", exists),
            InputCommand::Drop(PathBuf::from("/tmp/my shot.png"))
        );
        assert_eq!(
            parse_line("file:///tmp/my shot.png", exists),
            InputCommand::Drop(PathBuf::from("/tmp/my shot.png"))
        );
    }

    #[test]
    fn unknown_lines_are_reported() {
        assert_eq!(
            parse_line("translate please", never),
            InputCommand::Unknown("translate please".to_string())
        );
        assert_eq!(
            parse_line("lang", never),
            InputCommand::Unknown("lang".to_string())
        );
    }
}
