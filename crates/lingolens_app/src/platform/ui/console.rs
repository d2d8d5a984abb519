use indicatif::{ProgressBar, ProgressStyle};
use lingolens_core::AppViewModel;

use super::render::result_lines;

/// Terminal output: an upload bar while busy, result lines whenever the
/// result area is replaced.
#[derive(Default)]
pub struct Console {
    bar: Option<ProgressBar>,
    result_revision: u64,
    copied: bool,
    drag_active: bool,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) {
        if view.busy {
            let bar = self.bar.get_or_insert_with(upload_bar);
            bar.set_position(u64::from(view.progress));
        } else if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        for line in self.new_lines(view) {
            self.println(line);
        }
    }

    /// Lines that `view` adds to what has already been printed.
    fn new_lines(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        if view.drag_active && !self.drag_active {
            lines.push("Drop to translate...".to_string());
        }
        self.drag_active = view.drag_active;

        if view.result_revision != self.result_revision {
            lines.extend(result_lines(view));
            self.result_revision = view.result_revision;
        }

        if view.copied && !self.copied {
            lines.push("Copied!".to_string());
        }
        self.copied = view.copied;

        lines
    }

    pub fn println(&self, line: impl AsRef<str>) {
        match &self.bar {
            Some(bar) => bar.println(line.as_ref()),
            None => println!("{}", line.as_ref()),
        }
    }
}

fn upload_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} Uploading [{bar:40.cyan/blue}] {pos}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}
