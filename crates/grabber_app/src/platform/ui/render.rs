use eframe::egui::{self, Color32, RichText};
use grabber_core::{ConsoleLine, LogLevel};

use super::constants::*;

/// Renders console lines, newest at the bottom, keeping the view pinned to the end.
///
/// Only the visible rows are laid out. Lines do not wrap, so every row has
/// the monospace row height.
pub fn console(ui: &mut egui::Ui, lines: &[ConsoleLine]) {
    let row_height = ui.text_style_height(&egui::TextStyle::Monospace);
    egui::ScrollArea::both()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show_rows(ui, row_height, lines.len(), |ui, rows| {
            for line in &lines[rows] {
                let text = RichText::new(line.text.as_str())
                    .monospace()
                    .color(level_color(line.level));
                ui.add(egui::Label::new(text).extend());
            }
        });
}

fn level_color(level: LogLevel) -> Color32 {
    match level {
        LogLevel::Info | LogLevel::Started => TEXT,
        LogLevel::Warning => WARN_TEXT,
        LogLevel::Error | LogLevel::Failed => ERROR_TEXT,
        LogLevel::Finished => SUCCESS_TEXT,
    }
}
