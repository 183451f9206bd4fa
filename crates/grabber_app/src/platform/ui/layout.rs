use eframe::egui::{self, RichText};
use grabber_core::{AppViewModel, Msg};

use super::constants::*;
use super::render;

/// Dark palette shared by every card.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG;
    visuals.extreme_bg_color = CARD;
    visuals.override_text_color = Some(TEXT);
    visuals.selection.bg_fill = ACCENT_HOVER;
    ctx.set_visuals(visuals);
    ctx.style_mut(|style| {
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::monospace(CONSOLE_FONT_SIZE),
        );
    });
}

/// Draws the whole window and returns the messages produced by user input.
///
/// `url` and `destination` are the text buffers backing the two fields.
pub fn show(
    ctx: &egui::Context,
    view: &AppViewModel,
    url: &mut String,
    destination: &mut String,
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(BG).inner_margin(egui::Margin::same(24)))
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(CARD)
                .corner_radius(egui::CornerRadius::same(22))
                .inner_margin(egui::Margin::symmetric(20, 12))
                .show(ui, |ui| {
                    ui.set_min_size(ui.available_size());
                    ui.vertical_centered(|ui| {
                        ui.add_space(6.0);
                        ui.label(RichText::new(HEADING).size(22.0).strong().color(TEXT));
                        ui.add_space(10.0);
                    });

                    url_card(ui, url, &mut msgs);
                    ui.add_space(10.0);
                    output_card(ui, destination, &mut msgs);
                    ui.add_space(10.0);
                    console_card(ui, view);
                });
        });

    msgs
}

fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG)
        .stroke(egui::Stroke::new(1.0, SECONDARY))
        .corner_radius(egui::CornerRadius::same(16))
        .inner_margin(egui::Margin::same(14))
}

fn card_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).strong().color(SECONDARY));
    ui.add_space(6.0);
}

fn text_field<'t>(text: &'t mut String, hint: &str) -> egui::TextEdit<'t> {
    egui::TextEdit::singleline(text)
        .hint_text(hint)
        .text_color(TEXT)
        .background_color(CARD)
        .vertical_align(egui::Align::Center)
}

fn url_card(ui: &mut egui::Ui, url: &mut String, msgs: &mut Vec<Msg>) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        card_label(ui, URL_LABEL);
        let response = ui.add_sized(
            [ui.available_width(), FIELD_HEIGHT],
            text_field(url, URL_HINT),
        );
        if response.changed() {
            msgs.push(Msg::UrlEdited(url.clone()));
        }
    });
}

fn output_card(ui: &mut egui::Ui, destination: &mut String, msgs: &mut Vec<Msg>) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        card_label(ui, OUTPUT_LABEL);

        ui.horizontal(|ui| {
            let spacing = ui.spacing().item_spacing.x + 10.0;
            let field_width = (ui.available_width() - BROWSE_WIDTH - spacing).max(0.0);
            let response = ui.add_sized(
                [field_width, FIELD_HEIGHT],
                text_field(destination, DESTINATION_HINT),
            );
            if response.changed() {
                msgs.push(Msg::DestinationEdited(destination.clone()));
            }
            ui.add_space(10.0);
            let browse = styled_button(
                ui,
                RichText::new("📁").color(TEXT),
                SECONDARY,
                SECONDARY_HOVER,
                [BROWSE_WIDTH, FIELD_HEIGHT],
            );
            if browse.on_hover_text("Choose destination folder").clicked() {
                msgs.push(Msg::BrowseClicked);
            }
        });

        ui.add_space(12.0);
        let download = styled_button(
            ui,
            RichText::new("Download").strong().color(CARD),
            ACCENT,
            ACCENT_HOVER,
            [ui.available_width(), BUTTON_HEIGHT],
        );
        if download.clicked() {
            msgs.push(Msg::DownloadClicked);
        }
    });
}

fn console_card(ui: &mut egui::Ui, view: &AppViewModel) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.set_min_height(ui.available_height());
        card_label(ui, CONSOLE_LABEL);
        egui::Frame::new()
            .fill(CARD)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.set_min_height(ui.available_height());
                render::console(ui, view.console.lines());
            });
    });
}

/// Button with separate idle and hover fills. `Button::fill` applies to every
/// interaction state, so the colours go through scoped widget visuals.
fn styled_button(
    ui: &mut egui::Ui,
    text: RichText,
    fill: egui::Color32,
    hover: egui::Color32,
    size: [f32; 2],
) -> egui::Response {
    ui.scope(|ui| {
        let widgets = &mut ui.visuals_mut().widgets;
        widgets.inactive.weak_bg_fill = fill;
        widgets.hovered.weak_bg_fill = hover;
        widgets.active.weak_bg_fill = hover;
        widgets.inactive.corner_radius = egui::CornerRadius::same(8);
        widgets.hovered.corner_radius = egui::CornerRadius::same(8);
        widgets.active.corner_radius = egui::CornerRadius::same(8);
        ui.add_sized(size, egui::Button::new(text))
    })
    .inner
}
