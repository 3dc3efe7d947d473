use egui::{Align, Color32, CornerRadius, Frame, Layout, Margin, RichText, ScrollArea, Sense};

use super::state::BoardView;
use super::{BoardApp, palette};

const CARD_CORNER_RADIUS: u8 = 6;
const CARD_SPACING: f32 = 6.;
const ERROR_COLOR: Color32 = Color32::from_rgb(0xd4, 0x35, 0x2d);

impl BoardApp {
    pub(crate) fn board_view(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls")
            .min_height(36.)
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    ui.add_space(4.);
                    let loading = self.state.is_loading();
                    let label = if loading { "Loading..." } else { "Refresh status" };
                    // Disabled while a refresh is in flight, so a second
                    // manual trigger cannot exist alongside the first.
                    if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                        self.request_refresh();
                    }
                    if loading {
                        ui.spinner();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.add_space(4.);
                        if let Some(stamp) = self.state.last_updated {
                            ui.label(
                                RichText::new(format!("updated {}", stamp.format("%H:%M:%S")))
                                    .weak(),
                            );
                        }
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.state.view {
            BoardView::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.label("Loading line status...");
                });
            }
            BoardView::Failed(message) => {
                ui.add_space(8.);
                ui.label(RichText::new(message.as_str()).color(ERROR_COLOR));
            }
            BoardView::Lines(cards) => {
                ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(CARD_SPACING);
                    for card in cards.iter_mut() {
                        let text_color = palette::header_text_color(card.color);
                        let response = Frame::new()
                            .fill(card.color)
                            .corner_radius(CornerRadius::same(CARD_CORNER_RADIUS))
                            .inner_margin(Margin::same(8))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                                    ui.label(
                                        RichText::new(&card.name).color(text_color).strong(),
                                    );
                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                        ui.label(
                                            RichText::new(card.toggle_label())
                                                .color(text_color)
                                                .small(),
                                        );
                                    });
                                });
                                if card.expanded {
                                    ui.add_space(4.);
                                    ui.label(RichText::new(&card.status).color(text_color));
                                    if let Some(reason) = &card.reason {
                                        ui.label(
                                            RichText::new(reason).color(text_color).small(),
                                        );
                                    }
                                }
                            })
                            .response;
                        if response.interact(Sense::click()).clicked() {
                            card.toggle();
                        }
                        ui.add_space(CARD_SPACING);
                    }
                });
            }
        });
    }
}
