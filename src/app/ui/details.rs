use std::time::Duration;

use eframe::egui::{self, RichText, Ui};

use crate::util::{explorer_url, format_address, format_sol};

use super::super::ViewModel;
use super::super::layout::{LayoutEngine, LayoutNode};
use super::super::selection::CopyFeedback;

/// Copy button that shows a check mark for a couple of seconds after use.
/// Feedback is keyed by address, so every copy button for the same address
/// confirms together.
pub(super) fn copy_button(ui: &mut Ui, feedback: &mut CopyFeedback, address: &str) {
    let now = ui.input(|input| input.time);
    let label = if feedback.is_active(address, now) {
        "✓"
    } else {
        "Copy"
    };

    if ui.small_button(label).on_hover_text("Copy address").clicked() {
        ui.ctx().copy_text(address.to_owned());
        tracing::debug!(address, "copied address to clipboard");
        feedback.mark(address, now);
    }

    if let Some(remaining) = feedback.remaining(address, now) {
        ui.ctx()
            .request_repaint_after(Duration::from_secs_f64(remaining));
    }
}

pub(super) fn explorer_link(ui: &mut Ui, address: &str) {
    ui.hyperlink_to("Explorer ↗", explorer_url(address))
        .on_hover_text("Open in Solana Explorer");
}

fn role(node: &LayoutNode) -> &'static str {
    if node.is_center {
        "Main Address"
    } else {
        "Connected Address"
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui, engine: &LayoutEngine) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(nodes) = engine.nodes(self.generation) else {
            ui.label(RichText::new("No bubble map for this wallet.").weak());
            return;
        };

        let Some(node) = self.selection.selected().and_then(|index| nodes.get(index)) else {
            ui.label("Hover or click a bubble to inspect it.");
            return;
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(role(node)).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                explorer_link(ui, &node.address);
                copy_button(ui, &mut self.copy_feedback, &node.address);
            });
        });
        ui.add_space(4.0);
        ui.label(RichText::new(node.address.as_str()).monospace().small());
        ui.separator();

        egui::Grid::new("selection_details")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Address").weak());
                ui.label(RichText::new(format_address(&node.address, 4)).monospace());
                ui.end_row();

                ui.label(RichText::new("SOL Volume").weak());
                if node.is_center {
                    ui.label("Queried wallet");
                } else {
                    ui.label(RichText::new(format_sol(node.weight)).strong());
                }
                ui.end_row();

                if let Some(account) = node
                    .account_index
                    .and_then(|index| self.snapshot.related_accounts.get(index))
                {
                    ui.label(RichText::new("Transactions").weak());
                    ui.label(account.transaction_count.to_string());
                    ui.end_row();
                }
            });
    }
}
