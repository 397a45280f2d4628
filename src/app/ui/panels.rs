use eframe::egui::{self, Color32, Context, RichText, Sense, Ui, vec2};

use crate::wallet::WalletSnapshot;

use super::super::ViewModel;
use super::super::graph::Camera;
use super::super::layout::{CENTER_COLOR, LayoutEngine, VolumeBucket};
use super::super::selection::{CopyFeedback, Selection};

impl ViewModel {
    pub(in crate::app) fn new(snapshot: WalletSnapshot, engine: &mut LayoutEngine) -> Self {
        let generation = engine.load(&snapshot);
        Self {
            snapshot,
            generation,
            camera: Camera::default(),
            selection: Selection::default(),
            copy_feedback: CopyFeedback::default(),
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, engine: &mut LayoutEngine) {
        let has_nodes = engine.nodes(self.generation).is_some();

        egui::SidePanel::left("related_accounts")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| self.draw_accounts(ui, has_nodes));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui, engine));

        if has_nodes {
            egui::TopBottomPanel::bottom("legend")
                .resizable(false)
                .show(ctx, draw_legend);
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_map(ui, engine));
    }
}

fn legend_swatch(ui: &mut Ui, color: Color32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 6.0, color);
    ui.label(label);
    ui.add_space(8.0);
}

fn draw_legend(ui: &mut Ui) {
    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        legend_swatch(ui, CENTER_COLOR, "Main address");
        for bucket in VolumeBucket::ALL {
            legend_swatch(ui, bucket.color(), bucket.legend());
        }
    });
    ui.vertical_centered(|ui| {
        ui.small("Bubble size represents SOL volume • Click and drag to pan • Scroll to zoom");
    });
    ui.add_space(4.0);
}

pub(in crate::app) fn draw_empty_state(ui: &mut Ui, title: &str, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.heading(title);
        ui.add_space(6.0);
        ui.label(RichText::new(message).weak());
    });
}

pub(in crate::app) fn draw_instructions(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.heading("How it works");
        ui.add_space(6.0);
        ui.label("Enter a Solana address to visualize its network connections.");
        ui.label("Bubble sizes represent SOL volumes, colors indicate volume ranges.");
    });
}

pub(in crate::app) fn draw_loading(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.heading("Mapping address network...");
        ui.add_space(8.0);
        ui.spinner();
    });
}

/// Returns `true` when the user asks to retry.
pub(in crate::app) fn draw_error(ui: &mut Ui, source: &str, message: &str) -> bool {
    ui.heading("Failed to analyze wallet");
    ui.add_space(6.0);
    ui.label(RichText::new(source).monospace());
    ui.label(RichText::new(message).color(Color32::from_rgb(0xEF, 0x44, 0x44)));
    ui.add_space(10.0);
    ui.button("Retry").clicked()
}
