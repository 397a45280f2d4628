use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui};

use super::super::layout::{LayoutEngine, MapStatus, TickOutcome};
use super::super::render_utils::{
    NODE_STROKE_COLOR, bubble_fill, circle_visible, draw_background,
};
use super::super::ViewModel;
use super::super::ui::draw_empty_state;
use super::interaction::hovered_index;

const CENTER_LABEL_SIZE: f32 = 12.0;
const RELATED_LABEL_SIZE: f32 = 10.0;

impl ViewModel {
    /// Draws the bubble map, or the static panel for an empty state.
    pub(in crate::app) fn draw_map(&mut self, ui: &mut Ui, engine: &mut LayoutEngine) {
        match engine.status() {
            MapStatus::Empty => return,
            MapStatus::InvalidAddress => {
                draw_empty_state(
                    ui,
                    "Invalid Wallet Address",
                    "The provided address is not a valid Solana wallet",
                );
                return;
            }
            MapStatus::NoNetworkData => {
                draw_empty_state(
                    ui,
                    "No Network Data",
                    "This wallet has no related accounts to visualize",
                );
                return;
            }
            MapStatus::Running | MapStatus::Settled | MapStatus::Stopped => {}
        }

        let moved = matches!(
            engine.tick(self.generation),
            TickOutcome::Moved | TickOutcome::Settled
        );

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.camera.handle_zoom(ui, rect, &response);
        self.camera.handle_pan(&response);
        draw_background(&painter, rect, self.camera.pan, self.camera.zoom);

        if moved || response.dragged() {
            ui.ctx().request_repaint();
        }

        let Some(nodes) = engine.nodes(self.generation) else {
            return;
        };

        let hovered = hovered_index(self.camera, rect, nodes, response.hover_pos());
        self.selection.pointer_moved(hovered);
        if hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(index) = hovered
        {
            tracing::debug!(node = %nodes[index].id, "bubble clicked");
            self.selection.click(index);
        }

        let zoom = self.camera.zoom;
        for (index, node) in nodes.iter().enumerate() {
            let center = self.camera.to_screen(rect, node.position);
            let radius = node.radius * zoom;
            if !circle_visible(rect, center, radius) {
                continue;
            }

            let emphasized = self.selection.is_emphasized(index);
            let stroke_width = if emphasized { 3.0 } else { 2.0 };
            painter.circle_filled(center, radius, bubble_fill(node.color(), emphasized));
            painter.circle_stroke(
                center,
                radius,
                Stroke::new(stroke_width * zoom, NODE_STROKE_COLOR),
            );

            if let Some(label) = &node.label {
                let size = if node.is_center {
                    CENTER_LABEL_SIZE
                } else {
                    RELATED_LABEL_SIZE
                };
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    label,
                    FontId::proportional(size * zoom),
                    Color32::WHITE,
                );
            }
        }
    }
}
