use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::layout::LayoutNode;
use super::super::render_utils::{screen_to_world, world_to_screen};

pub(in crate::app) const MIN_ZOOM: f32 = 0.5;
pub(in crate::app) const MAX_ZOOM: f32 = 3.0;

/// Pan/zoom transform of the bubble map. Independent of the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Camera {
    pub(in crate::app) pan: Vec2,
    pub(in crate::app) zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Scales by `factor` around `pointer`, keeping the world point under it fixed.
    pub(in crate::app) fn zoom_at(&mut self, rect: Rect, pointer: Pos2, factor: f32) {
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub(in crate::app) fn to_screen(self, rect: Rect, world: Vec2) -> Pos2 {
        world_to_screen(rect, self.pan, self.zoom, world)
    }

    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom_at(rect, pointer, zoom_factor);
    }

    pub(in crate::app) fn handle_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan_by(response.drag_delta());
        }
    }
}

/// Topmost node whose rendered circle contains `pointer`; ties go to the
/// nearest center.
pub(in crate::app) fn hovered_index(
    camera: Camera,
    rect: Rect,
    nodes: &[LayoutNode],
    pointer: Option<Pos2>,
) -> Option<usize> {
    let pointer = pointer?;
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let distance = camera.to_screen(rect, node.position).distance(pointer);
            (distance <= node.radius * camera.zoom).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
