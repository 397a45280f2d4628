use eframe::egui::{self, Ui};

/// Address bar shown in every state. Returns the trimmed address when the user
/// submits with Enter or the button.
pub(in crate::app) fn draw_address_bar(
    ui: &mut Ui,
    address: &mut String,
    is_loading: bool,
) -> Option<String> {
    let mut submitted = None;

    ui.horizontal(|ui| {
        ui.heading("Solana Bubble Map");
        ui.separator();

        let edit = ui.add_enabled(
            !is_loading,
            egui::TextEdit::singleline(address)
                .hint_text("Enter Solana wallet address...")
                .font(egui::TextStyle::Monospace)
                .desired_width(480.0),
        );
        let enter_pressed =
            edit.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

        let enabled = can_submit(address, is_loading);
        let label = if is_loading { "Analyzing..." } else { "Analyze" };
        let button = ui.add_enabled(enabled, egui::Button::new(label));
        if is_loading {
            ui.spinner();
        }

        if enabled && (enter_pressed || button.clicked()) {
            submitted = Some(address.trim().to_owned());
        }
    });

    submitted
}

fn can_submit(address: &str, is_loading: bool) -> bool {
    !is_loading && !address.trim().is_empty()
}
