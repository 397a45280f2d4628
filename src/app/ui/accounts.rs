use chrono::Utc;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::util::{format_address, format_relative_time};
use crate::wallet::{FlowDirection, RelatedAccount, TransactionType};

use super::super::ViewModel;
use super::super::layout::related_node_index;
use super::details::{copy_button, explorer_link};

const GREEN: Color32 = Color32::from_rgb(0x10, 0xB9, 0x81);
const RED: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);
const BLUE: Color32 = Color32::from_rgb(0x06, 0xB6, 0xD4);
const GRAY: Color32 = Color32::from_rgb(0x9C, 0xA3, 0xAF);

fn type_color(kind: &TransactionType) -> Color32 {
    match kind {
        TransactionType::SolInflow => GREEN,
        TransactionType::SolOutflow => RED,
        TransactionType::TokenTransfer => BLUE,
        TransactionType::Other(_) => GRAY,
    }
}

fn flow_text(account: &RelatedAccount) -> RichText {
    let amount = account.flow_amount_text();
    let text = match account.flow() {
        FlowDirection::Inflow => RichText::new(format!("↙ {amount}")).color(GREEN),
        FlowDirection::Outflow => RichText::new(format!("↗ {amount}")).color(RED),
        FlowDirection::Zero => RichText::new(amount).color(GRAY),
    };
    text.monospace()
}

fn stat(ui: &mut Ui, label: &str, value: impl ToString) {
    ui.vertical(|ui| {
        ui.label(RichText::new(value.to_string()).strong().size(16.0));
        ui.small(label);
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_accounts(&mut self, ui: &mut Ui, has_nodes: bool) {
        self.draw_wallet_header(ui);
        ui.separator();

        let summary = self.snapshot.summary();
        ui.label(RichText::new("Network Summary").strong());
        egui::Grid::new("network_summary")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                ui.label("Total Interactions");
                ui.label(summary.interactions.to_string());
                ui.end_row();
                ui.label("Token Interactions");
                ui.label(summary.token_interactions.to_string());
                ui.end_row();
                ui.label("Receivers");
                ui.label(RichText::new(summary.receivers.to_string()).color(GREEN));
                ui.end_row();
                ui.label("Senders");
                ui.label(RichText::new(summary.senders.to_string()).color(RED));
                ui.end_row();
            });
        ui.separator();

        ui.label(
            RichText::new(format!(
                "Related Accounts ({})",
                self.snapshot.related_accounts.len()
            ))
            .strong(),
        );
        if self.snapshot.related_accounts.is_empty() {
            ui.label(RichText::new("No related accounts found.").weak());
            return;
        }

        let now = Utc::now();
        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("related_accounts_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, account) in self.snapshot.related_accounts.iter().enumerate() {
                    let node_index = related_node_index(index);
                    let is_selected = has_nodes && self.selection.selected() == Some(node_index);

                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            let title =
                                RichText::new(format_address(&account.address, 6)).monospace();
                            let row = ui
                                .selectable_label(is_selected, title)
                                .on_hover_text(account.address.as_str());
                            if row.clicked() && has_nodes {
                                clicked = Some(node_index);
                            }
                            copy_button(ui, &mut self.copy_feedback, &account.address);
                            explorer_link(ui, &account.address);
                        });

                        ui.horizontal_wrapped(|ui| {
                            for kind in &account.transaction_types {
                                ui.label(
                                    RichText::new(kind.label()).small().color(type_color(kind)),
                                );
                            }
                        });

                        ui.horizontal(|ui| {
                            ui.label(format!("{} tx", account.transaction_count));
                            ui.separator();
                            ui.label(flow_text(account));
                            ui.separator();
                            ui.label(
                                RichText::new(format!(
                                    "{} tokens",
                                    account.total_token_interactions
                                ))
                                .color(BLUE),
                            );
                            if let Some(last) = &account.last_interaction {
                                ui.separator();
                                ui.label(RichText::new(format_relative_time(last, now)).weak());
                            }
                        });
                    });
                }
            });

        if let Some(node_index) = clicked {
            self.selection.click(node_index);
        }
    }

    fn draw_wallet_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Wallet Analysis");
            let (badge, color) = if self.snapshot.is_valid {
                ("Valid", GREEN)
            } else {
                ("Invalid", RED)
            };
            ui.label(RichText::new(badge).small().strong().color(color));
        });

        ui.horizontal(|ui| {
            ui.label(RichText::new(format_address(&self.snapshot.address, 6)).monospace())
                .on_hover_text(self.snapshot.address.as_str());
            copy_button(ui, &mut self.copy_feedback, &self.snapshot.address);
            explorer_link(ui, &self.snapshot.address);
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            stat(ui, "Total Transactions", self.snapshot.total_transactions);
            ui.add_space(12.0);
            stat(ui, "Analyzed", self.snapshot.sampled_transactions);
            ui.add_space(12.0);
            stat(ui, "Connected Accounts", self.snapshot.related_accounts.len());
        });
    }
}
