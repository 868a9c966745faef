use eframe::egui;

use crate::common::Recipient;

/// Returns the text to send. Clearing the private target is handled here.
pub fn render(
    ui: &mut egui::Ui,
    input_text: &mut String,
    reply_target: &mut Option<Recipient>,
) -> Option<String> {
    if let Some(target) = reply_target.clone() {
        ui.horizontal(|ui| {
            let label = format!("Private message to {}", target.display_name);
            ui.label(egui::RichText::new(label).weak());
            if ui.small_button("✕").clicked() {
                *reply_target = None;
            }
        });
    }

    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.text_edit_singleline(input_text);
        if ui.button("Send").clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    if send && !input_text.trim().is_empty() {
        let message = input_text.clone();
        input_text.clear();
        return Some(message);
    }

    None
}
