use eframe::egui;

use crate::chat::{Collaborators, render_message};
use crate::ui::state::AppState;

use super::chat_bubble::{self, BubbleAction};

/// Renders the history; returns `(message_id, action)` for every click.
pub fn render(
    ui: &mut egui::Ui,
    state: &AppState,
    collaborators: &Collaborators,
) -> Vec<(String, BubbleAction)> {
    let mut clicked = Vec::new();
    let viewer = state.store.viewer_context();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.store.messages().is_empty() {
                ui.label(egui::RichText::new("No messages yet").weak());
                return;
            }

            for message in state.store.messages() {
                let node = render_message(
                    message,
                    &viewer,
                    state.store.room(),
                    state.prefs,
                    collaborators,
                );
                for action in chat_bubble::render(ui, &node) {
                    clicked.push((message.message_id.clone(), action));
                }
                ui.add_space(8.0);
            }
        });

    clicked
}
