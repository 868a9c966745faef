use crate::ui::state::AppState;
use eframe::egui;

#[derive(Default)]
pub struct SidebarActions {
    pub viewer_id: Option<String>,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> SidebarActions {
    let mut actions = SidebarActions::default();

    ui.heading("Viewer");
    ui.separator();

    ui.label("View chat as:");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut state.viewer_input);
        if ui.button("Switch").clicked() {
            let viewer_id = state.viewer_input.trim();
            if !viewer_id.is_empty() {
                actions.viewer_id = Some(viewer_id.to_string());
            }
        }
    });

    let mut knocking = state.store.viewer_context().is_knocking_in_lobby;
    if ui.checkbox(&mut knocking, "Knocking in lobby").changed() {
        state.store.set_knocking(knocking);
    }

    ui.separator();
    ui.label("Display:");
    ui.checkbox(&mut state.prefs.show_display_name, "Show display name");
    ui.checkbox(&mut state.prefs.show_timestamp, "Show timestamp");

    ui.separator();
    ui.label("Participants:");

    let viewer_id = state.store.viewer_context().viewer_id;
    for participant in state.store.room().participants() {
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::GREEN, "●");
            if participant == viewer_id {
                ui.label(egui::RichText::new(format!("{participant} (you)")).strong());
            } else {
                ui.label(participant);
            }
        });
    }

    actions
}
