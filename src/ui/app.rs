use eframe::egui;
use tokio::sync::mpsc;

use crate::chat::Collaborators;
use crate::common::{ChatCommand, StoreEvent};

use super::components::chat_bubble::BubbleAction;
use super::components::{chat_area, input_bar, sidebar};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    collaborators: Collaborators,
    command_sender: mpsc::Sender<ChatCommand>,
    event_receiver: mpsc::Receiver<StoreEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        state: AppState,
        collaborators: Collaborators,
        command_sender: mpsc::Sender<ChatCommand>,
        event_receiver: mpsc::Receiver<StoreEvent>,
    ) -> Self {
        Self {
            state,
            collaborators,
            command_sender,
            event_receiver,
        }
    }

    fn handle_store_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.store.apply(event);
        }
    }

    fn send_command(&mut self, command: ChatCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to room: {err}");
        }
    }

    fn handle_bubble_action(&mut self, ctx: &egui::Context, message_id: String, action: BubbleAction) {
        match action {
            BubbleAction::React(symbol) => {
                self.send_command(ChatCommand::React { message_id, symbol });
            }
            BubbleAction::CopyText => {
                if let Some(message) = self.state.store.message(&message_id) {
                    ctx.copy_text(message.text.clone());
                }
            }
            BubbleAction::ReplyPrivately => self.state.reply_to(&message_id),
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_store_events();

        egui::SidePanel::left("viewer_sidebar")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| {
                let actions = sidebar::render(ui, &mut self.state);
                if let Some(viewer_id) = actions.viewer_id {
                    self.state.switch_viewer(viewer_id);
                }
            });

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            if let Some(text) = input_bar::render(
                ui,
                &mut self.state.input_text,
                &mut self.state.reply_target,
            ) {
                let recipient = self.state.reply_target.clone();
                self.send_command(ChatCommand::SendMessage { text, recipient });
            }
        });

        let clicked = egui::CentralPanel::default()
            .show(ctx, |ui| {
                ui.heading("Chat");
                ui.separator();
                chat_area::render(ui, &self.state, &self.collaborators)
            })
            .inner;

        for (message_id, action) in clicked {
            self.handle_bubble_action(ctx, message_id, action);
        }

        ctx.request_repaint();
    }
}
