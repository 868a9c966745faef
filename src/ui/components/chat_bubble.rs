use eframe::egui;

use crate::chat::{Authorship, Control, Region, Span, Variant, VariantSet, ViewNode};

/// Symbols offered by the reaction trigger.
pub const REACTION_PALETTE: &[&str] = &["👍", "👏", "😂", "😮", "😢", "🎉"];

/// What the user did with a bubble's controls this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BubbleAction {
    React(String),
    CopyText,
    ReplyPrivately,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Normal,
    Strong,
    Weak,
    Hidden,
}

struct BubbleStyle {
    background: egui::Color32,
    radius: egui::CornerRadius,
}

impl BubbleStyle {
    fn for_variants(variants: &VariantSet, dark_mode: bool) -> Self {
        let local = variants.contains(&Variant::Local);
        let radius = if variants.contains(&Variant::Error) {
            egui::CornerRadius::ZERO
        } else if local {
            egui::CornerRadius {
                nw: 12,
                ne: 4,
                sw: 12,
                se: 12,
            }
        } else {
            egui::CornerRadius {
                nw: 4,
                ne: 12,
                sw: 12,
                se: 12,
            }
        };

        let background = if variants.contains(&Variant::Error) {
            egui::Color32::from_rgb(0xcb, 0x20, 0x33)
        } else if variants.contains(&Variant::Private) || variants.contains(&Variant::Lobby) {
            egui::Color32::from_rgb(0x6a, 0x50, 0xd3)
        } else if local {
            if dark_mode {
                egui::Color32::from_rgb(0x3d, 0x3d, 0x3d)
            } else {
                egui::Color32::from_rgb(0xc2, 0xd7, 0xf2)
            }
        } else if dark_mode {
            egui::Color32::from_rgb(0x29, 0x29, 0x29)
        } else {
            egui::Color32::from_rgb(0xe6, 0xe6, 0xe6)
        };

        Self { background, radius }
    }
}

/// Paints one message view tree and reports control clicks.
pub fn render(ui: &mut egui::Ui, node: &ViewNode) -> Vec<BubbleAction> {
    let mut actions = Vec::new();
    paint(ui, node, Tone::Normal, &mut actions);
    actions
}

fn paint(ui: &mut egui::Ui, node: &ViewNode, tone: Tone, actions: &mut Vec<BubbleAction>) {
    match node {
        ViewNode::Message { id, children } => {
            ui.push_id(id, |ui| {
                ui.vertical(|ui| {
                    // Timestamp sits under the row, everything else side by side.
                    ui.horizontal(|ui| {
                        for child in children.iter().filter(|child| !is_timestamp(child)) {
                            paint(ui, child, tone, actions);
                        }
                    });
                    for child in children.iter().filter(|child| is_timestamp(child)) {
                        paint(ui, child, tone, actions);
                    }
                });
            });
        }
        ViewNode::Bubble { variants, children } => {
            let style = BubbleStyle::for_variants(variants, ui.visuals().dark_mode);
            egui::Frame::new()
                .fill(style.background)
                .corner_radius(style.radius)
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for child in children {
                            paint(ui, child, tone, actions);
                        }
                    });
                });
        }
        ViewNode::Region { region, children } => {
            let tone = match region {
                Region::DisplayName => Tone::Strong,
                Region::Notice | Region::Timestamp => Tone::Weak,
                // egui has no visually hidden text; accesskit reads the body.
                Region::AccessibleTitle => Tone::Hidden,
                _ => tone,
            };
            if tone == Tone::Hidden {
                return;
            }
            match region {
                Region::Reactions => {
                    ui.horizontal(|ui| {
                        for child in children {
                            paint(ui, child, tone, actions);
                        }
                    });
                }
                _ => {
                    ui.vertical(|ui| {
                        for child in children {
                            paint(ui, child, tone, actions);
                        }
                    });
                }
            }
        }
        ViewNode::Text { text } => {
            let rich = egui::RichText::new(text);
            let rich = match tone {
                Tone::Strong => rich.strong(),
                Tone::Weak => rich.small().weak(),
                Tone::Normal | Tone::Hidden => rich,
            };
            ui.label(rich);
        }
        ViewNode::Rich { spans } => {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for span in spans {
                    match span {
                        Span::Text { text } => {
                            ui.label(text);
                        }
                        Span::Link { label, url } => {
                            ui.hyperlink_to(label, url);
                        }
                    }
                }
            });
        }
        ViewNode::Control { control } => paint_control(ui, *control, actions),
    }
}

fn paint_control(ui: &mut egui::Ui, control: Control, actions: &mut Vec<BubbleAction>) {
    match control {
        Control::ReactionTrigger => {
            ui.menu_button("☺", |ui| {
                ui.horizontal(|ui| {
                    for symbol in REACTION_PALETTE {
                        if ui.button(*symbol).clicked() {
                            actions.push(BubbleAction::React((*symbol).to_string()));
                            ui.close();
                        }
                    }
                });
            });
        }
        Control::OptionsMenu(scope) => {
            ui.menu_button("⋮", |ui| {
                if ui.button("Copy text").clicked() {
                    actions.push(BubbleAction::CopyText);
                    ui.close();
                }
                if scope == Authorship::Remote && ui.button("Reply privately").clicked() {
                    actions.push(BubbleAction::ReplyPrivately);
                    ui.close();
                }
            });
        }
        Control::Reply => {
            if ui
                .small_button("↩")
                .on_hover_text("Reply privately")
                .clicked()
            {
                actions.push(BubbleAction::ReplyPrivately);
            }
        }
    }
}

fn is_timestamp(node: &ViewNode) -> bool {
    matches!(
        node,
        ViewNode::Region {
            region: Region::Timestamp,
            ..
        }
    )
}
