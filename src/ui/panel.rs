//! The playground control panel
//!
//! The panel never touches the scene itself: it reports what the user clicked
//! as [`Command`]s for the controller to apply.

use crate::{
    controller::{Command, ShapeKind},
    palette::NamedColor,
};

/// Button label and the shape it spawns, in panel order
pub const SHAPE_BUTTONS: [(&str, ShapeKind); 6] = [
    ("Plane", ShapeKind::Plane),
    ("Box", ShapeKind::Box),
    ("Cylinder", ShapeKind::Cylinder),
    ("Cone", ShapeKind::Cone),
    ("Torus", ShapeKind::Torus),
    ("Room", ShapeKind::Room),
];

/// What the panel shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub background: NamedColor,
    pub object_count_label: String,
}

/// Draws the control panel and returns the commands the user issued
pub fn playground_panel(ui: &imgui::Ui, state: &PanelState) -> Vec<Command> {
    let mut commands = Vec::new();

    ui.window("Playground")
        .position([16.0, 16.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            for (label, kind) in SHAPE_BUTTONS {
                if ui.button(label) {
                    commands.push(Command::AddShape(kind));
                }
            }

            ui.separator();
            if ui.button("Clear") {
                commands.push(Command::Clear);
            }

            ui.separator();
            let names: Vec<&str> = NamedColor::ALL.iter().map(|color| color.name()).collect();
            let mut selected = state.background.index();
            if ui.combo_simple_string("Background", &mut selected, &names) {
                if let Some(&color) = NamedColor::ALL.get(selected) {
                    commands.push(Command::SetBackground(color));
                }
            }

            ui.separator();
            ui.text(&state.object_count_label);
        });

    commands
}
