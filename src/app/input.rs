use eframe::egui::{self, Key, Pos2, Rect, Response, Ui};
use node_maker::{Command, InputEvent, PointerButton};

const KEY_COMMANDS: [(Key, Command); 6] = [
    (Key::A, Command::BindPairwise),
    (Key::B, Command::BindToPrimary),
    (Key::Escape, Command::ClearSelection),
    (Key::Delete, Command::RemoveSelected),
    (Key::Backspace, Command::RemoveSelected),
    (Key::Space, Command::TogglePhysics),
];

/// Translates one frame of egui input on the canvas into visualizer events,
/// in canvas-local pixel coordinates.
pub(super) fn collect_events(
    ui: &Ui,
    response: &Response,
    canvas: Rect,
    last_pointer: &mut Option<Pos2>,
) -> Vec<InputEvent> {
    let local = |pos: Pos2| (pos - canvas.min).to_pos2();
    let mut events = Vec::new();

    let pointer = response.hover_pos().map(local);
    if pointer != *last_pointer {
        *last_pointer = pointer;
        events.push(InputEvent::PointerMoved(pointer));
    }

    if response.drag_started_by(egui::PointerButton::Primary)
        && let Some(origin) = ui.input(|input| input.pointer.press_origin())
    {
        events.push(InputEvent::DragStarted(local(origin)));
    }
    if response.dragged_by(egui::PointerButton::Primary)
        && let Some(pos) = response.interact_pointer_pos()
    {
        events.push(InputEvent::Dragged(local(pos)));
    }
    if response.drag_stopped() {
        events.push(InputEvent::DragEnded);
    }

    for (egui_button, button) in [
        (egui::PointerButton::Primary, PointerButton::Primary),
        (egui::PointerButton::Secondary, PointerButton::Secondary),
    ] {
        if response.clicked_by(egui_button)
            && let Some(pos) = response.interact_pointer_pos()
        {
            events.push(InputEvent::Click {
                position: local(pos),
                button,
            });
        }
    }

    ui.input(|input| {
        for (key, command) in KEY_COMMANDS {
            if input.key_pressed(key) {
                events.push(InputEvent::Command(command));
            }
        }
    });

    events
}
