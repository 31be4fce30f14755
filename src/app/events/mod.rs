//! Window event callbacks for the pointer, touch and resizing.

use super::*;

pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.mouse_pressed(app);
    }
}

pub fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.mouse_released(app);
    }
}

pub fn touch(_app: &App, model: &mut Model, touch: TouchEvent) {
    let TouchEvent { id, phase, position } = touch;

    match phase {
        TouchPhase::Started => model.touch_started(id, position.x, position.y),
        TouchPhase::Moved => model.touch_moved(id, position.x, position.y),
        TouchPhase::Ended | TouchPhase::Cancelled => model.touch_ended(id),
    }
}

pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.resized(size.x, size.y);
}
