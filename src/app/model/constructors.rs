//! App constructors.

use super::*;

/// Builds the app window.
pub fn build_window(app: &App, width: u32, height: u32, title: &str) -> Id {
    app.new_window()
        .size(width, height)
        .resizable(true)
        .msaa_samples(1)
        .key_pressed(keys::key_pressed)
        .key_released(keys::key_released)
        .mouse_pressed(events::mouse_pressed)
        .mouse_released(events::mouse_released)
        .touch(events::touch)
        .resized(events::resized)
        .view(view)
        .title(title)
        .build()
        .expect("failed to build app window!")
}

/// The window size which fits `canvas` with `padding` on every side.
pub fn window_size(canvas: &Canvas, padding: f32) -> (u32, u32) {
    let w = padding.mul_add(2.0, canvas.width).max(1.0);
    let h = padding.mul_add(2.0, canvas.height).max(1.0);

    (w.round() as u32, h.round() as u32)
}
