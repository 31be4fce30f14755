//! The view callback, i.e. "draw loop".

use super::*;

/// The app's view callback (AKA "draw loop").
pub fn view(app: &App, model: &Model, frame: Frame) {
    frame.clear(rgb8(20, 20, 20));
    let draw = &app.draw();

    let rect = frame.rect();
    let window = Canvas::new(rect.w(), rect.h());
    model.draw(draw, &window);

    _ = draw.to_frame(app, &frame);
}
