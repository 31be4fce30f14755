//! The update callback, for mutating state each frame. Not for drawing.

use super::*;

/// The app's update callback for updating state.
pub fn update(app: &App, model: &mut Model, _update: Update) {
    model.update(app);
}
