use super::*;

pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    let mods = &app.keys.mods;

    match key {
        Key::S if mods.ctrl() || mods.logo() => model.capture(app),
        Key::F1 => model.show_notices = !model.show_notices,

        _ => model.key_pressed(key),
    }
}

pub fn key_released(_app: &App, model: &mut Model, key: Key) {
    model.key_released(key);
}
