//! The multi-knob control panel.

pub mod knob;

pub use knob::*;

use super::audio::DeviceBridge;
use super::input::{Canvas, PointerSample};
use super::params::{Category, ParameterStore};
use super::Drawable;
use crate::prelude::*;
use nannou::prelude::{pt2, rgb8, Draw, WHITE};

/// A [`ParameterStore`] shown and edited as a panel of knobs.
pub struct KnobPanel {
    store: ParameterStore,
    controller: KnobInteractionController,
    targets: Vec<KnobTarget>,
    width: f32,
}

impl KnobPanel {
    pub fn new(store: ParameterStore, width: f32) -> Self {
        let targets = layout_knobs(&store, width);

        Self {
            store,
            controller: KnobInteractionController::new(),
            targets,
            width,
        }
    }

    pub const fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn targets(&self) -> &[KnobTarget] {
        &self.targets
    }

    pub const fn active(&self) -> Option<usize> {
        self.controller.active()
    }

    /// Feeds one pointer sample to the panel, writing any resulting change
    /// to the store and `device`. Returns the changed parameter's index.
    pub fn tick(
        &mut self,
        sample: PointerSample,
        device: &mut DeviceBridge,
    ) -> Option<usize> {
        let update =
            self.controller.tick(sample, &self.targets, &self.store)?;

        self.store.set(update.index, update.value, device)?;
        Some(update.index)
    }

    /// Pulls initial values from a freshly loaded device.
    pub fn seed_from(&mut self, device: &DeviceBridge) -> usize {
        self.store.seed_from(device)
    }

    pub fn resize(&mut self, width: f32) {
        self.width = width;
        self.targets = layout_knobs(&self.store, width);
    }
}

impl Drawable for KnobPanel {
    fn draw(&self, draw: &Draw, canvas: &Canvas) {
        let column_width = self.width / Category::ALL.len() as f32;
        let body_height = canvas.height - KNOB_PANEL_HEADER;

        let (x, y) =
            canvas.to_window(self.width * 0.5, KNOB_PANEL_HEADER * 0.5);
        draw.rect()
            .x_y(x, y)
            .w_h(self.width, KNOB_PANEL_HEADER)
            .color(rgb8(50, 50, 50));

        for (i, category) in Category::ALL.iter().enumerate() {
            let centre = column_width.mul_add(i as f32, column_width * 0.5);

            let (x, y) = canvas.to_window(
                centre,
                body_height.mul_add(0.5, KNOB_PANEL_HEADER),
            );
            draw.rect()
                .x_y(x, y)
                .w_h(column_width, body_height)
                .color(rgb8(40, 40, 40));

            let (x, y) = canvas.to_window(centre, KNOB_PANEL_HEADER + 30.0);
            draw.text(&category.to_string().to_uppercase())
                .x_y(x, y)
                .w_h(column_width, 24.0)
                .font_size(16)
                .color(rgb8(200, 200, 200));
        }

        for target in &self.targets {
            let Some(param) = self.store.parameter(target.index) else {
                continue;
            };

            let (x, y) = canvas.to_window(target.x, target.y);
            draw.ellipse()
                .x_y(x, y)
                .radius(target.radius)
                .color(rgb8(60, 60, 60))
                .stroke_color(rgb8(100, 100, 100))
                .stroke_weight(2.0);

            let (end_x, end_y) = indicator_end(target, param.value);
            let (end_x, end_y) = canvas.to_window(end_x, end_y);
            draw.line()
                .start(pt2(x, y))
                .end(pt2(end_x, end_y))
                .weight(2.0)
                .color(WHITE);

            let (x, y) = canvas.to_window(target.x, target.y + 40.0);
            draw.text(&param.name)
                .x_y(x, y)
                .w_h(column_width, 20.0)
                .font_size(14)
                .color(rgb8(200, 200, 200));

            let (x, y) = canvas.to_window(target.x, target.y + 60.0);
            draw.text(&format!("{:.2}", param.value))
                .x_y(x, y)
                .w_h(column_width, 20.0)
                .font_size(12)
                .color(rgb8(200, 200, 200));
        }
    }
}
