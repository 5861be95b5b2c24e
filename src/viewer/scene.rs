use std::collections::HashMap;

use carousel::constants::{ACTIVE_CLASS, TRANSITION_SECONDS};
use carousel::render::parse_translate_x;
use carousel::{Controls, Document, ElementId, Surface};
use raylib::prelude::*;

use crate::viewer::*;

/// Clickable regions of the current frame.
pub struct Layout {
    regions: Vec<(ElementId, Rectangle)>,
}

impl Layout {
    pub fn hit(&self, point: Vector2) -> Option<ElementId> {
        self.regions
            .iter()
            .find(|(_, rect)| {
                point.x >= rect.x
                    && point.x < rect.x + rect.width
                    && point.y >= rect.y
                    && point.y < rect.y + rect.height
            })
            .map(|(id, _)| *id)
    }

    fn rect(&self, id: ElementId) -> Option<Rectangle> {
        self.regions.iter().find(|(i, _)| *i == id).map(|(_, r)| *r)
    }
}

/// A slide's on-screen offset, easing toward the offset the carousel wrote
/// into its `transform` style.
struct SlideMotion {
    offset: f32,
    target: f32,
    tween: Option<ease::Tween>,
    elapsed: f32,
}

impl SlideMotion {
    fn at(offset: f32) -> Self {
        Self {
            offset,
            target: offset,
            tween: None,
            elapsed: 0.0,
        }
    }

    fn retarget(&mut self, target: f32) {
        if target != self.target {
            self.target = target;
            self.tween = Some(ease::Tween::new(ease::cubic_out, self.offset, target, TRANSITION_SECONDS));
            self.elapsed = 0.0;
        }
    }

    fn update(&mut self, dt: f32) {
        if let Some(tween) = self.tween.as_mut() {
            self.offset = tween.apply(dt);
            self.elapsed += dt;
            if self.elapsed >= TRANSITION_SECONDS {
                self.offset = self.target;
                self.tween = None;
            }
        }
    }
}

/// Draws the carousel markup of a [`Surface`] with raylib.
pub struct Scene {
    slides: Vec<ElementId>,
    controls: Controls,
    motions: Vec<SlideMotion>,
}

impl Scene {
    pub fn new(surface: &Surface, slides: Vec<ElementId>, controls: Controls) -> Self {
        let motions = surface.read(|doc| {
            slides
                .iter()
                .map(|slide| SlideMotion::at(offset_of(doc, *slide)))
                .collect()
        });
        Self {
            slides,
            controls,
            motions,
        }
    }

    pub fn layout(&self, width: f32, height: f32) -> Layout {
        let mut regions = vec![
            (
                self.controls.prev,
                Rectangle::new(BUTTON_INSET, (height - BUTTON_SIZE) * 0.5, BUTTON_SIZE, BUTTON_SIZE),
            ),
            (
                self.controls.next,
                Rectangle::new(
                    width - BUTTON_INSET - BUTTON_SIZE,
                    (height - BUTTON_SIZE) * 0.5,
                    BUTTON_SIZE,
                    BUTTON_SIZE,
                ),
            ),
        ];

        if let Some(pagination) = &self.controls.pagination {
            let count = pagination.indicators.len() as f32;
            let total = count * DOT_SIZE + (count - 1.0).max(0.0) * DOT_SPACING;
            let mut x = (width - total) * 0.5;
            let y = height - DOT_MARGIN - DOT_SIZE;
            for indicator in &pagination.indicators {
                regions.push((*indicator, Rectangle::new(x, y, DOT_SIZE, DOT_SIZE)));
                x += DOT_SIZE + DOT_SPACING;
            }
        }

        Layout { regions }
    }

    /// Picks up offsets written since the last frame and advances the
    /// transitions.
    pub fn update(&mut self, surface: &Surface, dt: f32) {
        surface.read(|doc| {
            for (slide, motion) in self.slides.iter().zip(self.motions.iter_mut()) {
                motion.retarget(offset_of(doc, *slide));
            }
        });
        for motion in &mut self.motions {
            motion.update(dt);
        }
    }

    pub fn draw(
        &self,
        d: &mut RaylibDrawHandle,
        surface: &Surface,
        textures: &HashMap<ElementId, Texture2D>,
        layout: &Layout,
    ) {
        let width = d.get_screen_width() as f32;
        let height = d.get_screen_height() as f32;

        for (slide, motion) in self.slides.iter().zip(&self.motions) {
            // Only the slides overlapping the viewport
            if motion.offset <= -100.0 || motion.offset >= 100.0 {
                continue;
            }
            let Some(texture) = textures.get(slide) else {
                continue;
            };
            draw_fitted(d, texture, width * motion.offset / 100.0, width, height);
        }

        surface.read(|doc| {
            for id in [self.controls.prev, self.controls.next] {
                if let Some(rect) = layout.rect(id) {
                    d.draw_rectangle_rec(rect, Color::new(0, 0, 0, 140));
                    draw_label(d, doc.text(id).unwrap_or_default(), rect, Color::WHITE);
                }
            }

            if let Some(pagination) = &self.controls.pagination {
                for indicator in &pagination.indicators {
                    let Some(rect) = layout.rect(*indicator) else {
                        continue;
                    };
                    let (fill, ink) = if doc.has_class(*indicator, ACTIVE_CLASS) {
                        (Color::WHITE, Color::BLACK)
                    } else {
                        (Color::new(255, 255, 255, 90), Color::WHITE)
                    };
                    let radius = rect.width * 0.5;
                    d.draw_circle((rect.x + radius) as i32, (rect.y + radius) as i32, radius, fill);
                    draw_label(d, doc.text(*indicator).unwrap_or_default(), rect, ink);
                }
            }
        });
    }
}

fn offset_of(doc: &Document, slide: ElementId) -> f32 {
    doc.style(slide, "transform")
        .and_then(parse_translate_x)
        .unwrap_or(0.0)
}

/// Draws `texture` scaled to fit the viewport, shifted horizontally by
/// `shift` pixels.
fn draw_fitted(d: &mut RaylibDrawHandle, texture: &Texture2D, shift: f32, width: f32, height: f32) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (width / tex_width).min(height / tex_height);

    let scaled_width = tex_width * scale;
    let scaled_height = tex_height * scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            shift + (width - scaled_width) * 0.5,
            (height - scaled_height) * 0.5,
            scaled_width,
            scaled_height,
        ),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::WHITE,
    );
}

fn draw_label(d: &mut RaylibDrawHandle, text: &str, rect: Rectangle, color: Color) {
    // Default font glyphs are roughly half as wide as they are tall
    let text_width = text.chars().count() as f32 * FONT_SIZE as f32 * 0.5;
    let x = rect.x + (rect.width - text_width) * 0.5;
    let y = rect.y + (rect.height - FONT_SIZE as f32) * 0.5;
    d.draw_text(text, x as i32, y as i32, FONT_SIZE, color);
}
