use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use carousel::cli::Args;
use carousel::{Carousel, Document, Event, Surface, TimerQueue};
use clap::Parser;
use rand::seq::SliceRandom;
use raylib::prelude::*;
use tracing_subscriber::EnvFilter;

mod viewer;

use crate::viewer::scene::Scene;
use crate::viewer::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};
use crate::viewer::{FPS, HOST_SELECTOR, SLIDE_SELECTOR};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut image_paths = load_sorted_image_paths(&args.image_dir)?;
    if args.shuffle {
        image_paths.shuffle(&mut rand::rng());
    }

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Build the host markup, one slide per decoded image ---
    let mut document = Document::new();
    let host = document.create_element_with("div", &[("id", "carousel")], None);
    document.append_child(document.root(), host);

    let mut textures = HashMap::new();
    for path in &image_paths {
        match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => {
                let src = path.display().to_string();
                let slide = document.create_element_with(
                    "div",
                    &[("class", "slide"), ("data-src", src.as_str())],
                    None,
                );
                document.append_child(host, slide);
                textures.insert(slide, texture);
            }
            Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
        }
    }
    if textures.is_empty() {
        bail!("none of the images in {} could be loaded", args.image_dir.display());
    }

    let surface = Surface::new(document);
    let clock = Rc::new(TimerQueue::new());
    let carousel = Carousel::new(
        &surface,
        clock.clone(),
        args.carousel_config(HOST_SELECTOR, SLIDE_SELECTOR),
    )
    .context("failed to set up the carousel")?;
    carousel.create();
    let controls = carousel.controls().context("carousel has no controls after create()")?;

    let mut scene = Scene::new(&surface, carousel.slides(), controls);
    let mut hovering = false;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        clock.advance(Duration::from_secs_f32(dt));

        let width = rl.get_screen_width() as f32;
        let height = rl.get_screen_height() as f32;
        let layout = scene.layout(width, height);

        // The whole window is the host element
        let on_screen = rl.is_cursor_on_screen();
        if on_screen != hovering {
            hovering = on_screen;
            let mut event = if hovering {
                Event::pointer_enter(host)
            } else {
                Event::pointer_leave(host)
            };
            surface.dispatch(&mut event);
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(target) = layout.hit(rl.get_mouse_position()) {
                surface.dispatch(&mut Event::click(target));
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            surface.dispatch(&mut Event::key_down(host, "ArrowLeft"));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            surface.dispatch(&mut Event::key_down(host, "ArrowRight"));
        }

        scene.update(&surface, dt);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        scene.draw(&mut d, &surface, &textures, &layout);
    }

    carousel.destroy();
    Ok(())
}
