// main.rs
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use raylib::prelude::*;

use maze_runner::audio_manager::AudioManager;
use maze_runner::config::{DEFAULT_CONFIG_PATH, GameConfig};
use maze_runner::core::process_events::process_events;
use maze_runner::core::session::GameSession;
use maze_runner::render::framebuffer::Framebuffer;
use maze_runner::render::minimap::render_minimap;
use maze_runner::render::render3d::{Viewport, render_frame};
use maze_runner::render::textures::TextureManager;

const HUD_PADDING: i32 = 20;

fn draw_hud(d: &mut impl RaylibDraw, secs: u64, coins: u32) {
    d.draw_rectangle(HUD_PADDING, HUD_PADDING, 200, 80, Color::new(0, 0, 0, 200));
    d.draw_text(&format!("Time: {secs}s"), HUD_PADDING + 10, HUD_PADDING + 10, 24, Color::WHITE);
    d.draw_text(&format!("Coins: {coins}"), HUD_PADDING + 10, HUD_PADDING + 44, 24, Color::YELLOW);
}

fn draw_banner(d: &mut impl RaylibDraw, secs: u64, width: i32, height: i32) {
    let text = format!("Maze Completed in {secs}s! Press R to restart or Q to quit");
    let size = 30;
    let tw = raylib::core::text::measure_text(&text, size);
    d.draw_text(&text, (width - tw) / 2, (height - size) / 2, size, Color::GREEN);
}

fn run() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = GameConfig::load(&path)?;
    let (w, h) = (config.window.width, config.window.height);

    let (mut window, raylib_thread) = raylib::init()
        .size(w as i32, h as i32)
        .title(&config.window.title)
        .build();
    window.set_target_fps(config.window.target_fps);
    // mouse look needs a captured cursor
    window.disable_cursor();

    let texman = TextureManager::load(&config.render.wall_texture);
    let wall_tex = config.render.textured.then(|| texman.wall());
    let view = Viewport {
        width: w,
        height: h,
        strip_width: config.render.strip_width,
        smoothing: config.render.smoothing,
        textured: config.render.textured,
    };

    let mut framebuffer = Framebuffer::new(w, h);
    let blank = Image::gen_image_color(w as i32, h as i32, Color::BLACK);
    let mut screen = window
        .load_texture_from_image(&raylib_thread, &blank)
        .map_err(|e| format!("could not create screen texture: {e:?}"))?;

    let mut audio = if config.audio.enabled { AudioManager::new() } else { None };
    if let Some(a) = audio.as_mut() {
        a.play_music_loop_auto();
    }

    let mut session = GameSession::new(config.maze.clone(), config.player.clone(), Instant::now())?;

    while !window.window_should_close() {
        let now = Instant::now();
        let input = process_events(&window, session.player.mouse_sens);
        let events = session.update(&input, now)?;
        if events.quit {
            break;
        }
        if let Some(a) = audio.as_mut() {
            a.on_tick(&events, session.player.sprinting);
        }
        if events.completed {
            window.enable_cursor();
        }
        if events.restarted {
            window.disable_cursor();
        }

        framebuffer.clear();
        framebuffer.draw(&render_frame(&session.world, &session.player, &view), wall_tex);
        let minimap = render_minimap(&session.world, &session.player, config.render.minimap_size, w);
        framebuffer.draw(&minimap, None);
        framebuffer.upload_to_texture(&mut screen);

        let secs = session.elapsed(now).as_secs();
        let coins = session.player.coins_collected;
        let completed = session.is_completed();

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&screen, 0, 0, Color::WHITE);
        draw_hud(&mut d, secs, coins);
        if completed {
            draw_banner(&mut d, secs, w as i32, h as i32);
        }
    }
    log::info!("bye");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
