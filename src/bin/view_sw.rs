//! Interactive viewer for the software raycaster.
//!
//! ```bash
//! cargo run --release -- --width 960 --height 600 --scale 2
//! cargo run --release -- --map level.txt
//! ```
//!
//! W/S or ↑/↓ move, ←/→ turn, A/D strafe, PgUp/PgDn look, Shift run,
//! E opens doors, Esc quits. `RUST_LOG=debug` for more output.

use anyhow::{Context, bail};
use clap::Parser;
use glam::Vec2;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::{
    fs,
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gridcast::{
    config::RenderConfig,
    renderer::{Frame, Renderer, Rgba, Scene, Software},
    sim::{InputCmd, TicRunner, Walker, door_ahead, use_target},
    world::{DoorStates, Legend, Pose, Rgb, TextureAtlas, TileGrid},
};

const DEMO_MAP: &str = "
    1111111111111111
    1000000010000001
    1022200010555001
    1020000040005001
    1020000010005001
    1111131111111141
    1000000010000001
    1066000010000001
    1000000040077001
    1000000010000001
    1111111111111111
";

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Window width in pixels
    #[arg(long, default_value_t = 960)]
    width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Screen columns per ray
    #[arg(long, default_value_t = 2)]
    scale: usize,

    /// Horizontal field of view in degrees
    #[arg(long)]
    fov: Option<f32>,

    /// Text map, one digit per cell (built-in demo when absent)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let opts = Opts::parse();

    // ─────────── config & level ───────────
    let mut cfg = RenderConfig::new(opts.width, opts.height, opts.scale);
    if let Some(deg) = opts.fov {
        cfg = cfg.with_fov(deg.to_radians());
    }
    let renderer = Software::new(cfg).context("bad render settings")?;

    let text = match &opts.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display()))?,
        None => DEMO_MAP.to_owned(),
    };
    let grid = TileGrid::parse(&text, &Legend::default()).context("parsing map")?;
    let mut doors = DoorStates::for_grid(&grid);
    let atlas = TextureAtlas::procedural(cfg.tex_size);
    info!(
        width = grid.width(),
        height = grid.height(),
        textures = atlas.len(),
        "level loaded"
    );

    let Some((sx, sy, _)) = grid.cells().find(|(_, _, t)| t.is_empty()) else {
        bail!("map has no empty cell to start in");
    };
    let mut pose = Pose::new(
        Vec2::new(sx as f32 + 0.5, sy as f32 + 0.5) * cfg.tile_size,
        0.0,
        0.0,
    );

    let mut sim = TicRunner::new();
    let walker = Walker::default();

    let mut frame = Frame::new(&cfg);
    let mut out: Vec<Rgba> = vec![0; cfg.width * cfg.height];

    let mut win = Window::new("gridcast", cfg.width, cfg.height, WindowOptions::default())?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last
    let mut prompt = None;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* --------------- build one InputCmd per frame --------------------- */
        let cmd = read_input(&win);

        if cmd.use_act
            && let Some(cell) = use_target(&pose, &grid, cfg.tile_size)
        {
            let now = sim.now();
            if sim.doors_mut().interact(&grid, &mut doors, cell, now) {
                debug!(?cell, "door triggered");
            }
        }

        // movement is per frame; doors animate on the fixed tic clock
        walker.apply(
            &mut pose,
            &cmd,
            &grid,
            &doors,
            cfg.tile_size,
            cfg.half_height(),
        );
        sim.pump(&grid, &mut doors, pose.grid_pos(cfg.tile_size));

        let ahead = door_ahead(&pose, &grid, &doors, cfg.tile_size);
        if ahead != prompt {
            prompt = ahead;
            win.set_title(if prompt.is_some() {
                "gridcast  [E] open door"
            } else {
                "gridcast"
            });
        }

        /* draw */
        let t0 = Instant::now(); // ┌─ frame timer start
        renderer.render(&pose, &Scene::new(&grid, &doors, &atlas), &mut frame);
        draw_crosshair(&mut frame, prompt.is_some());
        acc_time += t0.elapsed();
        acc_frames += 1;

        frame.present(&mut out);
        win.update_with_buffer(&out, cfg.width, cfg.height)?;

        // ─────────── report every ~3 s ────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!(
                avg_ms,
                fps = 1000.0 / avg_ms,
                doors_active = sim.doors().active(),
                "avg render"
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

fn read_input(win: &Window) -> InputCmd {
    let mut cmd = InputCmd::default();

    /* movement --------------------------------------------------------- */
    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        cmd.forward += 1.0;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        cmd.forward -= 1.0;
    }
    if win.is_key_down(Key::A) {
        cmd.strafe -= 1.0;
    }
    if win.is_key_down(Key::D) {
        cmd.strafe += 1.0;
    }

    /* view ------------------------------------------------------------- */
    if win.is_key_down(Key::Left) {
        cmd.turn -= 1.0;
    }
    if win.is_key_down(Key::Right) {
        cmd.turn += 1.0;
    }
    if win.is_key_down(Key::PageUp) {
        cmd.look += 1.0;
    }
    if win.is_key_down(Key::PageDown) {
        cmd.look -= 1.0;
    }

    /* modifiers & actions --------------------------------------------- */
    cmd.run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
    cmd.use_act = win.is_key_pressed(Key::E, KeyRepeat::No); // edge-trigger
    cmd
}

/// Small plus sign in the screen centre; yellow when a door is in reach.
fn draw_crosshair(frame: &mut Frame, highlight: bool) {
    const ARM: usize = 4;
    let colour: Rgb = if highlight { [255, 220, 0] } else { [200, 200, 200] };
    let (w, h) = (frame.width(), frame.height());
    if w <= 2 * ARM || h <= 2 * ARM {
        return;
    }
    let (cx, cy) = (w / 2, h / 2);
    let px = frame.color_mut();
    for d in 0..=2 * ARM {
        px[cy * w + cx - ARM + d] = colour;
        px[(cy - ARM + d) * w + cx] = colour;
    }
}
