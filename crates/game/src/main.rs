//! Firehawk - headless run of the helicopter firefighting scene.
//!
//! Plays a scripted sequence of key events through the input layer, ticks the
//! scene once per frame and records every display pass into a draw list.

use anyhow::{Context, Result};
use game::{SimConfig, SimState};
use input::{ElementState, InputState, KeyCode};
use renderer::DrawList;

/// (frame, key, pressed) events fed to the input layer.
const SCRIPT: &[(u64, KeyCode, bool)] = &[
    (0, KeyCode::KeyE, true),
    (2, KeyCode::KeyE, false),
    // Toward the lake.
    (90, KeyCode::KeyW, true),
    (150, KeyCode::KeyW, false),
    (300, KeyCode::Space, true),
    (301, KeyCode::Space, false),
    // Bank right toward the forest.
    (520, KeyCode::KeyD, true),
    (537, KeyCode::KeyD, false),
    (540, KeyCode::KeyW, true),
    (740, KeyCode::KeyW, false),
    // Drop and head home.
    (1000, KeyCode::Space, true),
    (1001, KeyCode::Space, false),
];

const REPORT_EVERY: u64 = 250;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::load();
    log::info!(
        "Starting Firehawk: {} frames at {} ms, forest seed {}",
        config.frames,
        config.tick_ms,
        config.forest.seed
    );

    let mut state = SimState::new(&config).context("building scene")?;
    let mut input = InputState::new();
    let mut draws = DrawList::new();
    let mut script = SCRIPT.iter().peekable();

    for frame in 0..config.frames {
        input.begin_frame();
        while let Some(&(_, key, pressed)) = script.next_if(|(at, _, _)| *at <= frame) {
            let element = if pressed {
                ElementState::Pressed
            } else {
                ElementState::Released
            };
            input.process_keyboard(key, element);
        }

        state.tick(config.tick_ms, &input);
        draws.clear();
        state.display(&mut draws);

        if frame % REPORT_EVERY == 0 {
            let heli = state.helicopter();
            log::info!(
                "frame {:>5} {:?} pos ({:.1}, {:.1}, {:.1}) fires {}",
                frame,
                state.flight_state(),
                heli.position.x,
                heli.position.y,
                heli.position.z,
                state.forest().active_fire_count()
            );
        }
    }

    let forest = state.forest();
    log::info!(
        "Done after {:.1}s simulated at {:.0} fps: {:?}, {} draw calls / {} triangles last frame, {} doused, {} extinguished, {} still burning",
        state.time().elapsed_seconds(),
        state.time().fps(),
        state.flight_state(),
        draws.len(),
        draws.triangle_count(),
        state.doused(),
        forest.extinguished_count(),
        forest.active_fire_count()
    );
    Ok(())
}
