//! Kung-Fu Arcade - headless native runner
//!
//! Drives the simulation with the demo autopilot for a bounded number of
//! frames, forwarding audio requests to a logging backend, and saves the
//! session on exit.
//!
//! Usage: `kungfu-arcade [frames] [settings.json]`

use std::path::PathBuf;

use kungfu_arcade::audio::{AudioManager, LogBackend, MAIN_MUSIC, SoundEffect};
use kungfu_arcade::persistence::{load_session, save_session};
use kungfu_arcade::platform::{Autopilot, KeyboardState};
use kungfu_arcade::sim::{GamePhase, GameState, Keys, tick};
use kungfu_arcade::{Settings, Tuning};

/// Default run length: one minute of play at 60 fps
const DEFAULT_FRAMES: u64 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Kung-Fu Arcade (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames = match args.next().map(|a| a.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Ignoring frame count argument: {e}");
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));

    let settings = Settings::load(&settings_path);
    let tuning = Tuning::load_or_default(settings.tuning_file.as_deref());

    let assets = SoundEffect::ALL
        .iter()
        .map(|s| s.name())
        .chain(std::iter::once(MAIN_MUSIC));
    let mut audio = match AudioManager::new(LogBackend, assets) {
        Ok(audio) => audio,
        Err(e) => {
            log::error!("Audio setup failed: {e}");
            std::process::exit(1);
        }
    };
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    audio.set_muted(settings.muted);

    let mut state = GameState::with_tuning(settings.seed, tuning);
    if let Err(e) = load_session(&mut state, &settings.save_file) {
        log::warn!("No session restored from {}: {e}", settings.save_file.display());
    }

    let pilot = Autopilot::new(Some(state.frame + frames));
    let mut keys = KeyboardState::default();
    let mut last_phase = state.session.phase;

    loop {
        let input = keys.update(pilot.keys(&state));
        if input.is_down(Keys::QUIT) {
            log::info!("Quit after {} frames", state.frame);
            break;
        }

        tick(&mut state, &input);
        for event in state.drain_events() {
            audio.handle(&event);
        }

        // Auto-save when a stage card comes up
        let phase = state.session.phase;
        if phase != last_phase {
            if phase == GamePhase::Preview {
                if let Err(e) = save_session(&state, &settings.save_file) {
                    log::warn!("Auto-save failed: {e}");
                }
            }
            last_phase = phase;
        }
    }

    if let Err(e) = save_session(&state, &settings.save_file) {
        log::warn!("Save failed: {e}");
    }
    println!(
        "level {} | score {} | lives {} | phase {:?}",
        state.session.level, state.session.score, state.session.lives, state.session.phase
    );
}
