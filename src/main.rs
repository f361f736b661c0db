//! Neon Hoops headless host
//!
//! Runs a full timed session at 60 Hz with a scripted thrower, then records
//! the result on the local leaderboard.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use neon_hoops::input::{MouseInput, MouseSession, PointerSession, SurfaceOrigin};
use neon_hoops::sim::SimState;
use neon_hoops::{
    GameClock, HighScores, LoopDriver, QualityPreset, Renderer, ScoreBoard, Settings, Tuning,
};

/// Display refresh the host pretends to run at
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "neon-hoops", about = "Play a scripted Neon Hoops session headlessly")]
struct Args {
    /// RNG seed (particles and thrower jitter)
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Surface width in pixels
    #[arg(long, default_value_t = 480.0)]
    width: f32,
    /// Surface height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,
    /// Session length in seconds (defaults to the tuning value)
    #[arg(long)]
    duration: Option<u32>,
    /// Frames between scripted throws
    #[arg(long, default_value_t = 40)]
    throw_every: u64,
    /// Quality preset (low, medium, high)
    #[arg(long, default_value = "medium")]
    quality: String,
    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Leaderboard JSON file
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Player name for the leaderboard
    #[arg(long, default_value = "")]
    name: String,
}

/// Logs a one-line summary once per second of frames
#[derive(Default)]
struct ConsoleRenderer {
    frames: u64,
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, state: &SimState) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::debug!(
                "frame {}: {} balls in flight, {} particles, hoop at {:.1}",
                self.frames,
                state.balls.len(),
                state.particles.len(),
                state.hoop.x
            );
        }
    }
}

/// Drag the staged ball back roughly toward the hoop, with some jitter
fn scripted_throw(state: &SimState, rng: &mut Pcg32) -> Option<(Vec2, Vec2)> {
    let ball = state.staged.as_ref()?;
    let tuning = &state.tuning;

    let rise = ball.pos.y - state.hoop.y;
    let vy = -(2.0 * tuning.gravity * rise).sqrt() * rng.random_range(1.05f32..1.25);
    let flight_ticks = (-vy / tuning.gravity).max(1.0);
    let vx = (state.hoop.center_x() - ball.pos.x) / flight_ticks * rng.random_range(0.8f32..1.2);

    let pull = Vec2::new(
        vx / (tuning.drag_power_scale * tuning.drag_power_x),
        vy / (tuning.drag_power_scale * tuning.drag_power_y),
    );
    Some((ball.pos, ball.pos - pull))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Neon Hoops (headless) starting, seed {}", args.seed);

    let tuning = Tuning::load_or_default(args.tuning.as_deref());
    let quality = QualityPreset::from_str(&args.quality).unwrap_or_else(|| {
        log::warn!("Unknown quality preset '{}', using Medium", args.quality);
        QualityPreset::Medium
    });
    let settings = Settings::from_preset(quality);
    let duration = args
        .duration
        .unwrap_or(tuning.game_duration_secs.round() as u32);

    let mut state = SimState::new(args.seed, tuning);
    state.max_particles = settings.max_particles();
    let mut driver = LoopDriver::new(state);
    driver.resize(args.width, args.height);

    let mut renderer = ConsoleRenderer::default();
    let mut board = ScoreBoard::new();
    let mut clock = GameClock::new(duration);
    let mut mouse = MouseSession::new(SurfaceOrigin::default());
    let mut rng = Pcg32::seed_from_u64(args.seed ^ 0x5eed);

    clock.start();
    let mut pending = driver.set_active(true, &mut renderer);
    let mut now_ms = 0.0;
    let mut frame: u64 = 0;

    while let Some(handle) = pending {
        now_ms += FRAME_MS;
        frame += 1;

        if clock.advance(FRAME_MS) {
            driver.set_active(false, &mut renderer);
            break;
        }

        if args.throw_every > 0 && frame % args.throw_every == 0 {
            if let Some((from, to)) = scripted_throw(driver.state(), &mut rng) {
                let raw = [
                    MouseInput::Down { client_x: from.x, client_y: from.y },
                    MouseInput::Move { client_x: to.x, client_y: to.y },
                    MouseInput::Up,
                ];
                for event in raw.iter().filter_map(|r| mouse.normalize(r)) {
                    driver.pointer(event, now_ms);
                }
            }
        }

        pending = driver.run_frame(
            handle,
            clock.time_remaining(),
            now_ms,
            &mut renderer,
            &mut board,
        );
    }

    println!(
        "Final score {} | made {}/{} ({:.0}%) | best combo {}",
        board.score,
        board.shots_made,
        board.shots_taken,
        board.accuracy() * 100.0,
        board.max_combo
    );

    if let Some(path) = args.scores {
        let mut scores = HighScores::load_or_default(&path);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or_default();
        match scores.add_score(&args.name, board.score, board.max_combo, timestamp) {
            Some(rank) => println!("Leaderboard rank #{}", rank),
            None => println!("Did not make the leaderboard"),
        }
        scores.save_to(&path).context("saving leaderboard")?;
    }

    Ok(())
}
