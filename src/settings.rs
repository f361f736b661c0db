//! Game tuning and player preferences
//!
//! `Tuning` holds every number the simulation reads, `Settings` holds
//! player-facing preferences. Both are plain JSON on disk.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 300,
            QualityPreset::High => 1200,
        }
    }
}

/// Physics, input and scoring numbers
///
/// Units are pixels and ticks (one tick per displayed frame) unless the
/// field name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    pub game_duration_secs: f32,
    /// Hoop starts moving once `time_remaining <= game_duration_secs * hoop_move_fraction`
    pub hoop_move_fraction: f32,

    // === Physics ===
    pub gravity: f32,
    pub friction: f32,
    pub bounce_factor: f32,
    pub rim_restitution: f32,
    pub floor_height_offset: f32,
    pub ball_radius: f32,
    pub ball_ttl_ms: f64,
    pub fall_off_margin: f32,

    // === Throw mapping ===
    pub drag_power_scale: f32,
    pub drag_power_x: f32,
    pub drag_power_y: f32,
    pub max_drag_distance: f32,
    pub min_drag_distance: f32,
    pub capture_radius_factor: f32,

    // === Hoop ===
    pub hoop_y: f32,
    pub hoop_width: f32,
    pub hoop_speed: f32,
    pub hoop_edge_margin: f32,

    // === Scoring ===
    pub base_points: u32,
    pub swish_bonus: u32,
    pub swish_radius: f32,
    pub score_band_depth: f32,
    pub score_rim_inset: f32,
    pub combo_window_ms: f64,

    // === Particles ===
    pub burst_count: usize,
    pub particle_spread: f32,
    pub particle_decay: f32,
    pub particle_min_size: f32,
    pub particle_size_range: f32,
    pub particle_color: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,
            hoop_move_fraction: HOOP_MOVE_FRACTION,

            gravity: GRAVITY,
            friction: FRICTION,
            bounce_factor: BOUNCE_FACTOR,
            rim_restitution: RIM_RESTITUTION,
            floor_height_offset: FLOOR_HEIGHT_OFFSET,
            ball_radius: BALL_RADIUS,
            ball_ttl_ms: BALL_TTL_MS,
            fall_off_margin: FALL_OFF_MARGIN,

            drag_power_scale: DRAG_POWER_SCALE,
            drag_power_x: DRAG_POWER_X,
            drag_power_y: DRAG_POWER_Y,
            max_drag_distance: MAX_DRAG_DISTANCE,
            min_drag_distance: MIN_DRAG_DISTANCE,
            capture_radius_factor: CAPTURE_RADIUS_FACTOR,

            hoop_y: HOOP_Y,
            hoop_width: HOOP_WIDTH,
            hoop_speed: HOOP_SPEED,
            hoop_edge_margin: HOOP_EDGE_MARGIN,

            base_points: BASE_POINTS,
            swish_bonus: SWISH_BONUS,
            swish_radius: SWISH_RADIUS,
            score_band_depth: SCORE_BAND_DEPTH,
            score_rim_inset: SCORE_RIM_INSET,
            combo_window_ms: COMBO_WINDOW_MS,

            burst_count: BURST_COUNT,
            particle_spread: PARTICLE_SPREAD,
            particle_decay: PARTICLE_DECAY,
            particle_min_size: PARTICLE_MIN_SIZE,
            particle_size_range: PARTICLE_SIZE_RANGE,
            particle_color: SCORE_PARTICLE_COLOR,
        }
    }
}

impl Tuning {
    /// Seconds remaining at which the hoop starts patrolling
    pub fn hoop_move_threshold_secs(&self) -> f32 {
        self.game_duration_secs * self.hoop_move_fraction
    }

    /// Pull out-of-range values back into a range the simulation can run with
    pub fn sanitize(&mut self) {
        let before = self.clone();
        self.min_drag_distance = self.min_drag_distance.max(0.0);
        self.max_drag_distance = self.max_drag_distance.max(self.min_drag_distance);
        self.capture_radius_factor = self.capture_radius_factor.max(0.0);
        self.ball_radius = self.ball_radius.max(1.0);
        self.friction = self.friction.clamp(0.0, 1.0);
        self.bounce_factor = self.bounce_factor.clamp(0.0, 1.0);
        self.rim_restitution = self.rim_restitution.clamp(0.0, 1.0);
        self.hoop_move_fraction = self.hoop_move_fraction.clamp(0.0, 1.0);
        self.hoop_width = self.hoop_width.max(0.0);
        self.hoop_speed = self.hoop_speed.max(0.0);
        self.particle_decay = self.particle_decay.max(0.0);
        if *self != before {
            log::warn!("Out-of-range tuning values were clamped");
        }
    }

    /// Load tuning from a JSON file; missing fields keep their defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let mut tuning: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing tuning file {}", path.display()))?;
        tuning.sanitize();
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning if a path is given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path).unwrap_or_else(|e| {
                log::warn!("Using default tuning: {:#}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle bursts on score
    pub particles: bool,
    /// Reduced motion (no particle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle bursts (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.effective_particles() {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings file {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}
