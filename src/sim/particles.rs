//! Score particle bursts
//!
//! Purely cosmetic: particles never feed back into gameplay state.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::settings::Tuning;

/// Spawn a burst of particles at `pos`, evicting the oldest beyond `max_particles`
pub fn burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    max_particles: usize,
    tuning: &Tuning,
) {
    if max_particles == 0 {
        return;
    }
    let spread = tuning.particle_spread;
    for _ in 0..tuning.burst_count {
        if particles.len() >= max_particles {
            // Remove oldest particles to make room
            particles.remove(0);
        }
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        particles.push(Particle {
            pos,
            vel,
            color: tuning.particle_color,
            life: 1.0,
            size: rng.random::<f32>() * tuning.particle_size_range + tuning.particle_min_size,
        });
    }
}

/// Advance particles one tick and drop the dead ones
pub fn update(particles: &mut Vec<Particle>, decay: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= decay;
    }
    particles.retain(|p| p.life > 0.0);
}
