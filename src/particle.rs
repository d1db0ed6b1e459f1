// Simple particle struct to keep track of individual position, velocity, and size

use crate::config::FieldConfig;
use rand::Rng;
extern crate nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64) -> Particle {
        Particle { pos, vel, radius }
    }

    // Uniform position anywhere on the surface, small drift in any direction
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let radius = config.min_radius + rng.gen::<f64>() * (config.max_radius - config.min_radius);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius)
    }

    /// Moves by one frame of velocity and bounces off the surface edges.
    ///
    /// Only the velocity is reflected. A particle that overshoots an edge stays
    /// outside for a frame and drifts back on the next one.
    pub fn step(&mut self, width: f64, height: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        glm::distance(
            &glm::vec2(self.pos[0], self.pos[1]),
            &glm::vec2(other.pos[0], other.pos[1]),
        )
    }
}
