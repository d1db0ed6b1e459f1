//! The particle field: a fixed-size population drifting over a surface, with
//! lines drawn between every pair closer than the connection distance.
//!
//! Connections are found by brute force. Every frame compares each unordered
//! pair once, n(n-1)/2 distance checks, which is fine for the tens to low
//! hundreds of particles a background needs. Larger populations would need a
//! spatial grid.

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

/// Counters for a single rendered frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub pairs_checked: usize,
    pub connections: usize,
}

/// Opacity of the line joining two particles `distance` apart, or `None` when
/// they are too far apart to be connected.
pub fn connection_opacity(distance: f64, threshold: f64, max_opacity: f64) -> Option<f64> {
    if distance < threshold {
        Some((1.0 - distance / threshold) * max_opacity)
    } else {
        None
    }
}

pub struct ParticleField<R = ThreadRng> {
    config: FieldConfig,
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    rng: R,
}

impl ParticleField<ThreadRng> {
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Result<Self, FieldError> {
        ParticleField::with_rng(config, width, height, rand::thread_rng())
    }
}

impl<R: Rng> ParticleField<R> {
    pub fn with_rng(config: FieldConfig, width: u32, height: u32, rng: R) -> Result<Self, FieldError> {
        config.validate()?;
        let mut field = ParticleField {
            particles: Vec::with_capacity(config.particle_count),
            config,
            width,
            height,
            rng,
        };
        field.regenerate();
        info!(
            particles = field.particles.len(),
            width, height, "particle field created"
        );
        Ok(field)
    }

    /// Builds a field around an exact population instead of a random one.
    /// The configured count is replaced by the number of particles given.
    pub fn from_particles(
        mut config: FieldConfig,
        width: u32,
        height: u32,
        particles: Vec<Particle>,
        rng: R,
    ) -> Result<Self, FieldError> {
        config.particle_count = particles.len();
        config.validate()?;
        Ok(ParticleField {
            config,
            width,
            height,
            particles,
            rng,
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Adopts new surface dimensions and throws away the whole population in
    /// favour of a fresh one, even if the size did not change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        let (width, height) = (self.width as f64, self.height as f64);
        self.particles.clear();
        self.particles.reserve(self.config.particle_count);
        for _ in 0..self.config.particle_count {
            let p = Particle::random(&mut self.rng, width, height, &self.config);
            self.particles.push(p);
        }
        debug!(
            particles = self.particles.len(),
            width = self.width,
            height = self.height,
            "population regenerated"
        );
    }

    /// Advances every particle by one frame without drawing anything.
    pub fn update(&mut self) {
        let (width, height) = (self.width as f64, self.height as f64);
        for particle in &mut self.particles {
            particle.step(width, height);
        }
    }

    /// Draws the current state without moving anything.
    pub fn render<S: Surface>(&self, surface: &mut S) -> FrameStats {
        surface.clear(self.width as f64, self.height as f64);
        let mut stats = FrameStats {
            particles: self.particles.len(),
            ..FrameStats::default()
        };
        for i in 0..self.particles.len() {
            self.draw_particle(i, surface, &mut stats);
        }
        stats
    }

    /// One animation frame. Each particle is moved and drawn in turn, then
    /// connected to the particles after it, which have not moved yet this frame.
    pub fn step<S: Surface>(&mut self, surface: &mut S) -> FrameStats {
        let (width, height) = (self.width as f64, self.height as f64);
        surface.clear(width, height);
        let mut stats = FrameStats {
            particles: self.particles.len(),
            ..FrameStats::default()
        };
        for i in 0..self.particles.len() {
            self.particles[i].step(width, height);
            self.draw_particle(i, surface, &mut stats);
        }
        stats
    }

    fn draw_particle<S: Surface>(&self, i: usize, surface: &mut S, stats: &mut FrameStats) {
        let color = self.config.color();
        let particle = &self.particles[i];
        surface.fill_disc(particle.pos, particle.radius, color, self.config.particle_alpha);

        for other in &self.particles[i + 1..] {
            stats.pairs_checked += 1;
            let distance = particle.distance_to(other);
            if let Some(opacity) = connection_opacity(
                distance,
                self.config.connection_distance,
                self.config.max_line_opacity,
            ) {
                surface.stroke_line(particle.pos, other.pos, color, opacity, self.config.line_width);
                stats.connections += 1;
            }
        }
    }
}
