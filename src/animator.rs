// The particle field: owns the particles and the surface they are painted on,
// spawns particles from ambient seeding and pointer movement, and advances and
// paints everything once per frame.

use crate::color::Color;
use crate::config::{FieldConfig, MAX_BATCH};
use crate::error::SurfaceError;
use crate::particle::Particle;
use crate::surface::{Paint, Rect, Size, Surface};
use glm::DVec2;
use rand::Rng;
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created, no surface attached yet. Events and frames are ignored.
    Idle,
    Running,
    /// Torn down; nothing will ever be drawn again.
    Stopped,
}

pub struct Animator<S, R> {
    config: FieldConfig,
    rng: R,
    surface: Option<S>,
    particles: Vec<Particle>,
    pointer: Option<DVec2>,
    phase: Phase,
}

impl<S: Surface, R: Rng> Animator<S, R> {
    pub fn new(config: FieldConfig, rng: R) -> Self {
        Animator {
            config,
            rng,
            surface: None,
            particles: Vec::new(),
            pointer: None,
            phase: Phase::Idle,
        }
    }

    /// Attaches the surface and scatters the ambient particles over it.
    /// Without a surface this does nothing and the animator stays idle.
    /// Returns whether the animator is running afterwards.
    pub fn init(&mut self, surface: Option<S>) -> bool {
        if self.phase != Phase::Idle {
            log::debug!("animator already initialized ({:?})", self.phase);
            return self.phase == Phase::Running;
        }
        let surface = match surface {
            Some(surface) => surface,
            None => {
                log::debug!("no drawing surface, particle field stays idle");
                return false;
            }
        };
        let size = surface.size();
        self.surface = Some(surface);
        self.phase = Phase::Running;
        self.seed_ambient(self.config.ambient_count, size);
        log::debug!(
            "particle field running on {}x{} surface with {} particles",
            size.width,
            size.height,
            self.particles.len()
        );
        true
    }

    /// Adds `count` particles at uniformly random positions inside `size`
    /// drifting slowly in random directions.
    pub fn seed_ambient(&mut self, count: usize, size: Size) {
        self.particles.reserve(count.min(MAX_BATCH));
        let speed = self.config.ambient_speed;
        for _ in 0..count {
            let pos = glm::vec2(
                uniform(&mut self.rng, 0.0, size.width),
                uniform(&mut self.rng, 0.0, size.height),
            );
            let particle = self.spawn(pos, speed);
            self.particles.push(particle);
        }
    }

    /// Records the pointer and bursts a few particles in a ring around it.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if self.phase != Phase::Running {
            return;
        }
        let pointer = glm::vec2(x, y);
        self.pointer = Some(pointer);

        let min_distance = self.config.burst_min_distance;
        let max_distance = self.config.burst_max_distance;
        let speed = self.config.burst_speed;
        for _ in 0..self.config.spawn_per_move {
            let angle = uniform(&mut self.rng, 0.0, 2.0 * PI);
            let distance = uniform(&mut self.rng, min_distance, max_distance);
            let offset = glm::vec2(angle.cos(), angle.sin()) * distance;
            let particle = self.spawn(pointer + offset, speed);
            self.particles.push(particle);
        }
    }

    /// Follows the viewport size. Particles keep their positions even if
    /// they now lie outside the surface.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(Size::new(width, height));
        }
    }

    /// One frame: fade the previous frame, drop expired particles, advance
    /// and paint the rest. Expired particles are removed in place, so the
    /// field never holds a particle with `life <= 0` between frames.
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return,
        };
        let config = &self.config;

        let trail = Paint::Solid {
            color: config.trail_color,
            alpha: config.trail_opacity,
        };
        let size = surface.size();
        let mut failure = surface.fill_rect(Rect::covering(size), &trail).err();

        self.particles.retain_mut(|particle| {
            if !particle.is_alive() {
                return false;
            }
            particle.advance(config.damping, config.life_decay);
            if failure.is_none() {
                failure = paint_particle(&mut *surface, particle, config).err();
            }
            particle.is_alive()
        });

        if let Some(err) = failure {
            log::debug!("frame only partially drawn: {}", err);
        }
    }

    /// Drops the surface and every particle. Further events and frames are
    /// ignored.
    pub fn teardown(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        log::debug!("particle field torn down with {} particles", self.particles.len());
        self.phase = Phase::Stopped;
        self.surface = None;
        self.particles.clear();
        self.pointer = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Last pointer position seen, if any.
    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    pub fn size(&self) -> Option<Size> {
        self.surface.as_ref().map(|surface| surface.size())
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    fn spawn(&mut self, pos: DVec2, speed: f64) -> Particle {
        let vel = glm::vec2(
            uniform(&mut self.rng, -speed, speed),
            uniform(&mut self.rng, -speed, speed),
        );
        let color = pick_color(&mut self.rng, &self.config.palette);
        Particle::new(pos, vel, color)
    }
}

/// Glow first, then the core on top of it, both fading with life.
fn paint_particle<S: Surface + ?Sized>(
    surface: &mut S,
    particle: &Particle,
    config: &FieldConfig,
) -> Result<(), SurfaceError> {
    let opacity = particle.opacity();
    let glow = Paint::RadialGlow {
        center: particle.pos,
        radius: config.glow_radius,
        color: particle.color,
        alpha: opacity,
    };
    surface.fill_rect(Rect::centered(particle.pos, config.glow_size), &glow)?;

    let core = Paint::Solid {
        color: particle.color,
        alpha: opacity * config.core_opacity,
    };
    surface.fill_rect(Rect::centered(particle.pos, config.core_size), &core)
}

// `gen_range` needs a non-empty range; a degenerate one collapses to its bound.
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low, high)
    } else {
        low
    }
}

fn pick_color<R: Rng>(rng: &mut R, palette: &[Color]) -> Color {
    palette[rng.gen_range(0, palette.len())]
}
