// Simple particle struct to keep track of individual position, velocity, color
// and the remaining life that drives both its opacity and its removal.

use crate::color::Color;
use glm::DVec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub color: Color,
    pub life: f64,
}

impl Particle {
    pub const FULL_LIFE: f64 = 1.0;

    pub fn new(pos: DVec2, vel: DVec2, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            color,
            life: Particle::FULL_LIFE,
        }
    }

    /// One frame of motion: move by the current velocity, then bleed off
    /// speed and life.
    pub fn advance(&mut self, damping: f64, life_decay: f64) {
        self.pos += self.vel;
        self.vel *= damping;
        self.life -= life_decay;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Life clamped into [0, 1], used as the paint alpha.
    #[inline]
    pub fn opacity(&self) -> f64 {
        self.life.max(0.0).min(1.0)
    }

    pub fn speed(&self) -> f64 {
        glm::length(&self.vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;

    #[test]
    fn advance_moves_then_damps() {
        let mut p = Particle::new(glm::vec2(10.0, 20.0), glm::vec2(1.0, -2.0), PALETTE[1]);
        p.advance(0.5, 0.25);
        assert_eq!(p.pos, glm::vec2(11.0, 18.0));
        assert_eq!(p.vel, glm::vec2(0.5, -1.0));
        assert_eq!(p.life, 0.75);
        assert_eq!(p.color, PALETTE[1]);

        p.advance(0.5, 0.25);
        assert_eq!(p.pos, glm::vec2(11.5, 17.0));
        assert_eq!(p.life, 0.5);
    }

    #[test]
    fn expired_particle_is_transparent() {
        let mut p = Particle::new(glm::vec2(0.0, 0.0), glm::vec2(0.0, 0.0), PALETTE[0]);
        assert!(p.is_alive());
        assert_eq!(p.opacity(), 1.0);

        p.life = 0.0;
        assert!(!p.is_alive());
        p.life = -0.005;
        assert!(!p.is_alive());
        assert_eq!(p.opacity(), 0.0);
    }
}
