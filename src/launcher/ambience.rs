//! Decorative scene: floating blocks and drifting particles
//!
//! Purely cosmetic. Blocks are placed once at startup; particles arrive in
//! small batches on a fixed interval and each one expires after its lifetime.

use rand::Rng;
use std::time::Duration;

use crate::config::AmbienceSettings;
use crate::launcher::scheduler::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecorationKind {
    /// Colored block, hue in degrees
    Block { hue: f32 },
    Particle,
}

/// A cosmetic element positioned in percent of the scene
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub id: u64,
    pub kind: DecorationKind,
    pub x_pct: f32,
    pub y_pct: f32,
    /// Length of one bob cycle
    pub period: Duration,
    /// Start offset into the bob cycle
    pub delay: Duration,
    pub spawned_at: Duration,
}

impl Decoration {
    /// Vertical bob at virtual time `now`, in -1.0..=1.0
    pub fn bob(&self, now: Duration) -> f32 {
        let t = now.saturating_sub(self.spawned_at) + self.delay;
        let cycle = t.as_secs_f32() / self.period.as_secs_f32().max(0.001);
        (cycle * std::f32::consts::TAU).sin()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AmbienceTimer {
    Burst,
    Expire(u64),
}

pub struct Ambience<R: Rng> {
    settings: AmbienceSettings,
    scheduler: Scheduler<AmbienceTimer>,
    blocks: Vec<Decoration>,
    particles: Vec<Decoration>,
    next_id: u64,
    rng: R,
}

impl<R: Rng> Ambience<R> {
    /// Place the blocks and the first particle batch
    pub fn new(settings: AmbienceSettings, rng: R) -> Self {
        let mut ambience = Self {
            settings,
            scheduler: Scheduler::new(),
            blocks: Vec::new(),
            particles: Vec::new(),
            next_id: 0,
            rng,
        };

        for _ in 0..ambience.settings.block_count {
            let block = ambience.spawn_block();
            ambience.blocks.push(block);
        }

        ambience.spawn_particles();
        ambience.scheduler.every(
            Duration::from_millis(ambience.settings.particle_interval_ms),
            AmbienceTimer::Burst,
        );
        ambience
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn blocks(&self) -> &[Decoration] {
        &self.blocks
    }

    pub fn particles(&self) -> &[Decoration] {
        &self.particles
    }

    pub fn advance(&mut self, delta: Duration) {
        let target = self.scheduler.now() + delta;
        while let Some(timer) = self.scheduler.next_due(target) {
            match timer {
                AmbienceTimer::Burst => self.spawn_particles(),
                AmbienceTimer::Expire(id) => self.particles.retain(|p| p.id != id),
            }
        }
        self.scheduler.settle(target);
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_block(&mut self) -> Decoration {
        let id = self.next_id();
        Decoration {
            id,
            kind: DecorationKind::Block {
                hue: self.rng.gen_range(0.0..360.0),
            },
            x_pct: self.rng.gen_range(0.0..80.0),
            y_pct: self.rng.gen_range(0.0..80.0),
            period: Duration::from_millis(self.rng.gen_range(3000..5000)),
            delay: Duration::from_millis(self.rng.gen_range(0..2000)),
            spawned_at: self.scheduler.now(),
        }
    }

    fn spawn_particles(&mut self) {
        let lifetime = Duration::from_millis(self.settings.particle_lifetime_ms);
        for _ in 0..self.settings.particle_batch {
            let id = self.next_id();
            let particle = Decoration {
                id,
                kind: DecorationKind::Particle,
                x_pct: self.rng.gen_range(0.0..100.0),
                y_pct: self.rng.gen_range(0.0..100.0),
                period: Duration::from_millis(self.rng.gen_range(5000..8000)),
                delay: Duration::from_millis(self.rng.gen_range(0..3000)),
                spawned_at: self.scheduler.now(),
            };
            self.particles.push(particle);
            self.scheduler.after(lifetime, AmbienceTimer::Expire(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ambience() -> Ambience<StdRng> {
        Ambience::new(AmbienceSettings::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_initial_scene() {
        let a = ambience();
        assert_eq!(a.blocks().len(), 5);
        assert_eq!(a.particles().len(), 3);

        for block in a.blocks() {
            assert!((0.0..80.0).contains(&block.x_pct));
            assert!((0.0..80.0).contains(&block.y_pct));
            match block.kind {
                DecorationKind::Block { hue } => assert!((0.0..360.0).contains(&hue)),
                DecorationKind::Particle => panic!("block expected"),
            }
        }
    }

    #[test]
    fn test_particles_arrive_and_expire() {
        let mut a = ambience();

        a.advance(Duration::from_millis(3000));
        assert_eq!(a.particles().len(), 6);

        // First batch expires at 8s; batches at 3s and 6s are still alive
        a.advance(Duration::from_millis(5000));
        assert_eq!(a.particles().len(), 6);
        assert!(a.particles().iter().all(|p| p.spawned_at > Duration::ZERO));

        // Steady state: lifetime / interval batches, rounded up
        a.advance(Duration::from_secs(60));
        assert!(a.particles().len() <= 9);
        assert!(a
            .particles()
            .iter()
            .all(|p| a.now() - p.spawned_at < Duration::from_millis(8000)));
    }

    #[test]
    fn test_blocks_are_permanent() {
        let mut a = ambience();
        let before = a.blocks().to_vec();
        a.advance(Duration::from_secs(120));
        assert_eq!(a.blocks(), before.as_slice());
    }

    #[test]
    fn test_bob_stays_in_range() {
        let a = ambience();
        for block in a.blocks() {
            for step in 0..50 {
                let v = block.bob(Duration::from_millis(step * 137));
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }
}
