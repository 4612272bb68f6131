//! Projectile animations and the completion gate.
//!
//! The core never draws anything; what it needs from this module is the
//! boundary signal "have all in-flight effects finished yet?". The
//! [`AnimationManager`] owns every live [`Projectile`], advances them once
//! per frame, and reports idleness to gate the effect queue's drain.
//!
//! A projectile flies in a straight line from its start anchor to its
//! target anchor at a fixed speed. The direction is normalized once at
//! spawn; each `advance` steps the position and the flight completes when
//! the travelled distance covers the start-to-target distance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default flight speed in pixels per frame.
pub const DEFAULT_PROJECTILE_SPEED: f32 = 10.0;

/// A single in-flight projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    start: Vec2,
    target: Vec2,
    position: Vec2,
    step: Vec2,
    distance: f32,
    completed: bool,
}

impl Projectile {
    /// Spawns a projectile flying from `start` to `target` at `speed`.
    ///
    /// A zero-length flight completes immediately.
    #[must_use]
    pub fn new(start: Vec2, target: Vec2, speed: f32) -> Self {
        let delta = target - start;
        let distance = delta.length();
        let (step, completed) = if distance > 0.0 {
            (delta / distance * speed, false)
        } else {
            (Vec2::ZERO, true)
        };
        Self {
            start,
            target,
            position: start,
            step,
            distance,
            completed,
        }
    }

    /// Steps the projectile one frame toward its target.
    ///
    /// Returns `true` once the flight has completed. The position snaps to
    /// the target on the completing step so it never overshoots.
    pub fn advance(&mut self) -> bool {
        if self.completed {
            return true;
        }
        self.position += self.step;
        if self.position.distance(self.start) >= self.distance {
            self.position = self.target;
            self.completed = true;
        }
        self.completed
    }

    /// Returns the current screen position, for the render layer.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns `true` once the flight has completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Owner of all in-flight projectiles.
///
/// # Example
///
/// ```
/// use gridclash_core::animation::AnimationManager;
/// use glam::Vec2;
///
/// let mut animations = AnimationManager::default();
/// animations.spawn(Vec2::ZERO, Vec2::new(30.0, 0.0));
/// assert!(!animations.is_idle());
/// while !animations.is_idle() {
///     animations.advance();
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationManager {
    projectiles: Vec<Projectile>,
    speed: f32,
}

impl AnimationManager {
    /// Creates a manager spawning projectiles at the given speed.
    #[must_use]
    pub fn new(speed: f32) -> Self {
        Self {
            projectiles: Vec::new(),
            speed,
        }
    }

    /// Spawns a projectile from `start` to `target`.
    pub fn spawn(&mut self, start: Vec2, target: Vec2) {
        self.projectiles.push(Projectile::new(start, target, self.speed));
    }

    /// Advances every projectile one frame and drops the completed ones.
    pub fn advance(&mut self) {
        self.projectiles.retain_mut(|projectile| !projectile.advance());
    }

    /// Returns `true` when no projectile is in flight.
    ///
    /// This is the gate the effect queue polls before applying damage.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Returns the number of projectiles in flight.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Iterates the in-flight projectiles, for the render layer.
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// Discards every in-flight projectile.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECTILE_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod projectile_tests {
        use super::*;

        #[test]
        fn advances_toward_target() {
            let mut projectile = Projectile::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 10.0);
            projectile.advance();
            assert_eq!(projectile.position(), Vec2::new(10.0, 0.0));
            assert!(!projectile.is_completed());
        }

        #[test]
        fn completes_after_covering_distance() {
            let mut projectile = Projectile::new(Vec2::ZERO, Vec2::new(30.0, 0.0), 10.0);
            assert!(!projectile.advance());
            assert!(!projectile.advance());
            assert!(projectile.advance());
            assert_eq!(projectile.position(), Vec2::new(30.0, 0.0));
        }

        #[test]
        fn snaps_to_target_instead_of_overshooting() {
            let mut projectile = Projectile::new(Vec2::ZERO, Vec2::new(25.0, 0.0), 10.0);
            while !projectile.advance() {}
            assert_eq!(projectile.position(), Vec2::new(25.0, 0.0));
        }

        #[test]
        fn zero_length_flight_completes_immediately() {
            let projectile = Projectile::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 10.0);
            assert!(projectile.is_completed());
        }
    }

    mod manager_tests {
        use super::*;

        #[test]
        fn starts_idle() {
            let animations = AnimationManager::default();
            assert!(animations.is_idle());
            assert_eq!(animations.active_count(), 0);
        }

        #[test]
        fn busy_until_all_flights_land() {
            let mut animations = AnimationManager::new(10.0);
            animations.spawn(Vec2::ZERO, Vec2::new(20.0, 0.0));
            animations.spawn(Vec2::ZERO, Vec2::new(50.0, 0.0));
            assert_eq!(animations.active_count(), 2);

            animations.advance();
            animations.advance();
            // Short flight landed, long flight still going.
            assert_eq!(animations.active_count(), 1);
            assert!(!animations.is_idle());

            for _ in 0..3 {
                animations.advance();
            }
            assert!(animations.is_idle());
        }

        #[test]
        fn clear_discards_flights() {
            let mut animations = AnimationManager::default();
            animations.spawn(Vec2::ZERO, Vec2::new(100.0, 0.0));
            animations.clear();
            assert!(animations.is_idle());
        }
    }
}
