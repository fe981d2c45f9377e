//! Unit-step movement toward prey and away from predators.

use crate::geometry::Bounds;
use crate::model::Agent;
use rand::prelude::*;

/// Random offset in `{-1, 0, 1}`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(-1..=1)
}

/// Move one unit toward `prey` on each axis.
pub fn pursue(me: &Agent, prey: &Agent, bounds: &Bounds) -> (i32, i32) {
    let new_x = me.x + (prey.x - me.x).signum();
    let new_y = me.y + (prey.y - me.y).signum();
    (bounds.clamp_x(new_x), bounds.clamp_y(new_y))
}

/// Move one unit away from `predator` on each axis.
///
/// An agent pinned against the border cannot get away; it then shuffles
/// randomly along one axis, x if it is lined up with the predator and y
/// otherwise.
pub fn evade<R: Rng + ?Sized>(
    me: &Agent,
    predator: &Agent,
    bounds: &Bounds,
    rng: &mut R,
) -> (i32, i32) {
    let mut new_x = bounds.clamp_x(me.x - (predator.x - me.x).signum());
    let mut new_y = bounds.clamp_y(me.y - (predator.y - me.y).signum());

    if (new_x, new_y) == me.pos() {
        if new_x == predator.x {
            new_x = bounds.clamp_x(new_x + jitter(rng));
        } else {
            new_y = bounds.clamp_y(new_y + jitter(rng));
        }
    }

    (new_x, new_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Kind;
    use rand_chacha::ChaCha12Rng;

    fn agt(x: i32, y: i32) -> Agent {
        Agent::new(Kind::Rock, x, y)
    }

    #[test]
    fn pursue_steps_diagonally_toward_prey() {
        let bounds = Bounds::new(10, 10);
        assert_eq!(pursue(&agt(5, 5), &agt(8, 1), &bounds), (6, 4));
        assert_eq!(pursue(&agt(5, 5), &agt(5, 9), &bounds), (5, 6));
        assert_eq!(pursue(&agt(5, 5), &agt(5, 5), &bounds), (5, 5));
    }

    #[test]
    fn evade_steps_away_from_predator() {
        let bounds = Bounds::new(10, 10);
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        assert_eq!(evade(&agt(5, 5), &agt(8, 1), &bounds, &mut rng), (4, 6));
        assert_eq!(evade(&agt(5, 5), &agt(5, 9), &bounds, &mut rng), (5, 4));
    }

    #[test]
    fn evade_slides_along_wall() {
        let bounds = Bounds::new(10, 10);
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        // Blocked on x by the wall, still free on y.
        assert_eq!(evade(&agt(0, 5), &agt(3, 3), &bounds, &mut rng), (0, 6));
    }

    #[test]
    fn cornered_agent_lined_up_on_x_shuffles_along_x() {
        let bounds = Bounds::new(10, 10);
        for seed in 0..32 {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            let (x, y) = evade(&agt(0, 0), &agt(0, 5), &bounds, &mut rng);
            assert_eq!(y, 0);
            assert!(x == 0 || x == 1, "unexpected x {x}");
        }
    }

    #[test]
    fn cornered_agent_off_axis_shuffles_along_y() {
        let bounds = Bounds::new(10, 10);
        let mut moved = false;
        for seed in 0..32 {
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            let (x, y) = evade(&agt(10, 10), &agt(4, 7), &bounds, &mut rng);
            assert_eq!(x, 10);
            assert!(y == 9 || y == 10, "unexpected y {y}");
            moved |= y == 9;
        }
        assert!(moved);
    }

    #[test]
    fn jitter_stays_in_unit_range() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let val = jitter(&mut rng);
            assert!((-1..=1).contains(&val));
            seen[(val + 1) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }
}
