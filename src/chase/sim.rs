//! Per-tick simulation: player movement, pursuer homing, speed ramp, collision.
//! No platform dependencies; everything here runs under plain `cargo test`.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::entity::{Entity, Field};
use super::input::{InputTracker, Key};
use crate::config::{ChaseConfig, RampPolicy, Rules};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct World {
    pub player: Entity,
    pub pursuer: Entity,
    /// Second at which the ramp last fired (`RampPolicy::OncePerSecond`).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub last_ramp_secs: Option<u32>,
}

impl World {
    /// Fresh round: player's top-left corner at the field center, pursuer on a
    /// random corner with base speed.
    pub fn spawn<R: Rng + ?Sized>(cfg: &ChaseConfig, field: Field, rng: &mut R) -> Self {
        let size = cfg.player_size;
        let player = Entity::new(
            (field.width / 2.0).min(field.width - size).max(0.0),
            (field.height / 2.0).min(field.height - size).max(0.0),
            size,
            cfg.player_speed,
            cfg.player_color.clone(),
        );
        let px = if rng.gen_bool(0.5) { 0.0 } else { field.width };
        let py = if rng.gen_bool(0.5) { 0.0 } else { field.height };
        let pursuer = Entity::new(
            px,
            py,
            cfg.pursuer_size(),
            cfg.pursuer_base_speed,
            cfg.pursuer_color.clone(),
        );
        Self {
            player,
            pursuer,
            last_ramp_secs: None,
        }
    }
}

/// Advance the world by one tick.
pub fn step(world: &mut World, input: &InputTracker, rules: &Rules, field: Field, elapsed_secs: u32) {
    move_player(&mut world.player, input, field);
    chase(&mut world.pursuer, &world.player);
    ramp_speed(world, rules, elapsed_secs);
}

fn move_player(player: &mut Entity, input: &InputTracker, field: Field) {
    let max_x = field.width - player.size;
    let max_y = field.height - player.size;
    let speed = player.speed;
    // Each direction applies only if the box stays on the field; diagonals are
    // unnormalized.
    if input.is_pressed(Key::Up) && player.y - speed >= 0.0 {
        player.y -= speed;
    }
    if input.is_pressed(Key::Down) && player.y + speed <= max_y {
        player.y += speed;
    }
    if input.is_pressed(Key::Left) && player.x - speed >= 0.0 {
        player.x -= speed;
    }
    if input.is_pressed(Key::Right) && player.x + speed <= max_x {
        player.x += speed;
    }
}

fn chase(pursuer: &mut Entity, target: &Entity) {
    let dx = target.x - pursuer.x;
    let dy = target.y - pursuer.y;
    let dist = dx.hypot(dy);
    if dist > 0.0 {
        // Never step past the target.
        let travel = pursuer.speed.min(dist);
        pursuer.x += dx / dist * travel;
        pursuer.y += dy / dist * travel;
    }
}

fn ramp_speed(world: &mut World, rules: &Rules, elapsed_secs: u32) {
    if elapsed_secs == 0 || rules.ramp_interval_secs == 0 {
        return;
    }
    if elapsed_secs % rules.ramp_interval_secs != 0 {
        return;
    }
    match rules.ramp_policy {
        RampPolicy::EveryTick => {}
        RampPolicy::OncePerSecond => {
            if world.last_ramp_secs == Some(elapsed_secs) {
                return;
            }
            world.last_ramp_secs = Some(elapsed_secs);
        }
    }
    world.pursuer.speed += rules.speed_increment;
    log::debug!(
        "pursuer speed ramped to {:.3} at {}s",
        world.pursuer.speed,
        elapsed_secs
    );
}

/// True iff the two bounding boxes overlap (strictly) on both axes.
pub fn collides(a: &Entity, b: &Entity) -> bool {
    a.bounds().overlaps(&b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world_at(player: (f64, f64), pursuer: (f64, f64)) -> World {
        World {
            player: Entity::new(player.0, player.1, 50.0, 10.0, "green"),
            pursuer: Entity::new(pursuer.0, pursuer.1, 100.0, 2.0, "red"),
            last_ramp_secs: None,
        }
    }

    fn field() -> Field {
        Field::new(800.0, 600.0)
    }

    #[test]
    fn collision_examples() {
        let player = Entity::new(10.0, 10.0, 50.0, 10.0, "green");
        let near = Entity::new(30.0, 30.0, 100.0, 2.0, "red");
        let far = Entity::new(1000.0, 1000.0, 100.0, 2.0, "red");
        assert!(collides(&player, &near));
        assert!(collides(&near, &player));
        assert!(!collides(&player, &far));
        assert!(!collides(&far, &player));
    }

    #[test]
    fn player_moves_and_stops_at_walls() {
        let mut w = world_at((5.0, 300.0), (700.0, 500.0));
        let mut input = InputTracker::new();
        input.set(Key::Left, true);
        // A step that would cross the wall is skipped, not shortened.
        step(&mut w, &input, &Rules::default(), field(), 0);
        assert_eq!(w.player.x, 5.0);

        input.release_all();
        input.set(Key::Right, true);
        input.set(Key::Down, true);
        step(&mut w, &input, &Rules::default(), field(), 0);
        assert_eq!((w.player.x, w.player.y), (15.0, 310.0));

        let mut w = world_at((745.0, 550.0), (0.0, 0.0));
        step(&mut w, &input, &Rules::default(), field(), 0);
        assert_eq!((w.player.x, w.player.y), (745.0, 550.0));

        let mut w = world_at((740.0, 10.0), (0.0, 500.0));
        input.release_all();
        input.set(Key::Right, true);
        input.set(Key::Up, true);
        step(&mut w, &input, &Rules::default(), field(), 0);
        assert_eq!((w.player.x, w.player.y), (750.0, 0.0));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut w = world_at((100.0, 100.0), (700.0, 500.0));
        let mut input = InputTracker::new();
        input.set(Key::Up, true);
        input.set(Key::Down, true);
        step(&mut w, &input, &Rules::default(), field(), 0);
        assert_eq!(w.player.y, 100.0);
    }

    #[test]
    fn pursuer_homes_at_its_speed() {
        let mut w = world_at((300.0, 400.0), (0.0, 0.0));
        step(&mut w, &InputTracker::new(), &Rules::default(), field(), 0);
        // 3-4-5 triangle scaled to speed 2.
        assert!((w.pursuer.x - 1.2).abs() < 1e-9);
        assert!((w.pursuer.y - 1.6).abs() < 1e-9);
    }

    #[test]
    fn pursuer_does_not_overshoot_or_move_when_overlapping() {
        let mut w = world_at((101.0, 100.0), (100.0, 100.0));
        step(&mut w, &InputTracker::new(), &Rules::default(), field(), 0);
        assert_eq!((w.pursuer.x, w.pursuer.y), (101.0, 100.0));
        step(&mut w, &InputTracker::new(), &Rules::default(), field(), 0);
        assert_eq!((w.pursuer.x, w.pursuer.y), (101.0, 100.0));
    }

    #[test]
    fn ramp_once_per_qualifying_second() {
        let mut w = world_at((100.0, 100.0), (700.0, 500.0));
        let rules = Rules::default();
        let input = InputTracker::new();
        for _ in 0..60 {
            step(&mut w, &input, &rules, field(), 10);
        }
        assert!((w.pursuer.speed - 2.005).abs() < 1e-12);
        step(&mut w, &input, &rules, field(), 11);
        step(&mut w, &input, &rules, field(), 20);
        assert!((w.pursuer.speed - 2.010).abs() < 1e-12);
        step(&mut w, &input, &rules, field(), 0);
        assert!((w.pursuer.speed - 2.010).abs() < 1e-12);
    }

    #[test]
    fn ramp_every_tick_reproduces_classic_quirk() {
        let mut w = world_at((100.0, 100.0), (700.0, 500.0));
        let rules = Rules {
            ramp_policy: RampPolicy::EveryTick,
            ..Rules::default()
        };
        for _ in 0..60 {
            step(&mut w, &InputTracker::new(), &rules, field(), 10);
        }
        assert!((w.pursuer.speed - (2.0 + 60.0 * 0.005)).abs() < 1e-9);
    }

    #[test]
    fn spawn_centers_player_and_corners_pursuer() {
        let cfg = ChaseConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut xs = std::collections::HashSet::new();
        let mut ys = std::collections::HashSet::new();
        for _ in 0..64 {
            let w = World::spawn(&cfg, field(), &mut rng);
            assert_eq!((w.player.x, w.player.y), (400.0, 300.0));
            assert!(w.pursuer.x == 0.0 || w.pursuer.x == 800.0);
            assert!(w.pursuer.y == 0.0 || w.pursuer.y == 600.0);
            assert_eq!(w.pursuer.size, 2.0 * w.player.size);
            assert_eq!(w.pursuer.speed, cfg.pursuer_base_speed);
            xs.insert(w.pursuer.x as i64);
            ys.insert(w.pursuer.y as i64);
        }
        // Each axis is drawn independently, so every edge shows up.
        assert_eq!(xs, [0, 800].into_iter().collect());
        assert_eq!(ys, [0, 600].into_iter().collect());
    }

    #[test]
    fn spawn_keeps_player_inside_a_small_field() {
        let cfg = ChaseConfig::default();
        let w = World::spawn(&cfg, Field::new(80.0, 60.0), &mut Pcg32::seed_from_u64(1));
        assert_eq!((w.player.x, w.player.y), (30.0, 10.0));
    }
}
