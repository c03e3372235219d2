use std::f32::consts::{FRAC_PI_2, TAU};

use raylib::prelude::*;

use crate::config::PlayerConfig;
use crate::core::world::World;

/// Centre of the Start cell.
pub const START_POS: (f32, f32) = (1.5, 1.5);

pub struct Player {
    pub pos: Vector2,
    pub angle: f32,        // heading, kept in [0, 2π)
    pub fov: f32,          // field of view in radians
    pub base_speed: f32,   // grid units per tick
    pub sprint_speed: f32, // grid units per tick
    pub move_speed: f32,   // whichever of the two is active
    pub mouse_sens: f32,
    pub sprinting: bool,
    pub coins_collected: u32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self::with_config(x, y, &PlayerConfig::default())
    }

    pub fn with_config(x: f32, y: f32, config: &PlayerConfig) -> Self {
        Self {
            pos: Vector2::new(x, y),
            angle: 0.0,
            fov: config.fov_degrees.to_radians(),
            base_speed: config.base_speed,
            sprint_speed: config.sprint_speed,
            move_speed: config.base_speed,
            mouse_sens: config.mouse_sensitivity,
            sprinting: false,
            coins_collected: 0,
        }
    }

    /// A fresh player centred in the Start cell.
    pub fn at_start(config: &PlayerConfig) -> Self {
        Self::with_config(START_POS.0, START_POS.1, config)
    }

    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = sprinting;
        self.move_speed = if sprinting { self.sprint_speed } else { self.base_speed };
    }

    pub fn turn(&mut self, delta: f32) {
        self.angle = (self.angle + delta).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if self.angle >= TAU {
            self.angle = 0.0;
        }
    }

    /// Moves by one tick of forward/strafe intent, each in {-1, 0, 1}.
    ///
    /// The combined displacement is committed only if the destination cell
    /// is open; there is no sliding along walls. On success the coin in the
    /// new cell (if any) is picked up and the return value says whether the
    /// new cell is the Finish. A rejected move returns `false`.
    pub fn try_move(&mut self, forward: i8, strafe: i8, world: &mut World) -> bool {
        let f = forward.signum() as f32 * self.move_speed;
        let s = strafe.signum() as f32 * self.move_speed;
        let side = self.angle + FRAC_PI_2;
        let next_x = self.pos.x + f * self.angle.cos() + s * side.cos();
        let next_y = self.pos.y + f * self.angle.sin() + s * side.sin();

        if !world.is_valid_move(next_x, next_y) {
            return false;
        }
        self.pos = Vector2::new(next_x, next_y);
        if world.collect_coin(next_x, next_y) {
            self.coins_collected += 1;
            log::debug!("coin collected at ({}, {})", next_x as usize, next_y as usize);
        }
        world.is_finish(next_x, next_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::Maze;
    use std::f32::consts::PI;

    const ROOM: &str = "\
#######
#S    #
# ### #
# #   #
# # # #
#   F #
#######
";

    fn room() -> World {
        World::from_maze(Maze::parse(ROOM).unwrap())
    }

    #[test]
    fn sprint_doubles_speed() {
        let mut p = Player::new(1.5, 1.5);
        assert_eq!(p.move_speed, 0.1);
        p.set_sprinting(true);
        assert_eq!(p.move_speed, 0.2);
        p.set_sprinting(false);
        assert_eq!(p.move_speed, 0.1);
    }

    #[test]
    fn turning_wraps_heading() {
        let mut p = Player::new(1.5, 1.5);
        p.turn(-FRAC_PI_2);
        assert!((p.angle - 3.0 * FRAC_PI_2).abs() < 1e-5);
        p.turn(PI);
        assert!((p.angle - FRAC_PI_2).abs() < 1e-5);
        p.turn(4.0 * TAU);
        assert!(p.angle >= 0.0 && p.angle < TAU);
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let mut world = room();
        let mut p = Player::new(1.5, 1.05);
        p.angle = 3.0 * FRAC_PI_2; // facing the top border
        let before = (p.pos.x, p.pos.y, p.angle);
        assert!(!p.try_move(1, 0, &mut world));
        assert_eq!((p.pos.x, p.pos.y, p.angle), before);
    }

    #[test]
    fn forward_and_strafe_combine_into_one_step() {
        let mut world = room();
        let mut p = Player::new(2.5, 1.5);
        assert!(!p.try_move(1, 1, &mut world));
        assert!((p.pos.x - 2.6).abs() < 1e-5);
        assert!((p.pos.y - 1.6).abs() < 1e-5);

        assert!(!p.try_move(-1, -1, &mut world));
        assert!((p.pos.x - 2.5).abs() < 1e-5);
        assert!((p.pos.y - 1.5).abs() < 1e-5);
    }

    #[test]
    fn no_sliding_when_diagonal_hits_wall() {
        let mut world = room();
        // the x component alone would fit, the y component lands in row 2
        let mut p = Player::new(2.5, 1.95);
        assert!(!p.try_move(1, 1, &mut world));
        assert_eq!((p.pos.x, p.pos.y), (2.5, 1.95));
    }

    #[test]
    fn moving_onto_coin_collects_it_once() {
        let maze = Maze::parse(ROOM).unwrap();
        let mut world = World::with_coins(maze, [(3, 1)]);
        let mut p = Player::new(2.95, 1.5);
        assert!(!p.try_move(1, 0, &mut world));
        assert_eq!(p.coins_collected, 1);
        assert!(!world.coins().contains(&(3, 1)));

        // still inside the same cell, nothing left to pick up
        assert!(!p.try_move(1, 0, &mut world));
        assert_eq!(p.coins_collected, 1);
    }

    #[test]
    fn stepping_into_finish_reports_true() {
        let mut world = room();
        let mut p = Player::new(5.05, 5.5);
        p.angle = PI;
        assert!(p.try_move(1, 0, &mut world));
        assert_eq!(p.pos.x as usize, 4);
    }

    #[test]
    fn sprinting_moves_twice_as_far() {
        let mut world = room();
        let mut p = Player::new(1.5, 1.5);
        p.set_sprinting(true);
        p.try_move(1, 0, &mut world);
        assert!((p.pos.x - 1.7).abs() < 1e-5);
    }
}
