//! Playing/Completed state machine, timing and restart.
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{MazeConfig, PlayerConfig};
use crate::core::input::FrameInput;
use crate::core::player::Player;
use crate::core::world::World;
use crate::error::MazeError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Completed,
}

/// What happened during one [`GameSession::update`], for audio and UI.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub moved: bool,
    pub coin_collected: bool,
    pub completed: bool,
    pub restarted: bool,
    pub quit: bool,
}

pub struct GameSession {
    pub world: World,
    pub player: Player,
    state: GameState,
    started_at: Instant,
    finished_at: Option<Instant>,
    maze_config: MazeConfig,
    player_config: PlayerConfig,
    rng: StdRng,
}

impl GameSession {
    /// Builds the first world. A configured seed makes every maze of the
    /// session (restarts included) reproducible.
    pub fn new(maze_config: MazeConfig, player_config: PlayerConfig, now: Instant) -> Result<Self, MazeError> {
        let mut rng = match maze_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let world = World::new(maze_config.size, maze_config.coins, &mut rng)?;
        log::info!(
            "new {0}x{0} maze ({1} coins, seed {2:?})",
            maze_config.size,
            world.total_coins(),
            maze_config.seed
        );
        Ok(Self {
            world,
            player: Player::at_start(&player_config),
            state: GameState::Playing,
            started_at: now,
            finished_at: None,
            maze_config,
            player_config,
            rng,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == GameState::Completed
    }

    /// Running time while playing; frozen at the finish once completed.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let end = self.finished_at.unwrap_or(now);
        end.saturating_duration_since(self.started_at)
    }

    /// Advances one tick.
    ///
    /// While playing, turn and movement intents are applied and restart/quit
    /// are ignored. Once completed, movement is ignored and only restart or
    /// quit have an effect.
    pub fn update(&mut self, input: &FrameInput, now: Instant) -> Result<TickEvents, MazeError> {
        let mut events = TickEvents::default();
        match self.state {
            GameState::Playing => {
                self.player.turn(input.turn_delta);
                self.player.set_sprinting(input.sprint);
                if input.is_moving() {
                    let (x, y) = (self.player.pos.x, self.player.pos.y);
                    let coins = self.player.coins_collected;
                    let finished = self.player.try_move(input.forward, input.strafe, &mut self.world);
                    events.moved = (x, y) != (self.player.pos.x, self.player.pos.y);
                    events.coin_collected = self.player.coins_collected > coins;
                    if finished {
                        self.complete(now);
                        events.completed = true;
                    }
                }
            }
            GameState::Completed => {
                if input.quit {
                    events.quit = true;
                } else if input.restart {
                    self.restart(now)?;
                    events.restarted = true;
                }
            }
        }
        Ok(events)
    }

    fn complete(&mut self, now: Instant) {
        self.state = GameState::Completed;
        self.finished_at = Some(now);
        log::info!(
            "maze completed in {:.1}s with {}/{} coins",
            self.elapsed(now).as_secs_f32(),
            self.player.coins_collected,
            self.world.total_coins()
        );
    }

    /// Replaces world and player wholesale and restarts the clock.
    pub fn restart(&mut self, now: Instant) -> Result<(), MazeError> {
        self.world = World::new(self.maze_config.size, self.maze_config.coins, &mut self.rng)?;
        self.player = Player::at_start(&self.player_config);
        self.state = GameState::Playing;
        self.started_at = now;
        self.finished_at = None;
        log::info!("restarted with a fresh {0}x{0} maze", self.maze_config.size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::Maze;

    fn session() -> GameSession {
        let config = MazeConfig { size: 7, coins: 3, seed: Some(17) };
        GameSession::new(config, PlayerConfig::default(), Instant::now()).unwrap()
    }

    /// Swaps in a two-cell corridor whose second cell is the Finish.
    fn put_next_to_finish(s: &mut GameSession) {
        let maze = Maze::parse("#####\n#SF #\n#####\n#####\n#####\n").unwrap();
        s.world = World::from_maze(maze);
        s.player.pos.x = 1.95;
        s.player.pos.y = 1.5;
        s.player.angle = 0.0;
    }

    #[test]
    fn starts_playing_at_start_cell() {
        let s = session();
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!((s.player.pos.x, s.player.pos.y), (1.5, 1.5));
        assert_eq!(s.world.total_coins(), 3);
    }

    #[test]
    fn rejects_bad_size() {
        let config = MazeConfig { size: 6, coins: 3, seed: Some(1) };
        let err = GameSession::new(config, PlayerConfig::default(), Instant::now()).err();
        assert_eq!(err, Some(MazeError::EvenSize(6)));
    }

    #[test]
    fn elapsed_tracks_clock_while_playing() {
        let t0 = Instant::now();
        let config = MazeConfig { size: 5, coins: 0, seed: Some(2) };
        let s = GameSession::new(config, PlayerConfig::default(), t0).unwrap();
        assert_eq!(s.elapsed(t0 + Duration::from_secs(3)), Duration::from_secs(3));
        assert_eq!(s.elapsed(t0 + Duration::from_secs(8)), Duration::from_secs(8));
    }

    #[test]
    fn finishing_freezes_timer_and_ignores_movement() {
        let t0 = Instant::now();
        let mut s = session();
        s.started_at = t0;
        put_next_to_finish(&mut s);

        let done = t0 + Duration::from_secs(12);
        let ev = s.update(&FrameInput::forward(1), done).unwrap();
        assert!(ev.completed && ev.moved);
        assert!(s.is_completed());

        let later = t0 + Duration::from_secs(40);
        let pos = (s.player.pos.x, s.player.pos.y);
        let ev = s.update(&FrameInput { turn_delta: 1.0, ..FrameInput::forward(-1) }, later).unwrap();
        assert_eq!(ev, TickEvents::default());
        assert_eq!((s.player.pos.x, s.player.pos.y), pos);
        assert_eq!(s.player.angle, 0.0);
        assert_eq!(s.elapsed(later), Duration::from_secs(12));
    }

    #[test]
    fn restart_and_quit_only_when_completed() {
        let mut s = session();
        let now = Instant::now();
        let ev = s.update(&FrameInput::quit(), now).unwrap();
        assert!(!ev.quit);
        let ev = s.update(&FrameInput::restart(), now).unwrap();
        assert!(!ev.restarted);

        put_next_to_finish(&mut s);
        s.update(&FrameInput::forward(1), now).unwrap();
        assert!(s.update(&FrameInput::quit(), now).unwrap().quit);
    }

    #[test]
    fn restart_resets_everything() {
        let t0 = Instant::now();
        let mut s = session();
        put_next_to_finish(&mut s);
        s.player.coins_collected = 2;
        s.update(&FrameInput::forward(1), t0 + Duration::from_secs(5)).unwrap();

        let t1 = t0 + Duration::from_secs(30);
        let ev = s.update(&FrameInput::restart(), t1).unwrap();
        assert!(ev.restarted);
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.player.coins_collected, 0);
        assert_eq!((s.player.pos.x, s.player.pos.y), (1.5, 1.5));
        assert_eq!(s.world.size(), 7);
        assert_eq!(s.world.total_coins(), 3);
        assert_eq!(s.elapsed(t1), Duration::ZERO);
        assert_eq!(s.elapsed(t1 + Duration::from_secs(1)), Duration::from_secs(1));
    }
}
