//! Space Invaders headless runner
//!
//! Plays scripted games against the real controller with file-backed
//! persistence. The browser build is driven through `platform::web`.
//!
//! Usage: space-invaders [SEED] [GAMES]
//! High scores live in `$SPACE_INVADERS_DATA_DIR` (default `./.space_invaders`).

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use space_invaders::sim::{GameState, InputEvent};
    use space_invaders::{Cue, FileStorage, Game, GamePhase, Notifier, Storage};

    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// About 30 minutes of play at 60 fps
    const MAX_FRAMES: u32 = 60 * 60 * 30;
    const DEFAULT_DATA_DIR: &str = "./.space_invaders";

    struct LogNotifier;

    impl Notifier for LogNotifier {
        fn play(&mut self, cue: Cue, volume: f32) {
            log::debug!("cue {:?} at volume {:.2}", cue, volume);
        }

        fn vibrate(&mut self, duration_ms: u32) {
            log::debug!("vibrate {}ms", duration_ms);
        }
    }

    /// Steer under the nearest living alien and keep firing
    fn autopilot(state: &GameState) -> [InputEvent; 3] {
        let player_center = state.player.pos.x + state.player.rect().size.x / 2.0;
        let target = state
            .living_aliens()
            .map(|a| a.pos.x + a.rect().size.x / 2.0)
            .min_by(|a, b| {
                (a - player_center)
                    .abs()
                    .total_cmp(&(b - player_center).abs())
            });

        let (left, right) = match target {
            Some(x) if x < player_center - 4.0 => (true, false),
            Some(x) if x > player_center + 4.0 => (false, true),
            _ => (false, false),
        };
        [
            InputEvent::MoveLeft(left),
            InputEvent::MoveRight(right),
            InputEvent::Fire(true),
        ]
    }

    fn play_one<S: Storage>(game: &mut Game<S, LogNotifier>) {
        game.handle_input(InputEvent::Restart);
        for _ in 0..MAX_FRAMES {
            if matches!(game.phase(), GamePhase::Over { .. }) {
                return;
            }
            for event in autopilot(game.state()) {
                game.handle_input(event);
            }
            game.frame(FRAME_MS);
        }
        log::warn!("Frame cap reached on wave {}", game.state().wave);
        game.teardown();
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
        let games: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

        let data_dir = std::env::var("SPACE_INVADERS_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        log::info!("Space Invaders (native) starting, data in {}", data_dir);

        let mut game = Game::new(seed, FileStorage::new(data_dir), LogNotifier);
        for n in 1..=games {
            play_one(&mut game);
            match game.summary() {
                Some(summary) => println!(
                    "game {}: {} on wave {}, score {}{}",
                    n,
                    if summary.victory { "victory" } else { "defeat" },
                    summary.wave,
                    summary.score,
                    if summary.new_high_score { " (new high score)" } else { "" },
                ),
                None => println!("game {}: unfinished", n),
            }
        }
        println!("high score: {}", game.high_score());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `platform::web::WebGame`
}
