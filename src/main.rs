//! Headless runner: plays autopilot runs and keeps the score file up to date

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use asteroids::persistence::{JsonFileStore, ScoreStore};
    use asteroids::sim::GamePhase;
    use asteroids::{GameController, Settings};
    use clap::{Parser, Subcommand};

    #[derive(Parser, Debug)]
    #[command(name = "asteroids")]
    #[command(about = "Headless Asteroids runs on autopilot, with a persistent leaderboard")]
    struct Cli {
        /// Score file (high score + leaderboard)
        #[arg(long, default_value = "asteroids-scores.json")]
        scores: PathBuf,
        /// Settings file; missing or invalid means defaults
        #[arg(long, default_value = "asteroids-settings.json")]
        settings: PathBuf,
        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand, Debug)]
    enum Commands {
        /// Play runs on autopilot until game over or the tick budget runs out
        Play {
            /// Seed of the first run; later runs count up from it
            #[arg(long)]
            seed: Option<u64>,
            #[arg(long, default_value_t = 1)]
            runs: u32,
            /// Per-run budget (60 ticks = 1 simulated second)
            #[arg(long, default_value_t = 36_000)]
            max_ticks: u64,
            /// Leaderboard name for finished runs
            #[arg(long)]
            name: Option<String>,
            /// Skip explosion particles
            #[arg(long)]
            no_particles: bool,
        },
        /// Print the leaderboard
        Leaderboard {
            #[arg(long, default_value_t = 10)]
            top: usize,
        },
        /// Write the current settings (or defaults) back to the settings file
        InitSettings,
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let settings = Settings::load_or_default(&cli.settings);
        let store = JsonFileStore::new(&cli.scores);

        match cli.command {
            Commands::Play {
                seed,
                runs,
                max_ticks,
                name,
                no_particles,
            } => {
                if runs == 0 {
                    return Err(anyhow!("--runs must be >= 1"));
                }
                let mut settings = settings;
                if no_particles {
                    settings.particles = false;
                }
                let base_seed = seed.unwrap_or_else(|| settings.run_seed());
                play(settings, store, base_seed, runs, max_ticks, name.as_deref())
            }
            Commands::Leaderboard { top } => print_leaderboard(&store, top),
            Commands::InitSettings => {
                settings
                    .save_to(&cli.settings)
                    .with_context(|| format!("writing {}", cli.settings.display()))?;
                println!("Wrote {}", cli.settings.display());
                Ok(())
            }
        }
    }

    fn play(
        settings: Settings,
        mut store: JsonFileStore,
        base_seed: u64,
        runs: u32,
        max_ticks: u64,
        name: Option<&str>,
    ) -> Result<()> {
        for i in 0..runs {
            let seed = base_seed.wrapping_add(i as u64);
            let run_settings = Settings {
                seed: Some(seed),
                ..settings.clone()
            };
            let mut game = GameController::new(run_settings, store);
            game.set_autopilot(true);
            game.start();

            for _ in 0..max_ticks {
                if game.frame().level_cleared {
                    log::debug!("seed {}: reached level {}", seed, game.state().level);
                }
                if game.phase() == GamePhase::Over {
                    break;
                }
            }

            let state = game.state();
            let status = if game.phase() == GamePhase::Over {
                "game over"
            } else {
                "out of ticks"
            };
            println!(
                "seed {:>20}  score {:>7}  level {:>3}  ticks {:>7}  {}",
                seed, state.score, state.level, state.time_ticks, status
            );

            if let Some(name) = name {
                if game.can_submit() {
                    game.submit_score(name)?;
                } else {
                    log::info!("seed {}: run unfinished, not submitted", seed);
                }
            }
            store = game.into_store();
        }

        print_leaderboard(&store, 10)
    }

    fn print_leaderboard(store: &JsonFileStore, top: usize) -> Result<()> {
        let board = store
            .leaderboard()
            .with_context(|| format!("reading {}", store.path().display()))?;
        let high_score = store.high_score()?;

        println!("High score: {}", high_score);
        if board.is_empty() {
            println!("No leaderboard entries yet");
            return Ok(());
        }
        for (rank, entry) in board.ranked().into_iter().take(top).enumerate() {
            println!("{:>3}. {:<20} {:>7}", rank + 1, entry.name, entry.score);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry is `wasm::wasm_start` in the library
}
