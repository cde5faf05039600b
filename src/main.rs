//! Pico Pong native entry point
//!
//! Runs the match headless with scripted input and prints the final score.
//! The browser build enters through `web::start` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use pico_pong::platform::HeadlessHost;
    use pico_pong::{ConfigError, Game, Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "pico-pong", about = "Headless Pico Pong match")]
    pub struct Args {
        /// Frames to simulate
        #[arg(long, default_value_t = 3600)]
        pub frames: u64,

        /// Simulated frame rate
        #[arg(long, default_value_t = pico_pong::consts::TARGET_FPS)]
        pub fps: u32,

        /// RNG seed (defaults to the clock)
        #[arg(long)]
        pub seed: Option<u64>,

        /// Tuning JSON file
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Hand the right paddle to the AI once play starts
        #[arg(long)]
        pub autoplay: bool,
    }

    pub fn run(args: Args) -> Result<(), ConfigError> {
        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        let mut host = HeadlessHost::new(settings.bindings.clone(), args.frames)
            .with_frame_time(1.0 / args.fps.max(1) as f32);
        let skip = first_code(&settings.bindings.skip_intro);
        let start = first_code(&settings.bindings.start);
        if let Some(code) = skip {
            host.press(0, code);
        }
        if let Some(code) = start {
            host.press(2, code);
        }
        if args.autoplay {
            if let Some(code) = first_code(&settings.bindings.toggle_ai) {
                host.hold(0, code);
            }
        }

        let mut game = Game::new(settings, tuning, seed);
        let frames = game.run(&mut host);

        println!(
            "{frames} frames, phase {:?}: computer {:04} - human {:04}",
            game.state.phase, game.state.computer.score, game.state.human.score
        );
        Ok(())
    }

    fn first_code(codes: &[String]) -> Option<&str> {
        codes.first().map(String::as_str)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Pico Pong (native) starting...");

    if let Err(e) = native::run(native::Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
