//! Command-line interface implementation

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::animation::render_animation;
use crate::gif::write_gif;

/// Process exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;

/// Milliseconds each animation frame is shown for.
const FRAME_DURATION_MS: u32 = 32;

/// Render a tabletop d20 dice roll as a looping animated GIF
#[derive(Parser)]
#[command(name = "d20roll")]
#[command(about = "Render a tabletop d20 dice roll as a looping animated GIF")]
#[command(version)]
pub struct Cli {
    /// Face to land on, 0-indexed (random when omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=19))]
    pub number: Option<u32>,

    /// Output GIF file name
    #[arg(short, long, default_value = "output.gif")]
    pub output: PathBuf,

    /// Directory holding the sprite sheets and background
    #[arg(short, long, default_value = "assets")]
    pub assets: PathBuf,

    /// Suppress console output
    #[arg(short, long)]
    pub silent: bool,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match run_roll(&cli) {
        Ok(outcome) => {
            if !cli.silent {
                println!(
                    "Dice roll animation saved to {} with number {}.",
                    cli.output.display(),
                    outcome + 1
                );
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Render the animation and write it out, returning the rolled outcome.
fn run_roll(cli: &Cli) -> Result<u32, Box<dyn std::error::Error>> {
    let animation = render_animation(&cli.assets, cli.number)?;
    write_gif(&animation.frames, FRAME_DURATION_MS, &cli.output)?;
    Ok(animation.outcome)
}
