use clap::Parser;
use env_logger::Env;
use gridbot::command::Input;
use gridbot::config::{Config, DEFAULT_CONFIG_PATH};
use gridbot::render::{outcome_report, AnsiRenderer, PlainRenderer, ViewRenderer};
use gridbot::{Grid, Robot};
use log::{error, info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// A robot simulation.
///
/// Reads commands from stdin, one per line:
/// left, right, up, down, turn_left, turn_right, turn_back, look, save, exit|stop|quit
#[derive(Parser, Debug)]
#[command(name = "gridbot")]
struct Args {
    /// The number of rows in a generated field
    #[arg(long)]
    n_rows: Option<i32>,

    /// The number of columns in a generated field
    #[arg(long)]
    n_cols: Option<i32>,

    /// The probability that a cell will be a barrier, in [0, 1]
    #[arg(long)]
    p: Option<f64>,

    /// The radius the robot can see
    #[arg(long)]
    radius: Option<i32>,

    /// The path to the JSON file storing the movement log
    #[arg(long)]
    logfile: Option<String>,

    /// Seed for the random field
    #[arg(long)]
    seed: Option<u64>,

    /// Load the field interior from a 0/1 text matrix instead of generating it
    #[arg(long)]
    grid_file: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Disable colored look output
    #[arg(long)]
    no_color: bool,
}

impl Args {
    /// Command-line flags win over the configuration file
    fn apply_to(&self, config: &mut Config) {
        if let Some(rows) = self.n_rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.n_cols {
            config.grid.cols = cols;
        }
        if let Some(p) = self.p {
            config.grid.barrier_probability = p;
        }
        if let Some(seed) = self.seed {
            config.grid.seed = Some(seed);
        }
        if let Some(path) = &self.grid_file {
            config.grid.file = Some(path.display().to_string());
        }
        if let Some(radius) = self.radius {
            config.robot.radius = radius;
        }
        if let Some(path) = &self.logfile {
            config.logging.movement_log_path = path.clone();
        }
        if self.no_color {
            config.display.color = false;
        }
    }
}

fn build_grid(config: &Config) -> gridbot::Result<Grid> {
    let grid = &config.grid;
    if let Some(path) = &grid.file {
        info!("Loading field from {}", path);
        return Grid::load_from_file(path);
    }

    match grid.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            Grid::generate_random_with(grid.rows, grid.cols, grid.barrier_probability, &mut rng)
        }
        None => Grid::generate_random(grid.rows, grid.cols, grid.barrier_probability),
    }
}

/// Install the logger; `RUST_LOG` overrides the configured level
fn init_logging(config: &Config) {
    let level = config.log_level();
    let default_level = level.unwrap_or(LevelFilter::Info).to_string();
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if level.is_none() {
        warn!("Unknown logging level '{}', using info", config.logging.level);
    }
}

fn run(config: Config) -> gridbot::Result<()> {
    let grid = build_grid(&config)?;
    let mut robot = Robot::new(config.robot.radius);
    robot.place_in_grid(grid)?;

    let renderer: Box<dyn ViewRenderer> = if config.display.color {
        Box::new(AnsiRenderer)
    } else {
        Box::new(PlainRenderer)
    };
    let log_path = &config.logging.movement_log_path;

    for line in io::stdin().lock().lines() {
        let line = line?;

        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(_) => {
                println!("wrong command");
                continue;
            }
        };

        match input {
            Input::Quit => break,
            Input::Command(command) => match robot.execute(command) {
                Ok(outcome) => println!("{}", outcome_report(&outcome)),
                Err(e) => error!("{} failed: {}", command, e),
            },
            Input::Look => match robot.look_around() {
                Ok(view) => println!("{}", renderer.render(&view)),
                Err(e) => error!("look failed: {}", e),
            },
            Input::Save => match robot.save_log(log_path) {
                Ok(()) => println!("Movement log saved to {}", log_path),
                Err(e) => error!("save failed: {}", e),
            },
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    // The logger level comes from the config, so reading it is reported afterwards
    let (mut config, source) = Config::read(&args.config);
    args.apply_to(&mut config);
    init_logging(&config);
    source.log(&args.config);

    if let Err(e) = run(config) {
        error!("{}", e);
        std::process::exit(1);
    }
}
