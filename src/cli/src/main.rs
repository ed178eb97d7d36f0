mod render;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Context, eyre};
use cube_core::{CUBIES, CubeState, CubieId, MoveEngine, format_sequence, random_sequence};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};
use owo_colors::OwoColorize;
use solver::{Scan, Solver, SolverConfig, TwophaseOracle};

/// Solves Rubik's Cubes, optionally without ever turning chosen pieces
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The solver configuration file to use, in TOML format.
    #[arg(
        long,
        short = 'c',
        default_value = "solver_config.toml",
        value_name = "SOLVER_CONFIG"
    )]
    config: PathBuf,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube, keeping the pieces given with --fix in place
    Solve {
        /// The cube as 54 facelet labels in U R F D L B face order
        state: Option<String>,
        /// Read the cube from a TOML file of sticker colours instead
        #[arg(long, conflicts_with = "state")]
        scan: Option<PathBuf>,
        /// A piece that must not move, given by any of its facelet numbers
        /// (see the `cubie` subcommand). Can be repeated.
        #[arg(short, long = "fix", value_name = "FACELET")]
        fix: Vec<CubieId>,
        /// Print the cube after every move of the solution
        #[arg(long)]
        play: bool,
    },
    /// Apply a move sequence, e.g. "R U' F2 Mi", and print the result
    Apply {
        /// The move sequence to apply
        sequence: String,
        /// The cube to start from, in the same format as `solve`; defaults to
        /// a solved cube
        #[arg(long)]
        state: Option<String>,
    },
    /// Generate a random scramble
    Scramble {
        /// Number of moves
        #[arg(long, default_value_t = 20)]
        length: usize,
        /// Seed for reproducible scrambles
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the facelets and restricted faces of a piece, or the facelet
    /// numbering if no piece is given
    Cubie {
        /// Any facelet number of the piece
        id: Option<CubieId>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = SolverConfig::load(&cli.config)?;

    match cli.command {
        Commands::Solve {
            state,
            scan,
            fix,
            play,
        } => {
            let state = match (state, scan) {
                (Some(state), _) => CubeState::from_canonical(&state)?,
                (None, Some(path)) => Scan::load(&path)
                    .wrap_err_with(|| format!("Failed to load the scan {}", path.display()))?
                    .to_state(&config.colors)?,
                (None, None) => return Err(eyre!("Give either a cube state or --scan")),
            };
            run_solve(&config, &state, &fix, play)?;
        }
        Commands::Apply { sequence, state } => {
            let state = match state {
                Some(state) => CubeState::from_canonical(&state)?,
                None => CubeState::solved(),
            };
            let mut engine = MoveEngine::new(state);
            engine.apply_notation(&sequence)?;
            println!("{}", render::net(engine.state(), &config.colors, &[]));
            println!("{}", engine.state().canonical_string());
        }
        Commands::Scramble { length, seed } => {
            let mut rng = match seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let scramble = random_sequence(&mut rng, length);
            let mut engine = MoveEngine::default();
            engine.apply_all(&scramble);

            println!("{}", format_sequence(&scramble));
            println!("{}", render::net(engine.state(), &config.colors, &[]));
            println!("{}", engine.state().canonical_string());
        }
        Commands::Cubie { id: None } => {
            print!("{}", render::numbering());
        }
        Commands::Cubie { id: Some(id) } => {
            let facelets = CUBIES.facelets_for(id);
            println!(
                "{id} is a {} with facelets {}",
                CUBIES.kind(id),
                facelets
                    .iter()
                    .map(|facelet| CubieId::from_facelet(*facelet))
                    .join(", ")
            );
            println!("Restricted faces: {}", CUBIES.restricted_faces(&[id]));
            println!(
                "{}",
                render::net(&CubeState::solved(), &config.colors, &facelets)
            );
        }
    }

    Ok(())
}

fn run_solve(
    config: &SolverConfig,
    state: &CubeState,
    fixed: &[CubieId],
    play: bool,
) -> color_eyre::Result<()> {
    let fixed_facelets = CUBIES.fixed_facelets(fixed);
    println!("{}", render::net(state, &config.colors, &fixed_facelets));

    let mut solver = Solver::new(TwophaseOracle::new(config.oracle.clone()));
    let solution = solver.solve(state, fixed)?;

    if solution.adapted.is_empty() {
        println!("{}", "Already solved".green());
        return Ok(());
    }

    println!("Solution ({} moves): {}", solution.raw.len(), format_sequence(&solution.raw));
    if !solution.restricted.is_empty() {
        println!("Restricted faces: {}", solution.restricted);
    }
    println!(
        "Adapted solution ({} moves): {}",
        solution.adapted.len(),
        format_sequence(&solution.adapted).bold()
    );

    let mut engine = MoveEngine::new(state.clone());
    let mut playback = solution.playback();
    while playback.apply_next(&mut engine).is_some() {
        if play {
            println!("{playback}");
            println!("{}", render::net(engine.state(), &config.colors, &fixed_facelets));
        }
    }

    if engine.state().is_solved_in_any_orientation() {
        info!("Solved in {} moves", engine.move_count());
        println!("{}", "Solved".green());
        Ok(())
    } else {
        Err(eyre!("The adapted solution did not solve the cube"))
    }
}
