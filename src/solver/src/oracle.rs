use std::{
    fs,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    thread::available_parallelism,
};

use cube_core::NotationError;
use itertools::Itertools;
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::OracleConfig;

/// Something that finds a solution for a cube state.
pub trait SolvingOracle {
    /// Solves the cube given as a 54 character `U R F D L B` facelet string,
    /// returning the solution as whitespace separated moves in the oracle's
    /// own notation. The result is normalized with [`normalize_solution`]
    /// before use.
    fn solve(&mut self, encoding: &str) -> Result<String, OracleError>;
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Failed to communicate with the solver: {0}")]
    Io(#[from] std::io::Error),
    #[error("The solver exited unexpectedly")]
    Exited,
    #[error("The solver rejected the cube, it was probably scanned incorrectly: {0}")]
    Rejected(String),
    #[error("The solver panicked: {0}")]
    Panicked(String),
    #[error("The solver returned an unreadable solution: {0}")]
    MalformedSolution(#[source] NotationError),
    #[error("The solver's solution `{0}` does not solve the cube")]
    IncorrectSolution(String),
}

/// Rewrites a solver's answer into this crate's move notation: primes become
/// `i` and move counts such as `(17)` or `17f` are dropped.
#[must_use]
pub fn normalize_solution(text: &str) -> String {
    text.replace('\'', "i")
        .replace(['(', ')'], " ")
        .split_whitespace()
        .filter(|token| !token.starts_with(|c: char| c.is_ascii_digit()))
        .join(" ")
}

struct TwophaseProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Drives an interactive two-phase solver (`twophase`, rob-twophase's
/// command line) as a child process. The process is started on first use and
/// reused for every later solve.
pub struct TwophaseOracle {
    config: OracleConfig,
    process: Option<TwophaseProcess>,
}

impl TwophaseOracle {
    #[must_use]
    pub fn new(config: OracleConfig) -> TwophaseOracle {
        TwophaseOracle {
            config,
            process: None,
        }
    }

    fn table_dir(&self) -> PathBuf {
        if let Some(dir) = &self.config.table_dir {
            return dir.clone();
        }

        match dirs::cache_dir() {
            Some(mut cache) => {
                cache.push("twophase-tables");
                cache
            }
            None => {
                warn!(target: "oracle", "No cache directory available; using the temporary directory for solver tables");
                std::env::temp_dir().join("twophase-tables")
            }
        }
    }

    fn threads(&self) -> usize {
        if let Some(threads) = self.config.threads {
            return threads;
        }

        match available_parallelism() {
            Ok(v) => v.get(),
            Err(e) => {
                warn!(target: "oracle", "Failed to get available parallelism, using 1 thread: {e}");
                1
            }
        }
    }

    fn spawn(&self) -> Result<TwophaseProcess, OracleError> {
        // The solver dumps its tables into its working directory
        let tables = self.table_dir();
        fs::create_dir_all(&tables)?;

        info!(
            target: "oracle",
            "Starting {} with tables in {}",
            self.config.program.display(),
            tables.display()
        );

        let mut command = Command::new(&self.config.program);
        command
            .current_dir(tables)
            .args(["-c", "-m"])
            .arg(self.config.max_length.to_string())
            .arg("-t")
            .arg(self.threads().to_string());
        TwophaseProcess::start(command)
    }
}

impl TwophaseProcess {
    fn start(mut command: Command) -> Result<TwophaseProcess, OracleError> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(OracleError::Exited);
        };

        Ok(TwophaseProcess {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn read_line(&mut self) -> Result<String, OracleError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(OracleError::Exited);
        }
        Ok(line.trim_end().to_owned())
    }

    /*
    The solver's prompt looks like

    ```
    Loading tables ...
    Done. 0.518s

    Enter >>solve FACECUBE<< to solve, >>scramble<< to scramble or >>bench<< to benchmark.

    Ready!
    solve LBDLULDDURDRRRFRURBFFRFBFRDLDBDDBDFBBULRLFFBUFLUUBUULL
    30.177ms
    R F2 R' U R U2 F2 U2 F' D' R D2 L2 D2 L' U2 F2 (17)
    Ready!
    ```
    */
    fn solve(&mut self, encoding: &str) -> Result<String, OracleError> {
        loop {
            let line = self.read_line()?;
            if line == "Ready!" {
                break;
            }
            debug!(target: "oracle", "{line}");
        }

        writeln!(self.stdin, "solve {encoding}")?;
        self.stdin.flush()?;

        // Either the time taken or an error
        let timing = self.read_line()?;
        if timing.starts_with("Error") {
            return Err(OracleError::Rejected(timing));
        }
        debug!(target: "oracle", "Solved in {timing}");

        let solution = self.read_line()?;
        if solution.starts_with("Error") {
            return Err(OracleError::Rejected(solution));
        }
        Ok(solution)
    }
}

impl SolvingOracle for TwophaseOracle {
    fn solve(&mut self, encoding: &str) -> Result<String, OracleError> {
        let mut process = match self.process.take() {
            Some(process) => process,
            None => self.spawn()?,
        };

        // A process that failed or panicked is dropped, which stops it, and a
        // fresh one is started next time
        let result = process.solve(encoding);
        if !matches!(result, Err(OracleError::Io(_) | OracleError::Exited)) {
            self.process = Some(process);
        }
        result
    }
}

impl Drop for TwophaseProcess {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            warn!(target: "oracle", "Failed to stop the solver: {e}");
        }
        let _ = self.child.wait();
    }
}
