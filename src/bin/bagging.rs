use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{arg, ArgMatches, Command};
use u_bagging::parse::read_problem;
use u_bagging::search::{SearchConfig, Solver};

const EXIT_USAGE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;
const EXIT_FAILURE: u8 = 1;

fn cli() -> Command {
    Command::new("bagging")
        .about("Packs items into capacity-bounded bags respecting compatibility rules")
        .arg(arg!(<INPUT> "Problem file").value_parser(clap::value_parser!(PathBuf)))
        .arg(
            arg!(<SECONDS> "Time limit per attempt, in seconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--attempts [ATTEMPTS] "Random restarts before giving up")
                .default_value("10")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--seed [SEED] "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(arg!(-v --verbose ... "More log output (repeatable)"))
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let matches = match cli().try_get_matches() {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            eprintln!("Usage: bagging <INPUT> <SECONDS>");
            return ExitCode::from(EXIT_USAGE);
        }
    };
    init_logging(&matches);

    let Some(path) = matches.get_one::<PathBuf>("INPUT") else {
        return ExitCode::from(EXIT_USAGE);
    };
    let Some(&seconds) = matches.get_one::<u64>("SECONDS") else {
        return ExitCode::from(EXIT_USAGE);
    };

    let problem = match read_problem(path) {
        Ok(p) => Arc::new(p),
        Err(e) if e.is_not_found() => {
            eprintln!("Failed to read file: {}", path.display());
            return ExitCode::from(EXIT_NOT_FOUND);
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let mut config = SearchConfig::default().with_time_limit_secs(seconds);
    if let Some(&attempts) = matches.get_one::<usize>("attempts") {
        config = config.with_max_attempts(attempts);
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }

    log::info!(
        "{} items, {} bags of capacity {}",
        problem.item_count(),
        problem.bag_count(),
        problem.capacity()
    );

    match Solver::solve(&problem, &config) {
        Ok(report) if report.is_success() => {
            print!("{}", report.solution);
            ExitCode::SUCCESS
        }
        Ok(report) => {
            log::info!("best score {}", report.solution.total_score());
            println!("No solution found");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
