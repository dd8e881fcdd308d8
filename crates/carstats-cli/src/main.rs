//! CarStats CLI - derived analytics for vehicle datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Clean {
            file,
            multiplier,
            output,
            json,
        } => commands::clean::run(file, multiplier, output, json),

        Commands::Trend {
            file,
            multiplier,
            json,
        } => commands::trend::run(file, multiplier, json),

        Commands::Correlate {
            file,
            fuel,
            engine,
            multiplier,
            json,
        } => commands::correlate::run(file, fuel, engine, multiplier, json),

        Commands::Rank {
            file,
            metric,
            driveline,
            transmission,
            filter,
            limit,
            multiplier,
            json,
        } => {
            let options = commands::rank::RankOptions {
                metric,
                driveline,
                transmission,
                filter,
                limit,
                multiplier,
            };
            commands::rank::run(file, options, json)
        }

        Commands::Options { file, all, json } => commands::options::run(file, all, json),

        Commands::Report {
            file,
            multiplier,
            fuel,
            engine,
            metric,
            limit,
            driveline,
            transmission,
            filter,
            output,
            json,
        } => {
            let options = commands::report::ReportOptions {
                multiplier,
                fuel,
                engine,
                metric,
                limit,
                driveline,
                transmission,
                filter,
            };
            commands::report::run(file, options, output, json)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
