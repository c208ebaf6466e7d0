use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use orbitrace::cli::{self, Args};
use orbitrace::plugins::SimulationPlugin;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_integrators {
        cli::handle_list_integrators();
        return ExitCode::SUCCESS;
    }

    if args.list_scenarios {
        cli::handle_list_scenarios();
        return ExitCode::SUCCESS;
    }

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.save_config {
        match config.save_to_user_config() {
            Ok(path) => println!("Saved configuration to: {}", path.display()),
            Err(e) => eprintln!("Warning: {e}"),
        }
    }

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };

    let exit = App::new()
        .add_plugins((
            LogPlugin {
                level,
                ..default()
            },
            SimulationPlugin::with_config(config).with_options(cli::run_options(&args)),
        ))
        .run();

    if exit.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
