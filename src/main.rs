// packup-rs: Modpack Update & Release Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   (default) Update | List | Options | Configs | Version
//! ```

use std::process::ExitCode;

use packup_rs::cli::global::GlobalOptions;
use packup_rs::cli::{self, Cli, Command};
use packup_rs::cmd::config::{run_configs_command, run_options_command};
use packup_rs::cmd::list::run_list_command;
use packup_rs::cmd::update::run_update_command;
use packup_rs::config::Config;
use packup_rs::config::loader::ConfigLoader;
use packup_rs::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let files = loader.loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard: LogGuard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Some(Command::Version) => Ok(()),
        Some(Command::Options) => {
            run_options_command(&config);
            Ok(())
        }
        Some(Command::Configs) => {
            run_configs_command(&files);
            Ok(())
        }
        Some(Command::List(args)) => run_list_command(args, &config),
        None => run_update_command(&config, cli.skip_commit).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

/// Defaults, `packup.toml`, `--config` files, `PACKUP_*`, then CLI flags.
fn build_config_loader(cli: &Cli) -> packup_rs::error::Result<ConfigLoader> {
    let global: &GlobalOptions = &cli.global;
    let mut loader = ConfigLoader::new().add_toml_file_optional("packup.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    let push = cli.push.map(|policy| ("release.push", policy.to_string()));
    loader
        .with_env_prefix("PACKUP")
        .set_all(global.to_config_overrides().into_iter().chain(push))
}
