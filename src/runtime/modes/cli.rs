//! CLI mode
//!
//! One-shot link management directly against the local store. The server
//! must not be running, redb allows a single process per database file.

use std::path::Path;

use colored::Colorize;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::{Result, TinylinkError};
use crate::runtime::lifetime::startup::open_link_service;
use crate::services::CreateLinkRequest;

/// Run a CLI command from clap-parsed input
pub fn run_cli(command: Commands, config: &StaticConfig) -> Result<()> {
    match command {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => generate_config(output_path.as_deref(), force),
        Commands::Add { args, expiry } => {
            let (code, url) = Commands::parse_add_args(&args);
            let service = open_link_service(config)?;
            let generated = code.is_none();
            let code = service.create(CreateLinkRequest { code, url, expiry })?;
            if generated {
                println!("{} {}", "Created (generated code):".green(), code.bold());
            } else {
                println!("{} {}", "Created:".green(), code.bold());
            }
            Ok(())
        }
        Commands::Get { short_code } => {
            let service = open_link_service(config)?;
            match service.store().get_link(&short_code)? {
                Some(link) => {
                    println!("{} -> {}", link.code.bold(), link.target);
                    match link.expires_at {
                        Some(at) => println!("  expires at {}", at.to_rfc3339()),
                        None => println!("  never expires"),
                    }
                    Ok(())
                }
                None => Err(TinylinkError::not_found(format!(
                    "Link '{}' not found",
                    short_code
                ))),
            }
        }
        Commands::Remove { short_code } => {
            let service = open_link_service(config)?;
            service.remove(&short_code)?;
            println!("{} {}", "Removed:".green(), short_code.bold());
            Ok(())
        }
        Commands::Purge => {
            let service = open_link_service(config)?;
            let purged = service.store().purge_expired()?;
            println!("{} {} expired link(s)", "Purged".green(), purged);
            Ok(())
        }
        Commands::Serve => Err(TinylinkError::config(
            "serve is not a CLI command, run without a subcommand",
        )),
    }
}

fn generate_config(output_path: Option<&str>, force: bool) -> Result<()> {
    let sample = StaticConfig::generate_sample_config();

    let Some(path) = output_path else {
        print!("{}", sample);
        return Ok(());
    };

    if Path::new(path).exists() && !force {
        return Err(TinylinkError::config(format!(
            "{} already exists, use --force to overwrite",
            path
        )));
    }

    std::fs::write(path, sample)
        .map_err(|e| TinylinkError::config(format!("writing {}: {}", path, e)))?;
    println!("{} {}", "Configuration written to".green(), path);
    Ok(())
}
