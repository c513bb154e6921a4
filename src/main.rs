use clap::Parser;

use tinylink::cli::{Cli, Commands};
use tinylink::config::init_config;
use tinylink::runtime::modes::{run_cli, run_server};
use tinylink::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            // guard 需要存活到进程结束，保证日志刷盘
            let _guard = init_logging(&config.logging)?;
            run_server(config).await
        }
        command => {
            if let Err(e) = run_cli(command, &config) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
