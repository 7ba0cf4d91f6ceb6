use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use tinylink::cli::{Cli, Commands};
use tinylink::config::StaticConfig;
use tinylink::runtime::modes::run_server;
use tinylink::system::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = StaticConfig::load(cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::GenerateConfig { output } => match config.save_to_file(&output) {
            Ok(()) => {
                println!("{} Sample configuration written to {}", "[OK]".green().bold(), output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e.format_colored());
                ExitCode::FAILURE
            }
        },
        Commands::Serve => {
            // guard 需要存活到进程结束，保证日志刷盘
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
                    return ExitCode::FAILURE;
                }
            };

            tracing::info!("Initializing service");
            match run_server(&config).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!("Server failed: {:#}", e);
                    eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
