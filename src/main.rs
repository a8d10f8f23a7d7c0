use clap::Parser;
use finsight::args::{
    Args, Command, DeleteSubcommand, InsertSubcommand, SettingsSubcommand,
};
use finsight::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().finsight_home().path();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.clone()).await?.print(),

        Command::Report(report_args) => {
            let config = Config::load(home).await?;
            let out = commands::report(config, report_args.clone()).await?;
            if report_args.json {
                out.print_json()?
            } else {
                out.print()
            }
        }

        Command::Insert(insert_args) => {
            let config = Config::load(home).await?;
            match insert_args.entity() {
                InsertSubcommand::Transaction(args) => {
                    commands::insert_transaction(config, args.clone())
                        .await?
                        .print()
                }
                InsertSubcommand::Debt(args) => {
                    commands::insert_debt(config, args.clone()).await?.print()
                }
            }
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            match delete_args.entity() {
                DeleteSubcommand::Transactions(args) => {
                    commands::delete_transactions(config, args.clone())
                        .await?
                        .print()
                }
            }
        }

        Command::Settings(settings_args) => {
            let config = Config::load(home).await?;
            match settings_args.action() {
                SettingsSubcommand::Show => commands::settings_show(config).await?.print(),
                SettingsSubcommand::Set(args) => {
                    commands::settings_set(config, args.clone()).await?.print()
                }
            }
        }
    };
    Ok(())
}

/// Sends log output to stderr. RUST_LOG, when set, replaces the `--log-level` filter entirely.
pub fn init_logger(level: LevelFilter) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        // only this crate's targets, so dependencies stay quiet
        EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME")))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
