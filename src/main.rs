use clap::Parser;
use finance_flow::args::{Args, Command};
use finance_flow::{commands, Config, Result};
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, info, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().flow_home().path();
    let today = chrono::Local::now().date_naive();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.backend())?.print(),

        Command::Add(add_args) => {
            let mut store = Config::load(home)?.store()?;
            commands::insert_transaction(&mut store, add_args.clone(), today)?.print()
        }

        Command::Update(update_args) => {
            let mut store = Config::load(home)?.store()?;
            commands::update_transaction(&mut store, update_args.clone())?.print()
        }

        Command::Delete(delete_args) => {
            let mut store = Config::load(home)?.store()?;
            if !delete_args.yes() {
                // Unknown ids fall through to the command, which reports them.
                if let Some(transaction) = store.get(delete_args.id()) {
                    let confirmed = commands::confirm_delete(
                        &mut io::stdin().lock(),
                        &mut io::stderr(),
                        &transaction,
                    )?;
                    if !confirmed {
                        info!("Cancelled");
                        return Ok(());
                    }
                }
            }
            commands::delete_transaction(&mut store, delete_args.clone())?.print()
        }

        Command::List(list_args) => {
            let store = Config::load(home)?.store()?;
            commands::list_transactions(&store, list_args.clone())?.print()
        }

        Command::Summary(summary_args) => {
            let store = Config::load(home)?.store()?;
            commands::summary(&store, summary_args.clone(), today)?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                "finance_flow",
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
