use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pocketbook_core::{
    Budget, FileStore, NewTransaction, SENTINEL_CATEGORY, parse_amount, parse_date,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod category_cmd;
mod config;
mod state;
mod view;

use category_cmd::CategoryCommand;

#[derive(Parser, Debug)]
#[command(
    name = "pocketbook",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("POCKETBOOK_BUILD_SHA"), ")"),
    about = "Personal budget tracker"
)]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a transaction (positive = income, negative = expense)
    Add {
        description: String,

        /// Amount, e.g. 2500 or -40.5
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category name (default: Other)
        #[arg(long, short)]
        category: Option<String>,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Delete a transaction by id
    Remove { id: u64 },

    /// List transactions, newest first
    List {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Balance, income and expense totals
    Summary,

    /// Expense per category as a bar chart
    Chart {
        /// Bar width in characters (default from config)
        #[arg(long)]
        width: Option<usize>,
    },

    /// Full text report
    Report,

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    /// Manage ~/.pocketbook/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open() -> Result<(config::Config, Budget<FileStore>)> {
    let cfg = config::load_config()?;
    let budget = state::open_budget(&cfg)?;
    Ok((cfg, budget))
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Add {
            description,
            amount,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => chrono::Local::now().date_naive(),
            };
            let category = category.unwrap_or_else(|| SENTINEL_CATEGORY.to_string());
            let category = category.trim();

            let (cfg, mut budget) = open()?;
            if !budget.categories().contains(category) {
                eprintln!("note: '{category}' is not a registered category");
            }
            let txn = budget.add_transaction(NewTransaction::new(description, amount, category, date))?;
            println!("Added #{}", txn.id);
            println!("{}", view::transaction_line(&txn, &cfg.money()));
        }

        Command::Remove { id } => {
            let (_, mut budget) = open()?;
            match budget.remove_transaction(id)? {
                Some(txn) => println!("Deleted #{} ({})", txn.id, txn.description),
                None => println!("No transaction #{id}"),
            }
        }

        Command::List { limit } => {
            let (cfg, budget) = open()?;
            print!(
                "{}",
                view::transaction_list(budget.records().newest_first(), limit, &cfg.money())
            );
        }

        Command::Summary => {
            let (cfg, budget) = open()?;
            print!("{}", view::summary(&budget.summary(), &cfg.money()));
        }

        Command::Chart { width } => {
            let (cfg, budget) = open()?;
            let width = width.unwrap_or(cfg.display.chart_width);
            print!("{}", view::chart(&budget.chart(), width, &cfg.money()));
        }

        Command::Report => {
            let (cfg, budget) = open()?;
            print!("{}", budget.report(&cfg.money()));
        }

        Command::Category { command } => {
            let (cfg, mut budget) = open()?;
            category_cmd::run(command, &mut budget, &cfg.money())?;
        }

        Command::Config { command } => run_config(command)?,
    }

    Ok(())
}

fn run_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config()?,
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let text = toml::to_string_pretty(&cfg).context("serialize config")?;
            print!("{text}");
            println!("# data dir: {}", state::data_dir(&cfg)?.display());
        }
        ConfigCommand::Path => println!("{}", config::config_path()?.display()),
    }
    Ok(())
}
