//! These structs provide the CLI interface for the flow CLI.

use crate::config::BackendKind;
use crate::form::TransactionForm;
use crate::model::TransactionType;
use crate::query::SortBy;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// flow: A command-line tool for tracking personal income and expenses.
///
/// Record transactions as you spend and earn, browse and search your history, and see how much
/// came in and went out over each of the last six months.
///
/// Run `flow init` once to create the data directory before using the other commands.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// By default data is kept in $HOME/finance-flow. Pass --flow-home or set FLOW_HOME to keep it
    /// somewhere else.
    Init(InitArgs),
    /// Record a new income or expense transaction.
    Add(AddArgs),
    /// Change one or more fields of an existing transaction.
    Update(UpdateArgs),
    /// Delete a transaction.
    Delete(DeleteArgs),
    /// Show the transaction history, optionally filtered and sorted.
    List(ListArgs),
    /// Show monthly income and expenses for the last six months along with overall totals.
    Summary(SummaryArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where flow data and configuration is held. Defaults to ~/finance-flow
    #[arg(long, env = "FLOW_HOME", default_value_t = default_flow_home())]
    flow_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, flow_home: PathBuf) -> Self {
        Self {
            log_level,
            flow_home: flow_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn flow_home(&self) -> &DisplayPath {
        &self.flow_home
    }
}

/// Args for the `flow init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Where to store transactions: JSON files or an SQLite database.
    #[arg(long, value_enum, default_value_t = BackendKind::File)]
    backend: BackendKind,
}

impl InitArgs {
    pub fn new(backend: BackendKind) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }
}

/// Args for the `flow add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount, as a positive number, e.g. 12.50 or $1,200. Expenses are stored as negative
    /// amounts automatically.
    #[arg(long, allow_hyphen_values = true)]
    amount: String,

    /// The date of the transaction as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<String>,

    /// What the transaction was for.
    #[arg(long)]
    description: String,

    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    kind: TransactionType,
}

impl AddArgs {
    pub fn new(
        amount: impl Into<String>,
        date: Option<String>,
        description: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            amount: amount.into(),
            date,
            description: description.into(),
            kind,
        }
    }

    /// The arguments as an unvalidated form.
    pub fn form(&self) -> TransactionForm {
        TransactionForm {
            amount: Some(self.amount.clone()),
            date: self.date.clone(),
            description: Some(self.description.clone()),
            kind: Some(self.kind),
        }
    }
}

/// Args for the `flow update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The ID of the transaction to change.
    id: String,

    /// The new amount, as a positive number.
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// The new date as YYYY-MM-DD.
    #[arg(long)]
    date: Option<String>,

    /// The new description.
    #[arg(long)]
    description: Option<String>,

    /// The new type. The sign of the stored amount follows the type.
    #[arg(long = "type", value_enum)]
    kind: Option<TransactionType>,
}

impl UpdateArgs {
    pub fn new(id: impl Into<String>, form: TransactionForm) -> Self {
        Self {
            id: id.into(),
            amount: form.amount,
            date: form.date,
            description: form.description,
            kind: form.kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The given fields as an unvalidated form. Fields that were not passed are `None`.
    pub fn form(&self) -> TransactionForm {
        TransactionForm {
            amount: self.amount.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            kind: self.kind,
        }
    }
}

/// Args for the `flow delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction to delete.
    id: String,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>, yes: bool) -> Self {
        Self { id: id.into(), yes }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `flow list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Only show transactions whose description contains this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// The order to show transactions in.
    #[arg(long, value_enum, default_value_t = SortBy::Date)]
    sort: SortBy,
}

impl ListArgs {
    pub fn new(search: Option<String>, sort: SortBy) -> Self {
        Self { search, sort }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> SortBy {
        self.sort
    }
}

/// Args for the `flow summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// Summarize the six months ending in the month of this date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<chrono::NaiveDate>,
}

impl SummaryArgs {
    pub fn new(as_of: Option<chrono::NaiveDate>) -> Self {
        Self { as_of }
    }

    pub fn as_of(&self) -> Option<chrono::NaiveDate> {
        self.as_of
    }
}

fn default_flow_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("finance-flow"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --flow-home or FLOW_HOME instead of relying on the default \
                flow home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("finance-flow")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
