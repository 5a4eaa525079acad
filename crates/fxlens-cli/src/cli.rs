//! CLI argument definitions for fxlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rate` | Resolve the current rate for a pair |
//! | `history` | Daily rate series ending today |
//! | `analyze` | Rate, series and statistics, optionally recorded |
//! | `conversions` | Recorded conversions of a user |
//! | `favorites` | Manage saved pairs |
//! | `currencies` | List supported currencies |
//! | `status` | Check the remote rate source |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Never contact the remote source |
//! | `--seed` | none | Seed for synthetic rates |
//! | `--timeout-ms` | `3000` | Remote request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! fxlens rate USD EUR --amount 250
//! fxlens history GBP JPY --days 30 --format table
//! fxlens analyze USD EUR --amount 100 --user alice --pretty
//! fxlens --offline --seed 7 history SEK NOK
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// fxlens - exchange rates with offline fallback
#[derive(Debug, Parser)]
#[command(
    name = "fxlens",
    author,
    version,
    about = "Exchange rates, history and statistics with offline fallback",
    long_about = "fxlens resolves currency exchange rates from a free public API and falls back \
to a built-in rate table or synthetic data when the API is unreachable. Every rate reports \
where it came from (live, fallback-table or synthetic).\n\
\n\
Use 'fxlens <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Skip the remote source and use local rates only.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Seed for synthetic rate generation, for reproducible output.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Remote request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 3000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the current rate for a currency pair.
    ///
    /// # Examples
    ///
    ///   fxlens rate USD EUR
    ///   fxlens rate GBP JPY --amount 250
    Rate(RateArgs),

    /// Daily rate series ending today.
    ///
    /// # Examples
    ///
    ///   fxlens history USD EUR
    ///   fxlens history USD EUR --days 30
    History(HistoryArgs),

    /// Current rate, history and statistics in one run.
    ///
    /// With --user the conversion is recorded in the local store.
    Analyze(AnalyzeArgs),

    /// Show recorded conversions of a user, newest first.
    Conversions(ConversionsArgs),

    /// Manage favorite currency pairs.
    Favorites(FavoritesArgs),

    /// List supported currencies.
    Currencies,

    /// Check whether the remote rate source is reachable.
    Status,
}

#[derive(Debug, Args)]
pub struct PairArgs {
    /// Base currency code (e.g., USD).
    pub base: String,

    /// Target currency code (e.g., EUR).
    pub target: String,
}

#[derive(Debug, Args)]
pub struct RateArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Amount of base currency to convert.
    #[arg(long, default_value_t = 1.0)]
    pub amount: f64,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Number of days, today included (1 to 366).
    #[arg(long, default_value_t = 7)]
    pub days: usize,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Amount of base currency to convert.
    #[arg(long, default_value_t = 1.0)]
    pub amount: f64,

    /// Number of days of history.
    #[arg(long, default_value_t = 7)]
    pub days: usize,

    /// Record the conversion for this user.
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConversionsArgs {
    /// User whose conversions to list.
    #[arg(long)]
    pub user: String,

    /// Maximum number of entries.
    #[arg(long, default_value_t = fxlens_core::DEFAULT_HISTORY_LIMIT)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    /// Owner of the favorites.
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Save a pair.
    Add(PairArgs),
    /// List saved pairs.
    List,
    /// Remove a saved pair by id.
    Remove(FavoriteRemoveArgs),
}

#[derive(Debug, Args)]
pub struct FavoriteRemoveArgs {
    /// Favorite id as printed by `favorites list`.
    pub id: String,
}
