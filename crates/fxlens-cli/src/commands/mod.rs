mod analyze;
mod conversions;
mod currencies;
mod favorites;
mod history;
mod rate;
mod status;

use std::sync::Arc;
use std::time::Instant;

use fxlens_core::{Analyzer, ConversionStore, ResolverConfig, Warehouse, WarehouseConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::{Envelope, Metadata};

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let started = Instant::now();

    let (name, command_result) = match &cli.command {
        Command::Rate(args) => ("rate", rate::run(args, &analyzer(cli, None)).await?),
        Command::History(args) => ("history", history::run(args, &analyzer(cli, None)).await?),
        Command::Analyze(args) => ("analyze", analyze::run(args, cli).await?),
        Command::Conversions(args) => ("conversions", conversions::run(args)?),
        Command::Favorites(args) => ("favorites", favorites::run(args)?),
        Command::Currencies => ("currencies", currencies::run()?),
        Command::Status => ("status", status::run(cli, &analyzer(cli, None)).await?),
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = Metadata::new(name, latency_ms, cli.offline);
    for warning in command_result.warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope {
        meta,
        data: command_result.data,
    })
}

pub(crate) fn resolver_config(cli: &Cli) -> ResolverConfig {
    ResolverConfig::from_env().with_request_timeout_ms(cli.timeout_ms)
}

pub(crate) fn analyzer(cli: &Cli, store: Option<Arc<dyn ConversionStore>>) -> Analyzer {
    let mut builder = Analyzer::builder()
        .with_config(resolver_config(cli))
        .with_offline(cli.offline);
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(store) = store {
        builder = builder.with_store(store);
    }
    builder.build()
}

pub(crate) fn open_warehouse() -> Result<Warehouse, CliError> {
    Ok(Warehouse::open(WarehouseConfig::default())?)
}
