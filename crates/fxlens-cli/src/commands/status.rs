use fxlens_core::{Analyzer, ApiStatus};
use serde_json::json;

use crate::cli::Cli;
use crate::error::CliError;

use super::{resolver_config, CommandResult};

pub async fn run(cli: &Cli, analyzer: &Analyzer) -> Result<CommandResult, CliError> {
    let status = analyzer.probe().await;
    let degraded = matches!(status, ApiStatus::Degraded { .. });
    let result = CommandResult::ok(json!({
        "provider": analyzer.rate_source().provider().id(),
        "base_url": resolver_config(cli).api_base_url,
        "api": status,
    }));
    Ok(if degraded {
        result.with_warning("remote rates unavailable, results will use local tiers")
    } else {
        result
    })
}
