use fxlens_core::{Analyzer, CurrencyPair, Period, Provenance};
use serde_json::json;

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &HistoryArgs, analyzer: &Analyzer) -> Result<CommandResult, CliError> {
    let pair = CurrencyPair::parse(&args.pair.base, &args.pair.target)?;
    let period = Period::new(args.days)?;
    let series = analyzer.resolve_series(&pair, period).await;

    let synthetic = series
        .points
        .iter()
        .filter(|point| point.provenance == Provenance::Synthetic)
        .count();
    let total = series.len();

    let result = CommandResult::ok(json!({
        "pair": pair.to_string(),
        "days": period.days(),
        "points": series.points,
    }));
    Ok(if synthetic > 0 {
        result.with_warning(format!("{synthetic} of {total} points are synthetic"))
    } else {
        result
    })
}
