use fxlens_core::{convert, Analyzer, CurrencyPair};
use serde_json::json;

use crate::cli::RateArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &RateArgs, analyzer: &Analyzer) -> Result<CommandResult, CliError> {
    let pair = CurrencyPair::parse(&args.pair.base, &args.pair.target)?;
    let quote = analyzer.resolve_current(&pair).await;
    let converted_amount = convert(args.amount, &quote)?;

    let mut result = CommandResult::ok(json!({
        "pair": pair.to_string(),
        "rate": quote.rate,
        "provenance": quote.provenance,
        "as_of": quote.as_of,
        "amount": args.amount,
        "converted_amount": converted_amount,
    }));
    if !quote.provenance.is_live() {
        result = result.with_warning(format!(
            "live rate unavailable, showing {} value",
            quote.provenance
        ));
    }
    Ok(result)
}
