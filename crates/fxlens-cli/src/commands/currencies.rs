use fxlens_core::SUPPORTED_CURRENCIES;
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CurrencyEntry {
    code: &'static str,
    name: &'static str,
}

pub fn run() -> Result<CommandResult, CliError> {
    let currencies: Vec<CurrencyEntry> = SUPPORTED_CURRENCIES
        .iter()
        .map(|&(code, name)| CurrencyEntry { code, name })
        .collect();
    let data = serde_json::json!({ "currencies": serde_json::to_value(currencies)? });
    Ok(CommandResult::ok(data))
}
