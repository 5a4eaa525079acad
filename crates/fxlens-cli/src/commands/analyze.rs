use std::sync::Arc;

use fxlens_core::{AnalysisRequest, ConversionStore, Period};
use tracing::warn;

use crate::cli::{AnalyzeArgs, Cli};
use crate::error::CliError;

use super::{analyzer, open_warehouse, CommandResult};

pub async fn run(args: &AnalyzeArgs, cli: &Cli) -> Result<CommandResult, CliError> {
    let period = Period::new(args.days)?;
    let mut warnings = Vec::new();

    // An unavailable store only costs the record, not the analysis.
    let store: Option<Arc<dyn ConversionStore>> = match &args.user {
        Some(_) => match open_warehouse() {
            Ok(warehouse) => Some(Arc::new(warehouse)),
            Err(error) => {
                warn!(error = %error, "conversion store unavailable");
                warnings.push(format!("conversion not recorded: {error}"));
                None
            }
        },
        None => None,
    };
    let has_store = store.is_some();

    let mut request = AnalysisRequest::new(&args.pair.base, &args.pair.target, args.amount, period);
    if let Some(user) = args.user.as_ref().filter(|_| has_store) {
        request = request.with_user(user.clone());
    }

    let analysis = analyzer(cli, store).analyze(request).await?;
    let data = serde_json::to_value(&analysis)?;
    Ok(CommandResult::ok(data)
        .with_warnings(warnings)
        .with_warnings(analysis.warnings))
}
