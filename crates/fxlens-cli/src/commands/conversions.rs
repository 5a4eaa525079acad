use serde_json::json;

use crate::cli::ConversionsArgs;
use crate::error::CliError;

use super::{open_warehouse, CommandResult};

pub fn run(args: &ConversionsArgs) -> Result<CommandResult, CliError> {
    let warehouse = open_warehouse()?;
    let conversions = warehouse.conversion_history(&args.user, args.limit)?;
    Ok(CommandResult::ok(json!({
        "user_id": args.user,
        "conversions": conversions,
    })))
}
