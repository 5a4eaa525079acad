use fxlens_core::{CurrencyPair, ValidationError};
use serde_json::json;

use crate::cli::{FavoritesArgs, FavoritesCommand};
use crate::error::CliError;

use super::{open_warehouse, CommandResult};

pub fn run(args: &FavoritesArgs) -> Result<CommandResult, CliError> {
    let user = args
        .user
        .as_deref()
        .map(str::trim)
        .filter(|user| !user.is_empty())
        .ok_or(ValidationError::EmptyUserId)?;
    let warehouse = open_warehouse()?;

    match &args.command {
        FavoritesCommand::Add(pair_args) => {
            let pair = CurrencyPair::parse(&pair_args.base, &pair_args.target)?;
            let favorite =
                warehouse.add_favorite(user, pair.base().as_str(), pair.target().as_str())?;
            Ok(CommandResult::ok(json!({ "favorite": favorite })))
        }
        FavoritesCommand::List => {
            let favorites = warehouse.favorites(user)?;
            Ok(CommandResult::ok(json!({
                "user_id": user,
                "favorites": favorites,
            })))
        }
        FavoritesCommand::Remove(remove_args) => {
            let removed = warehouse.remove_favorite(user, &remove_args.id)?;
            let result = CommandResult::ok(json!({ "id": remove_args.id, "removed": removed }));
            Ok(if removed {
                result
            } else {
                result.with_warning(format!("no favorite '{}' for this user", remove_args.id))
            })
        }
    }
}
