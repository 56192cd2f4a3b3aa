use super::context::AppContext;
use crate::output::Output;
use cinedex_config::PathManager;
use cinedex_core::WATCHLIST_STORAGE_KEY;
use color_eyre::Result;
use std::fs;

pub async fn run_clear(all: bool, watchlist: bool, credentials: bool, output: &Output) -> Result<()> {
    if !(all || watchlist || credentials) {
        output.warn("No clear option specified. Use --watchlist, --credentials, or --all");
        output.println("\nExample: cinedex clear --watchlist");
        return Ok(());
    }

    if all || watchlist {
        clear_watchlist(output)?;
    }
    if all || credentials {
        clear_credentials(&PathManager::default(), output)?;
    }
    if all {
        output.success("Watchlist and credentials cleared");
    }
    Ok(())
}

fn clear_watchlist(output: &Output) -> Result<()> {
    let ctx = AppContext::load(false)?;
    let store = ctx.watchlist();
    if store.is_empty() {
        output.info("Watchlist is already empty");
    }

    ctx.storage()
        .remove(WATCHLIST_STORAGE_KEY)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear watchlist: {}", e))?;
    if !store.is_empty() {
        output.success(format!("Cleared watchlist ({} movies)", store.count()));
    }
    Ok(())
}

fn clear_credentials(paths: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!(
                "Failed to remove credentials file at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
