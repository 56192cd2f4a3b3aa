use super::context::AppContext;
use super::display;
use crate::output::Output;
use crate::WatchlistCommands;
use cinedex_core::{WatchlistError, WatchlistStore};
use cinedex_models::{MovieDetail, MovieSummary};
use cinedex_sources::{FetchError, MovieCatalog};
use color_eyre::Result;
use futures::future::join_all;
use serde_json::json;

pub async fn run_watchlist(cmd: WatchlistCommands, ephemeral: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load(ephemeral)?;
    let mut store = ctx.watchlist();

    match cmd {
        WatchlistCommands::List => list(&ctx, &store, output),
        WatchlistCommands::Add { movie_ids } => add(&ctx, &mut store, movie_ids, output).await?,
        WatchlistCommands::Remove { movie_ids } => remove(&mut store, &movie_ids, output),
        WatchlistCommands::Toggle { movie_id } => toggle(&ctx, &mut store, movie_id, output).await?,
        WatchlistCommands::Check { movie_id } => {
            let saved = store.contains(movie_id);
            if output.is_human() {
                if saved {
                    output.success(format!("Movie {} is on your watchlist", movie_id));
                } else {
                    output.info(format!("Movie {} is not on your watchlist", movie_id));
                }
            } else {
                output.json(&json!({ "movie_id": movie_id, "saved": saved }));
            }
        }
        WatchlistCommands::Count => {
            if output.is_human() {
                output.println(store.count().to_string());
            } else {
                output.json(&json!({ "count": store.count() }));
            }
        }
    }

    if let Some(e) = store.last_persist_error() {
        output.warn(format!("Watchlist could not be saved: {}. Changes will be lost when cinedex exits.", e));
    }
    Ok(())
}

fn list(ctx: &AppContext, store: &WatchlistStore, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "watchlist",
            "count": store.count(),
            "movies": store.entries(),
        }));
        return;
    }

    display::print_heading(&format!("Watchlist ({})", store.count()));
    if store.is_empty() {
        output.info("Your watchlist is empty. Add a movie with: cinedex watchlist add <ID>");
        return;
    }
    let movies: Vec<MovieSummary> = store.entries().iter().map(|m| m.summary.clone()).collect();
    println!(
        "{}",
        display::movie_table(&movies, |_| true, ctx.config.display.show_image_urls)
    );
}

fn report_added(output: &Output, result: std::result::Result<bool, WatchlistError>, movie: &MovieDetail) {
    match result {
        Ok(true) => output.success(format!("Added {} to your watchlist", movie.display_title())),
        Ok(false) => output.info(format!("{} is already on your watchlist", movie.display_title())),
        Err(e) => output.error(format!("Could not add movie {}: {}", movie.id, e)),
    }
}

/// Details for every id not yet saved are fetched concurrently; repeated ids
/// join the same in-flight request.
async fn add(ctx: &AppContext, store: &mut WatchlistStore, movie_ids: Vec<u64>, output: &Output) -> Result<()> {
    let mut to_fetch = Vec::new();
    for id in movie_ids {
        if id == 0 {
            output.error(format!("Could not add movie 0: {}", WatchlistError::InvalidId));
        } else if let Some(movie) = store.get(id) {
            output.info(format!("{} is already on your watchlist", movie.display_title()));
        } else {
            to_fetch.push(id);
        }
    }
    if to_fetch.is_empty() {
        return Ok(());
    }

    let catalog = ctx.catalog()?;
    let spinner = display::spinner(output, format!("Fetching {} movie(s)...", to_fetch.len()));
    let results: Vec<(u64, std::result::Result<MovieDetail, FetchError>)> =
        join_all(to_fetch.into_iter().map(|id| {
            let catalog = &catalog;
            async move { (id, catalog.movie_details(id).await) }
        }))
        .await;
    spinner.finish_and_clear();

    let mut failed = 0;
    for (id, result) in results {
        match result {
            Ok(movie) => {
                let added = store.add(movie.clone());
                report_added(output, added, &movie);
            }
            Err(e) => {
                failed += 1;
                output.error(format!("Could not add movie {}: {}", id, e));
            }
        }
    }

    if !output.is_human() {
        output.json(&json!({ "count": store.count(), "ids": store.ids() }));
    }
    if failed > 0 {
        return Err(color_eyre::eyre::eyre!("{} movie(s) could not be added", failed));
    }
    Ok(())
}

fn remove(store: &mut WatchlistStore, movie_ids: &[u64], output: &Output) {
    for &id in movie_ids {
        let title = store.get(id).map(|m| m.display_title());
        if store.remove(id) {
            output.success(format!(
                "Removed {} from your watchlist",
                title.unwrap_or_else(|| id.to_string())
            ));
        } else {
            output.info(format!("Movie {} is not on your watchlist", id));
        }
    }
}

async fn toggle(ctx: &AppContext, store: &mut WatchlistStore, movie_id: u64, output: &Output) -> Result<()> {
    let movie = match store.get(movie_id).cloned() {
        Some(saved) => saved,
        None => {
            let catalog = ctx.catalog()?;
            let spinner = display::spinner(output, format!("Loading movie {}...", movie_id));
            let result = catalog.movie_details(movie_id).await;
            spinner.finish_and_clear();
            result.map_err(|e| color_eyre::eyre::eyre!("{}", e))?
        }
    };

    let saved = store
        .toggle(movie.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Could not update watchlist: {}", e))?;

    if output.is_human() {
        if saved {
            output.success(format!("Added {} to your watchlist", movie.display_title()));
        } else {
            output.success(format!("Removed {} from your watchlist", movie.display_title()));
        }
    } else {
        output.json(&json!({ "movie_id": movie.id, "saved": saved }));
    }
    Ok(())
}
