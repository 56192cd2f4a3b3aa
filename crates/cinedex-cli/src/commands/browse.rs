use super::context::AppContext;
use super::display;
use crate::output::Output;
use cinedex_core::{fetch_home, fetch_listing, MovieListing, MovieQuery, SearchSession};
use cinedex_models::Category;
use cinedex_sources::{FetchError, MovieCatalog};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::info;

fn fetch_failed(e: FetchError) -> color_eyre::Report {
    color_eyre::eyre::eyre!("{}", e)
}

async fn load_listing(catalog: &dyn MovieCatalog, query: &MovieQuery, page: u32, output: &Output) -> Result<MovieListing> {
    let spinner = display::spinner(output, format!("Loading {}...", query));
    let result = fetch_listing(catalog, query, page).await;
    spinner.finish_and_clear();
    result.map_err(fetch_failed)
}

async fn run_listing(query: MovieQuery, page: u32, ephemeral: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load(ephemeral)?;
    let catalog = ctx.catalog()?;
    let watchlist = ctx.watchlist();

    let listing = load_listing(&catalog, &query, page, output).await?;
    display::print_listing(
        output,
        &query.to_string(),
        &listing,
        &watchlist,
        ctx.config.display.show_image_urls,
    );
    Ok(())
}

pub async fn run_browse(category: Category, page: u32, ephemeral: bool, output: &Output) -> Result<()> {
    run_listing(MovieQuery::Category(category), page, ephemeral, output).await
}

pub async fn run_genre(genre_id: u64, page: u32, ephemeral: bool, output: &Output) -> Result<()> {
    run_listing(MovieQuery::Genre(genre_id), page, ephemeral, output).await
}

pub async fn run_search(query: String, page: u32, pages: Option<u32>, ephemeral: bool, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        output.warn("Search query is empty. Example: cinedex search \"blade runner\"");
        return Ok(());
    }

    let Some(pages) = pages else {
        return run_listing(MovieQuery::Search(query), page, ephemeral, output).await;
    };

    let ctx = AppContext::load(ephemeral)?;
    let catalog = ctx.catalog()?;
    let watchlist = ctx.watchlist();

    let mut session = SearchSession::new(query.trim());
    let spinner = display::spinner(output, format!("Searching for \"{}\"...", session.query()));
    for _ in 0..pages.max(1) {
        if let Err(e) = session.load_next(&catalog).await {
            spinner.finish_and_clear();
            return Err(fetch_failed(e));
        }
        spinner.set_message(format!(
            "Searching for \"{}\"... {} of {} results",
            session.query(),
            session.movies().len(),
            session.total_results()
        ));
        if !session.has_more() {
            break;
        }
    }
    spinner.finish_and_clear();
    info!(
        "Search '{}' loaded {} pages ({} movies)",
        session.query(),
        session.page(),
        session.movies().len()
    );

    let heading = MovieQuery::Search(session.query().to_string()).to_string();
    display::print_listing(
        output,
        &heading,
        &session.to_listing(),
        &watchlist,
        ctx.config.display.show_image_urls,
    );
    Ok(())
}

pub async fn run_home(limit: Option<usize>, ephemeral: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load(ephemeral)?;
    let catalog = ctx.catalog()?;
    let watchlist = ctx.watchlist();
    let limit = limit.unwrap_or(ctx.config.display.home_limit).max(1);

    let spinner = display::spinner(output, "Loading movie lists...");
    let rows = fetch_home(&catalog, limit).await;
    spinner.finish_and_clear();

    if !output.is_human() {
        let rows: Vec<_> = rows
            .iter()
            .map(|(category, movies)| match movies {
                Ok(movies) => json!({ "category": category.key(), "movies": movies }),
                Err(e) => json!({ "category": category.key(), "error": e.to_string() }),
            })
            .collect();
        output.json(&json!({ "type": "home", "rows": rows }));
        return Ok(());
    }

    let mut failures = 0;
    for (category, movies) in &rows {
        display::print_heading(category.label());
        match movies {
            Ok(movies) if movies.is_empty() => output.info("No movies found."),
            Ok(movies) => println!(
                "{}",
                display::movie_table(movies, |id| watchlist.contains(id), ctx.config.display.show_image_urls)
            ),
            Err(e) => {
                failures += 1;
                output.error(e.to_string());
            }
        }
        println!(
            "{}",
            format!("More: cinedex browse --category {}", category.key()).bright_black()
        );
    }

    if failures == rows.len() {
        return Err(color_eyre::eyre::eyre!("Could not load any movie list"));
    }
    Ok(())
}
