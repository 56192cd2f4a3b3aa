use super::context::AppContext;
use super::display;
use crate::output::Output;
use cinedex_sources::MovieCatalog;
use color_eyre::Result;

pub async fn run_show(movie_id: u64, cast: Option<usize>, ephemeral: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load(ephemeral)?;
    let catalog = ctx.catalog()?;
    let watchlist = ctx.watchlist();

    let spinner = display::spinner(output, format!("Loading movie {}...", movie_id));
    let result = catalog.movie_details(movie_id).await;
    spinner.finish_and_clear();

    let movie = result.map_err(|e| {
        if e.is_not_found() {
            color_eyre::eyre::eyre!("Movie {} not found. {}", movie_id, e)
        } else {
            color_eyre::eyre::eyre!("{}", e)
        }
    })?;

    let cast_limit = cast.unwrap_or(ctx.config.display.cast_limit);
    display::print_detail(
        output,
        &movie,
        cast_limit,
        watchlist.contains(movie.id),
        ctx.config.display.show_image_urls,
    );

    if output.is_human() && !watchlist.contains(movie.id) {
        output.info(format!("\nSave it with: cinedex watchlist add {}", movie.id));
    }
    Ok(())
}
