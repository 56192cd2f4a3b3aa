use crate::output::Output;
use cinedex_core::{visible_pages, MovieListing, WatchlistStore};
use cinedex_models::{image_url, ImageKind, MovieDetail, MovieSummary};
use comfy_table::{Attribute, Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown on stderr while a request is loading. Hidden for JSON
/// output, quiet mode and non-interactive stderr.
pub fn spinner(output: &Output, message: impl Into<String>) -> ProgressBar {
    if !output.is_human() || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn print_heading(title: &str) {
    println!();
    println!("{}", title.bold().bright_cyan());
    println!("{}", "─".repeat(title.chars().count()).bright_cyan());
}

/// Five stars scaled from the 0-10 vote average, plus the number
pub fn format_rating(vote_average: f64) -> String {
    let rating = vote_average.clamp(0.0, 10.0);
    let filled = (rating / 2.0).round() as usize;
    format!("{}{} {:.1}", "★".repeat(filled), "☆".repeat(5 - filled), rating)
}

/// `$63,000,000`; `None` when upstream reports 0 (unknown)
pub fn format_money(amount: u64) -> Option<String> {
    if amount == 0 {
        return None;
    }
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    Some(format!("${}", grouped))
}

pub fn format_runtime(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

fn saved_marker(saved: bool) -> String {
    if saved {
        "♥".red().to_string()
    } else {
        String::new()
    }
}

pub fn movie_table(movies: &[MovieSummary], is_saved: impl Fn(u64) -> bool, show_images: bool) -> Table {
    let mut table = new_table();
    let mut header = vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("").add_attribute(Attribute::Bold),
    ];
    if show_images {
        header.push(Cell::new("Poster").add_attribute(Attribute::Bold));
    }
    table.set_header(header);

    for movie in movies {
        let mut row = vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(movie.release_year().map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(format_rating(movie.vote_average)).fg(Color::Yellow),
            Cell::new(saved_marker(is_saved(movie.id))),
        ];
        if show_images {
            row.push(Cell::new(
                image_url(movie.poster_path.as_deref(), ImageKind::Poster, None).unwrap_or_default(),
            ));
        }
        table.add_row(row);
    }
    table
}

/// One page of a list with a page footer. In JSON mode the listing is
/// emitted as a single document with the saved ids attached.
pub fn print_listing(output: &Output, heading: &str, listing: &MovieListing, watchlist: &WatchlistStore, show_images: bool) {
    if !output.is_human() {
        output.json(&json!({
            "type": "listing",
            "title": heading,
            "page": listing.page,
            "total_pages": listing.total_pages,
            "total_results": listing.total_results,
            "movies": listing.movies,
            "saved": listing
                .movies
                .iter()
                .filter(|m| watchlist.contains(m.id))
                .map(|m| m.id)
                .collect::<Vec<_>>(),
        }));
        return;
    }

    print_heading(heading);
    if listing.is_empty() {
        output.info("No movies found.");
        return;
    }

    println!("{}", movie_table(&listing.movies, |id| watchlist.contains(id), show_images));

    let window = visible_pages(listing.page, listing.total_pages);
    let summary = format!(
        "Page {} of {} ({} results)",
        listing.page,
        listing.total_pages.max(1),
        listing.total_results
    );
    if window.is_empty() {
        println!("{}", summary.bright_black());
    } else {
        println!("{}    {}", summary.bright_black(), window);
        if window.has_next() {
            println!("{}", format!("Next page: --page {}", listing.page.saturating_add(1)).bright_black());
        }
    }
}

pub fn print_detail(output: &Output, movie: &MovieDetail, cast_limit: usize, saved: bool, show_images: bool) {
    if !output.is_human() {
        output.json(&json!({
            "type": "movie",
            "saved": saved,
            "trailer": movie.trailer().and_then(|v| v.youtube_url()),
            "movie": movie,
        }));
        return;
    }

    let mut title = movie.display_title();
    if saved {
        title = format!("{} ♥", title);
    }
    print_heading(&title);

    if let Some(tagline) = movie.tagline.as_ref().filter(|t| !t.is_empty()) {
        println!("{}", tagline.italic());
    }
    println!();

    let mut facts = new_table();
    facts.set_header(vec![Cell::new("Details")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    facts.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("{} ({} votes)", format_rating(movie.vote_average), movie.vote_count)),
    ]);
    if let Some(date) = movie.release() {
        facts.add_row(vec![Cell::new("Released"), Cell::new(date.format("%B %-d, %Y").to_string())]);
    }
    if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
        facts.add_row(vec![Cell::new("Runtime"), Cell::new(format_runtime(runtime))]);
    }
    if !movie.genres.is_empty() {
        facts.add_row(vec![Cell::new("Genres"), Cell::new(movie.genre_names().join(", "))]);
    }
    if let Some(ref status) = movie.status {
        facts.add_row(vec![Cell::new("Status"), Cell::new(status)]);
    }
    if let Some(budget) = format_money(movie.budget) {
        facts.add_row(vec![Cell::new("Budget"), Cell::new(budget)]);
    }
    if let Some(revenue) = format_money(movie.revenue) {
        facts.add_row(vec![Cell::new("Revenue"), Cell::new(revenue)]);
    }
    if !movie.production_companies.is_empty() {
        let companies: Vec<&str> = movie.production_companies.iter().map(|c| c.name.as_str()).collect();
        facts.add_row(vec![Cell::new("Produced by"), Cell::new(companies.join(", "))]);
    }
    if let Some(url) = movie.trailer().and_then(|v| v.youtube_url()) {
        facts.add_row(vec![Cell::new("Trailer"), Cell::new(url)]);
    }
    if show_images {
        if let Some(url) = image_url(movie.poster_path.as_deref(), ImageKind::Poster, None) {
            facts.add_row(vec![Cell::new("Poster"), Cell::new(url)]);
        }
        if let Some(url) = image_url(movie.backdrop_path.as_deref(), ImageKind::Backdrop, None) {
            facts.add_row(vec![Cell::new("Backdrop"), Cell::new(url)]);
        }
    }
    println!("{}", facts);

    if !movie.overview.is_empty() {
        print_heading("Overview");
        println!("{}", movie.overview);
    }

    let cast = movie.top_cast(cast_limit);
    if !cast.is_empty() {
        print_heading("Cast");
        let mut table = new_table();
        table.set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Character").add_attribute(Attribute::Bold),
        ]);
        for member in cast {
            table.add_row(vec![Cell::new(&member.name), Cell::new(&member.character)]);
        }
        println!("{}", table);
    }

    let similar = movie.similar_movies();
    if !similar.is_empty() {
        print_heading("Similar Movies");
        println!("{}", movie_table(&similar[..similar.len().min(6)], |_| false, false));
    }
}
