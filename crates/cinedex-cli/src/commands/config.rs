use super::context::load_credentials;
use super::{display, prompts};
use crate::output::Output;
use crate::ConfigCommands;
use cinedex_config::{Config, PathManager};
use cinedex_sources::{MovieCatalog, TmdbClient};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Tmdb {
            api_key,
            base_url,
            language,
        } => configure_tmdb(api_key, base_url, language, output).await,
        ConfigCommands::Init { force } => init_config(force, output),
    }
}

fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = load_config(&paths)?;
    let credentials = load_credentials(&paths)?;

    let env_key = std::env::var("TMDB_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let (api_key, key_source) = match (&env_key, credentials.get_tmdb_api_key()) {
        (Some(key), _) => (Some(key.clone()), "environment (TMDB_API_KEY)"),
        (None, Some(key)) => (Some(key.clone()), "credentials file"),
        (None, None) => (None, "not set"),
    };
    let key_display = match api_key {
        Some(ref key) if full => key.clone(),
        Some(ref key) => mask_string(key),
        None => "<not set>".to_string(),
    };
    let storage_dir = config
        .watchlist
        .storage_dir
        .clone()
        .unwrap_or_else(|| paths.storage_dir());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "tmdb": {
                "base_url": config.tmdb.base_url,
                "language": config.tmdb.language,
                "include_adult": config.tmdb.include_adult,
                "request_timeout_secs": config.tmdb.request_timeout_secs,
                "api_key": key_display,
                "api_key_source": key_source,
                "api_key_saved_at": credentials.get_tmdb_api_key_saved_at().map(|t| t.to_rfc3339()),
            },
            "display": {
                "cast_limit": config.display.cast_limit,
                "home_limit": config.display.home_limit,
                "show_image_urls": config.display.show_image_urls,
            },
            "watchlist": {
                "storage_dir": storage_dir.display().to_string(),
            },
        }));
        return Ok(());
    }

    display::print_heading("Configuration");
    if !config_file.exists() {
        output.warn(format!(
            "No config file at {}; showing defaults. Create one with 'cinedex config init'.",
            config_file.display()
        ));
    }

    let mut table = display::new_table();
    table.set_header(vec![
        Cell::new("Config File").add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    println!("{}", table);

    let mut tmdb = display::new_table();
    tmdb.set_header(vec![Cell::new("TMDB")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    tmdb.add_row(vec![Cell::new("Base URL"), Cell::new(&config.tmdb.base_url)]);
    tmdb.add_row(vec![
        Cell::new("Language"),
        Cell::new(config.tmdb.language.as_deref().unwrap_or("<api default>")),
    ]);
    tmdb.add_row(vec![Cell::new("Include Adult"), Cell::new(check_mark(config.tmdb.include_adult))]);
    tmdb.add_row(vec![
        Cell::new("Request Timeout"),
        Cell::new(format!("{} seconds", config.tmdb.request_timeout_secs)),
    ]);
    tmdb.add_row(vec![Cell::new("API Key"), Cell::new(format!("{} ({})", key_display, key_source))]);
    if let Some(saved_at) = credentials.get_tmdb_api_key_saved_at() {
        tmdb.add_row(vec![Cell::new("Key Saved"), Cell::new(saved_at.format("%Y-%m-%d %H:%M UTC").to_string())]);
    }
    println!("{}", tmdb);

    let mut display_table = display::new_table();
    display_table.set_header(vec![Cell::new("Display")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    display_table.add_row(vec![Cell::new("Cast Members"), Cell::new(config.display.cast_limit)]);
    display_table.add_row(vec![Cell::new("Titles per List (home)"), Cell::new(config.display.home_limit)]);
    display_table.add_row(vec![
        Cell::new("Show Image URLs"),
        Cell::new(check_mark(config.display.show_image_urls)),
    ]);
    println!("{}", display_table);

    let mut watchlist_table = display::new_table();
    watchlist_table.set_header(vec![Cell::new("Watchlist")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    watchlist_table.add_row(vec![Cell::new("Storage"), Cell::new(storage_dir.display().to_string())]);
    println!("{}", watchlist_table);

    Ok(())
}

async fn configure_tmdb(
    api_key_arg: Option<String>,
    base_url: Option<String>,
    language: Option<String>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = load_config(&paths)?;
    let mut credentials = load_credentials(&paths)?;
    let settings_changed = base_url.is_some() || language.is_some();

    if let Some(url) = base_url {
        config.tmdb.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(lang) = language {
        let lang = lang.trim();
        config.tmdb.language = (!lang.is_empty()).then(|| lang.to_string());
    }
    config.validate().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let api_key = match api_key_arg {
        Some(key) => Some(key.trim().to_string()),
        None if !settings_changed || credentials.get_tmdb_api_key().is_none() => {
            display::print_heading("TMDB API Setup");
            output.println("Create a free API key (v3 auth) at https://www.themoviedb.org/settings/api");
            output.println("");
            Some(prompts::prompt_secret("TMDB API key")?)
        }
        None => None,
    };

    if let Some(key) = api_key {
        if key.is_empty() {
            return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
        }
        credentials.set_tmdb_api_key(key);
        credentials
            .save()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
        output.success("API key saved");
    }

    let config_file = paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Configuration saved to {}", config_file.display()));

    verify_access(&config, &credentials, output).await;
    Ok(())
}

/// One cheap request to confirm the key and base URL work. Failure only warns.
async fn verify_access(config: &Config, credentials: &cinedex_config::CredentialStore, output: &Output) {
    let client = match config
        .tmdb_settings(credentials)
        .map_err(|e| e.to_string())
        .and_then(|settings| TmdbClient::new(&settings).map_err(|e| e.to_string()))
    {
        Ok(client) => client,
        Err(e) => {
            output.warn(format!("Could not verify TMDB access: {}", e));
            return;
        }
    };

    let spinner = display::spinner(output, "Verifying API key...");
    let result = client.popular(1).await;
    spinner.finish_and_clear();

    match result {
        Ok(_) => output.success("TMDB access verified"),
        Err(e) if e.status_code() == Some(401) => {
            output.warn(format!("TMDB rejected the API key. {}", e))
        }
        Err(e) => output.warn(format!("Could not verify TMDB access: {}", e)),
    }
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if config_file.exists() && !force {
        output.warn(format!(
            "Config file already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    output.println("Next: store your API key with 'cinedex config tmdb'");
    Ok(())
}

fn check_mark(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("0123456789abcdef"), "01***ef");
    }
}
