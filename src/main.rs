use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use theme_kit::presets::DirectoryPresets;
use theme_kit::theme::StoredCustomBackground;
use theme_kit::{
    BackgroundRegistry, RawTheme, Theme, ThemeContext, ThemeSettings, convert_to_browser_theme,
    normalize_theme, themes_equal,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "theme-kit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to the config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Directory of preset JSON files to use instead of the bundled ones
    #[arg(long, global = true)]
    presets_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List preset themes
    Presets,
    /// Print the canonical form of a theme file
    Normalize {
        /// Theme JSON file
        path: PathBuf,
    },
    /// Check whether two theme files look the same
    Compare {
        a: PathBuf,
        b: PathBuf,
        /// Compare the files as they are, without normalizing first
        #[arg(long)]
        raw: bool,
    },
    /// Print a theme in browser theming API format
    Convert {
        /// Theme JSON file
        path: PathBuf,
        /// JSON object mapping custom background names to `{"image": ...}`
        #[arg(short, long)]
        custom_backgrounds: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theme_kit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => ThemeSettings::from_path(path)?,
        None => ThemeSettings::load()?,
    };
    let ctx = match &cli.presets_dir {
        Some(dir) => ThemeContext::load(
            &DirectoryPresets::new(dir),
            BackgroundRegistry::bundled(),
            settings,
        ),
        None => ThemeContext::bundled(settings),
    }
    .context("Failed to load preset themes")?;

    match cli.command {
        Commands::Presets => {
            for preset in ctx.presets() {
                let title = preset.theme.title.as_deref().unwrap_or("-");
                println!("{:>3}  {:<24} {}", preset.idx, preset.filename, title);
            }
        }
        Commands::Normalize { path } => {
            let theme = load_normalized(&ctx, &path)?;
            println!("{}", serde_json::to_string_pretty(&theme)?);
        }
        Commands::Compare { a, b, raw } => {
            let (a, b) = if raw {
                (read_json::<Theme>(&a)?, read_json::<Theme>(&b)?)
            } else {
                (load_normalized(&ctx, &a)?, load_normalized(&ctx, &b)?)
            };

            if themes_equal(&ctx, Some(&a), Some(&b)) {
                println!("equal");
            } else {
                println!("different");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Convert { path, custom_backgrounds } => {
            let theme = load_normalized(&ctx, &path)?;
            let custom: HashMap<String, StoredCustomBackground> = match custom_backgrounds {
                Some(path) => read_json(&path)?,
                None => HashMap::new(),
            };

            let browser_theme = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &custom);
            println!("{}", serde_json::to_string_pretty(&browser_theme)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))
}

fn load_normalized(ctx: &ThemeContext, path: &Path) -> Result<Theme> {
    let raw: RawTheme = read_json(path)?;
    tracing::debug!(path = %path.display(), "Normalizing theme");
    Ok(normalize_theme(ctx, &raw))
}
