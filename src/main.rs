//! SlideDeck - markdown slide deck editor
//!
//! Command-line front end over the presentation store: navigate routes,
//! create, edit and delete presentations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use slidedeck::app::{SlideDeckApp, View};
use slidedeck::core::config::AppConfig;
use slidedeck::core::deck::Deck;

#[derive(Debug, Parser)]
#[command(name = "slidedeck", version, about = "Markdown slide deck editor")]
struct Cli {
    /// Directory holding stored presentations
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a route such as `/`, `/editor/<id>` or `/present/<id>/speaker`
    Open { route: String },
    /// List stored presentations
    List,
    /// Create and save a new presentation
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        /// Slug of a slide file in the library
        #[arg(long)]
        template: Option<String>,
    },
    /// Edit a stored presentation
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        /// Replace the content with this markdown file
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Delete a stored presentation
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = AppConfig::config_path();
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable config: {}", e);
        AppConfig::default()
    });
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    // Initialize logging
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        config.level_filter()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();

    tracing::info!("Starting SlideDeck...");

    let mut app = SlideDeckApp::open(config, config_path)?;

    match cli.command {
        Command::Open { route } => {
            let view = app.navigate(&route).await?;
            print_view(&view);
        }
        Command::List => {
            let view = app.navigate("/").await?;
            print_view(&view);
        }
        Command::New {
            title,
            theme,
            template,
        } => {
            let record = app
                .create_presentation(title.as_deref(), theme.as_deref(), template.as_deref())
                .await?;
            println!("{}", record.id);
        }
        Command::Edit {
            id,
            title,
            theme,
            content_file,
        } => {
            let content = match content_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {}", path.display()))?,
                ),
                None => None,
            };
            let record = app
                .edit_presentation(&id, title.as_deref(), theme.as_deref(), content)
                .await
                .inspect_err(|e| tracing::error!("Edit failed: {}", e))?;
            println!("Saved {} ({})", record.id, record.title);
        }
        Command::Delete { id } => {
            if app.delete_presentation(&id).await? {
                println!("Deleted {id}");
            } else {
                println!("No presentation {id}");
            }
        }
    }

    Ok(())
}

fn print_view(view: &View) {
    match view {
        View::Dashboard(listing) => {
            if listing.is_empty() {
                println!("No presentations yet");
            }
            for summary in listing {
                let edited = summary
                    .last_edited
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!("{}  {}  {}", summary.id, edited, summary.title);
            }
        }
        View::Editor(record) => {
            println!("# {} [{}] ({})", record.title, record.theme, record.id);
            println!("{}", record.content);
        }
        View::Present(deck) => print_deck(deck, false),
        View::Speaker(deck) => print_deck(deck, true),
        View::Templates(modules) => {
            for module in modules {
                println!("{}  {}", module.name, module.title);
            }
        }
        View::Settings(config) => match serde_json::to_string_pretty(config) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("Failed to render settings: {}", e),
        },
        View::NotFound(id) => println!("Presentation not found: {id}"),
    }
}

fn print_deck(deck: &Deck, with_notes: bool) {
    println!("{} ({} slides, theme {})", deck.title, deck.len(), deck.theme);
    for slide in &deck.slides {
        println!();
        println!(
            "--- {}/{}: {}",
            slide.index + 1,
            deck.len(),
            slide.title.as_deref().unwrap_or("(untitled)")
        );
        println!("{}", slide.body);
        if with_notes {
            if let Some(ref notes) = slide.notes {
                println!("Notes: {notes}");
            }
        }
    }
}
