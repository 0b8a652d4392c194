//! Pagebrief CLI - webpage summarisation with Gemini
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, driving the commands and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use colored::Colorize;
use dialoguer::{Input, Select};
use pagebrief::{app, scraper, GeminiClient, Settings, SettingsStore, SummaryLength};
use std::io;

#[derive(Parser)]
#[command(name = "pagebrief")]
#[command(author, version, about = "Summarise webpages with Gemini from your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a webpage by URL
    Summarise {
        /// URL to summarise
        url: String,
        /// Show the extracted page content instead of a summary
        #[arg(long)]
        raw: bool,
        /// Print the summary as an HTML fragment
        #[arg(long, conflicts_with = "raw")]
        html: bool,
    },
    /// Configure the API key and preferred summary length
    Settings {
        /// Set the API key without prompting
        #[arg(long)]
        api_key: Option<String>,
        /// Set the summary length without prompting
        #[arg(long, value_enum)]
        length: Option<LengthArg>,
        /// Show the stored settings instead of editing them
        #[arg(long)]
        show: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LengthArg {
    Short,
    Medium,
    Long,
}

impl From<LengthArg> for SummaryLength {
    fn from(value: LengthArg) -> Self {
        match value {
            LengthArg::Short => SummaryLength::Short,
            LengthArg::Medium => SummaryLength::Medium,
            LengthArg::Long => SummaryLength::Long,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarise { url, raw, html } => {
            if raw {
                run_raw(&url).await;
            } else {
                run_summarise(&url, html).await?;
            }
        }
        Commands::Settings {
            api_key,
            length,
            show,
        } => {
            let store = SettingsStore::open(SettingsStore::default_path())?;
            if show {
                show_settings(&store)?;
            } else if api_key.is_some() || length.is_some() {
                save_settings(&store, api_key, length.map(Into::into))?;
            } else {
                edit_settings(&store)?;
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pagebrief", &mut io::stdout());
        }
    }

    Ok(())
}

/// Fetch a page and print what extraction sees, without summarising
async fn run_raw(url: &str) {
    println!("Fetching: {}", url);
    match scraper::fetch_page(url).await {
        Ok(page) => {
            println!("\n=== {} ===\n", page.title);
            println!("{}", page.content);
            println!(
                "\n--- Extracted {} characters ---",
                page.content.chars().count()
            );
        }
        Err(_) => fail("Error extracting page content."),
    }
}

/// The full flow: settings, extraction, generation, rendering
async fn run_summarise(url: &str, html: bool) -> anyhow::Result<()> {
    let store = SettingsStore::open(SettingsStore::default_path())?;
    let settings = store.get()?;
    let client = match GeminiClient::new() {
        Ok(client) => client,
        Err(_) => {
            fail("Error: Failed to generate summary with Gemini. Check your API key and try again.")
        }
    };

    let result = app::summarize_url(url, &settings, &client, |stage| match stage {
        app::Progress::Extracting => println!("Fetching: {}", url),
        app::Progress::Requesting { content_len } => {
            println!("Summarising {} characters...", content_len)
        }
    })
    .await;

    match result {
        Ok(summary) => {
            if html {
                println!("{}", summary.display_markup());
            } else {
                println!("\n=== {} ===", summary.title.bold());
                println!("{}\n", summary.url.dimmed());
                for paragraph in &summary.paragraphs {
                    println!("{}\n", paragraph);
                }
            }
            Ok(())
        }
        Err(err) => fail(err.user_message()),
    }
}

/// Print the stored settings. The key itself is never echoed.
fn show_settings(store: &SettingsStore) -> anyhow::Result<()> {
    let settings = store.get()?;
    let key_status = if settings.api_key.is_empty() {
        "not set".red()
    } else {
        "configured".green()
    };
    println!("API key:        {}", key_status);
    println!("Summary length: {}", settings.summary_length);
    Ok(())
}

/// Non-interactive save; unspecified fields keep their stored value
fn save_settings(
    store: &SettingsStore,
    api_key: Option<String>,
    length: Option<SummaryLength>,
) -> anyhow::Result<()> {
    let current = store.get()?;

    let api_key = api_key.map(|k| k.trim().to_string()).unwrap_or(current.api_key);
    if api_key.is_empty() {
        fail("Please enter a valid Gemini API Key");
    }

    store.set(&Settings {
        api_key,
        summary_length: length.unwrap_or(current.summary_length),
    })?;
    println!("{}", "Settings saved successfully!".green());
    Ok(())
}

/// Interactive settings editor, prefilled with the stored values
fn edit_settings(store: &SettingsStore) -> anyhow::Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        anyhow::bail!("settings editing needs a terminal; use --api-key and --length instead");
    }

    let current = store.get()?;

    let api_key: String = Input::new()
        .with_prompt("Gemini API key")
        .with_initial_text(current.api_key.clone())
        .allow_empty(true)
        .interact_text()?;
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        fail("Please enter a valid Gemini API Key");
    }

    let lengths = [
        SummaryLength::Short,
        SummaryLength::Medium,
        SummaryLength::Long,
    ];
    let default_idx = lengths
        .iter()
        .position(|l| *l == current.summary_length)
        .unwrap_or(1);
    let selected = Select::new()
        .with_prompt("Summary length")
        .items(&lengths.map(|l| l.as_str()))
        .default(default_idx)
        .interact()?;

    store.set(&Settings {
        api_key,
        summary_length: lengths[selected],
    })?;
    println!("{}", "Settings saved successfully!".green());
    Ok(())
}

/// Report a user-facing error and exit
fn fail(message: &str) -> ! {
    eprintln!("{}", message.red());
    std::process::exit(1);
}
