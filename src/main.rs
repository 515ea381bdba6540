use clap::{Parser, Subcommand};
use colored::*;
use anyhow::Result;
use tracing::info;

mod app;
mod chapter;
mod config;
mod emotion;
mod handler;
mod logging;
mod quran;
mod recommendation;
mod selection;
mod tui;
mod ui;

use app::App;
use chapter::SurahContent;
use config::Config;
use emotion::{classify, Emotion};
use quran::QuranClient;
use recommendation::{advisor_message, recommendations_for};
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "surahs", version)]
#[command(about = "Browse Quran chapters and find a surah for how you feel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the chapter/verse API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse chapters and recommendations (interactive, the default)
    Browse,
    /// List all chapters
    Chapters,
    /// Recommend chapters for how you feel
    Recommend {
        /// Describe how you're feeling
        #[arg(required_unless_present = "emotion")]
        text: Vec<String>,
        /// Skip detection and use this emotion (e.g. sadness, hope)
        #[arg(short, long)]
        emotion: Option<Emotion>,
    },
    /// Print a chapter's verse translations
    Read {
        /// Chapter number (1-114)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=114))]
        id: u32,
    },
    /// Show the config file location and current settings
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => {
            let _guard = logging::init_file(cli.verbose)?;
            run_tui(&config).await?;
        }
        Commands::Chapters => {
            logging::init_stderr(cli.verbose);
            list_chapters(&QuranClient::from_config(&config)).await;
        }
        Commands::Recommend { text, emotion } => {
            logging::init_stderr(cli.verbose);
            recommend(&text.join(" "), emotion);
        }
        Commands::Read { id } => {
            logging::init_stderr(cli.verbose);
            read_chapter(&QuranClient::from_config(&config), id).await;
        }
        Commands::Config { init } => {
            logging::init_stderr(cli.verbose);
            show_config(&config, init)?;
        }
    }

    Ok(())
}

async fn run_tui(config: &Config) -> Result<()> {
    info!(api = %config.api_base_url, "starting TUI");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(300);

    let mut app = App::new(config, events.sender());
    app.load_chapters();

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event),
                None => break,
            }
        }
        Ok::<_, anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}

async fn list_chapters(client: &QuranClient) {
    let listing = quran::load_chapters(client).await;

    if let Some(error) = &listing.error {
        println!("{} {}", "⚠️ ".yellow(), format!("{}, showing offline list", error).yellow());
    }

    println!("\n{}", "📖 Quran Chapters (Surahs)".bold().blue());
    println!("{}", "=".repeat(50).dimmed());

    for chapter in &listing.chapters {
        println!(
            "{:>4}. {} {} - {} ({} verses, {})",
            chapter.id.to_string().bold().yellow(),
            chapter.name_simple.bold(),
            chapter.name_arabic.green(),
            chapter.translated_name.name,
            chapter.verses_count,
            chapter.revelation_label().dimmed()
        );
    }
}

fn recommend(text: &str, emotion: Option<Emotion>) {
    let emotion = emotion.unwrap_or_else(|| classify(text));

    println!("\n{}", advisor_message().italic());
    println!("{} {}\n", "Detected:".dimmed(), emotion.label().bold().magenta());

    for (i, rec) in recommendations_for(emotion).iter().enumerate() {
        println!(
            "{}. {} {} {}",
            (i + 1).to_string().bold().blue(),
            rec.name.bold().yellow(),
            format!("#{}", rec.id).dimmed(),
            rec.name_arabic.green()
        );
        println!("   {}", rec.translation.italic());
        println!("   {} {}\n", "Why this Surah:".cyan(), rec.reason);
    }
}

async fn read_chapter(client: &QuranClient, id: u32) {
    let listing = quran::load_chapters(client).await;
    let content = match listing.chapters.iter().find(|c| c.id == id) {
        Some(chapter) => quran::load_chapter_content(client, chapter).await,
        None => {
            // Only the offline list is available; borrow a recommendation entry if one matches
            let rec = Emotion::all()
                .into_iter()
                .flat_map(|e| recommendations_for(e).iter())
                .find(|r| r.id == id)
                .copied();
            match rec {
                Some(rec) => quran::load_recommendation_content(client, &rec).await,
                None => {
                    println!("{}", format!("Chapter {} is not available offline", id).red());
                    return;
                }
            }
        }
    };

    print_content(&content);
}

fn print_content(content: &SurahContent) {
    let header = &content.header;
    println!(
        "\n{} {}",
        format!("📜 {}", header.name).bold().green(),
        header.name_arabic.green()
    );
    println!(
        "{} · {} verses · {}",
        header.translation.italic(),
        header.verses_count,
        header.revelation_label()
    );
    println!("{}", "=".repeat(50).dimmed());

    for verse in &content.verses {
        println!(
            "\n{}  {}",
            format!("Verse {}", verse.verse_number).bold().yellow(),
            verse.translation_text()
        );
    }

    println!("\n{}", "=".repeat(50).dimmed());
    if let Some(note) = content.partial_note() {
        println!("{}", note.dimmed());
    }
}

fn show_config(config: &Config, init: bool) -> Result<()> {
    let path = Config::get_config_path()?;

    if init {
        config.save()?;
        println!("{} {}", "Wrote".green(), path.display());
    } else {
        println!("{} {}", "Config file:".bold(), path.display());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
