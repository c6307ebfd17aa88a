use clap::{Parser, Subcommand};
use jiff::civil::Date;
use std::path::PathBuf;

mod app;
mod catalog;
mod logging;
mod store_json;
mod view;

use app::App;
use logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "perkwallet")]
#[command(about = "Track credit card benefits, subscriptions, and coupons")]
struct Args {
    /// Path to the data directory (default: ~/.perkwallet/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Period metrics and the benefits expiring soonest
    Dashboard,
    /// Every benefit with its status and period
    List,
    /// The cards on file
    Cards,
    /// Add a card (and its benefits) from the bundled catalog
    AddCard { template_id: String },
    /// Remove a card and everything attached to it
    RemoveCard { card_id: u32 },
    /// Redeem an available benefit
    MarkUsed { benefit_id: u32 },
    /// Revert a redemption
    Undo { benefit_id: u32 },
    /// Push a benefit's reminder out to a later date
    Snooze { benefit_id: u32, until: Date },
    /// The usage ledger, newest first
    History,
    /// Roll elapsed benefits forward now
    Sweep,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".perkwallet")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let now = jiff::Zoned::now().datetime();
    let mut app = App::open(&data_dir, now)?;

    // Catch up on elapsed periods before any command sees the data. A
    // second pass in the same period would be a no-op, so the explicit
    // sweep command reports this pass rather than running its own.
    let sweep_summary = app.sweep(now)?;

    let output = match args.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => app.dashboard(now),
        Command::List => app.list(now),
        Command::Cards => app.cards(),
        Command::AddCard { template_id } => app.add_card(&template_id, now)?,
        Command::RemoveCard { card_id } => app.remove_card(card_id)?,
        Command::MarkUsed { benefit_id } => app.mark_used(benefit_id, now)?,
        Command::Undo { benefit_id } => app.undo(benefit_id, now)?,
        Command::Snooze { benefit_id, until } => app.snooze(benefit_id, until, now)?,
        Command::History => app.history(),
        Command::Sweep => sweep_summary,
    };
    print!("{output}");

    app.save()?;
    tracing::info!("state saved, shutting down");

    Ok(())
}
