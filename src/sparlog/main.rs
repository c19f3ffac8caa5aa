use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use sparlog::api::SparlogApi;
use sparlog::commands::add::NewEntry;
use sparlog::commands::list::RECENT_WINDOW;
use sparlog::commands::profile::ProfileAction;
use sparlog::commands::{CmdMessage, Insights, MessageLevel};
use sparlog::config::RemoteConfig;
use sparlog::error::{Result, SparlogError};
use sparlog::metrics::Stats;
use sparlog::model::{parse_entry_date, LeaderboardRow, Profile, PurchaseEntry, StorageMode};
use sparlog::store::{EntryStore, LocalStore, RemoteStore, Storage};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let api = init_api(&cli)?;

    match cli.command {
        Some(Commands::Add {
            merchant,
            item,
            category,
            amount,
            discount,
            note,
            receipt,
        }) => handle_add(&api, merchant, item, category, amount, discount, note, receipt),
        Some(Commands::List { recent }) => handle_list(&api, recent),
        Some(Commands::Stats) => handle_stats(&api),
        Some(Commands::Leaderboard { month }) => handle_leaderboard(&api, month),
        Some(Commands::Export { output }) => handle_export(&api, output),
        Some(Commands::Profile { name, mode }) => handle_profile(&api, name, mode),
        Some(Commands::Reset { force }) => handle_reset(&api, force),
        None => handle_list(&api, Some(RECENT_WINDOW)),
    }
}

fn init_api(cli: &Cli) -> Result<SparlogApi> {
    let data_dir = resolve_data_dir(cli)?;

    // Remote adapter setup happens exactly once per invocation. A missing or
    // broken config leaves it None and everything stays local.
    let remote = RemoteConfig::load(&data_dir)
        .and_then(|config| RemoteStore::connect(&config))
        .map(|store| Box::new(store) as Box<dyn EntryStore>);

    let storage = Storage::new(LocalStore::new(data_dir), remote);
    let api = SparlogApi::new(storage);
    api.seed_demo()?;
    Ok(api)
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os("SPARLOG_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "sparlog", "sparlog")
        .ok_or_else(|| SparlogError::Store("Could not determine data dir".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    api: &SparlogApi,
    merchant: String,
    item: String,
    category: String,
    amount: String,
    discount: String,
    note: String,
    receipt: Option<PathBuf>,
) -> Result<()> {
    let result = api.add_purchase(NewEntry {
        merchant,
        item,
        category,
        amount,
        discount_percent: discount,
        note,
        receipt,
    })?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &SparlogApi, recent: Option<usize>) -> Result<()> {
    let result = api.list_purchases(recent)?;
    print_entries(&result.entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(api: &SparlogApi) -> Result<()> {
    let result = api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    if let Some(insights) = &result.insights {
        print_insights(insights);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_leaderboard(api: &SparlogApi, month: Option<String>) -> Result<()> {
    let date = match month {
        Some(raw) => parse_month(&raw)?,
        None => Local::now().date_naive(),
    };
    println!("{}", format!("Leaderboard {}", date.format("%Y-%m")).bold());
    let result = api.leaderboard(date)?;
    print_leaderboard(&result.leaderboard);
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(api: &SparlogApi, output: Option<PathBuf>) -> Result<()> {
    let result = api.export_csv()?;
    let csv = result.csv.unwrap_or_default();
    match output {
        Some(path) => {
            std::fs::write(&path, csv)?;
            println!("Wrote {}", path.display());
            print_messages(&result.messages);
        }
        // Bare CSV on stdout so it can be piped.
        None => print!("{}", csv),
    }
    Ok(())
}

fn handle_profile(api: &SparlogApi, name: Option<String>, mode: Option<String>) -> Result<()> {
    let mode = match mode.as_deref() {
        None => None,
        Some("local") => Some(StorageMode::Local),
        Some("remote") => Some(StorageMode::Remote),
        Some(other) => {
            return Err(SparlogError::Api(format!(
                "Unknown storage mode: {} (expected local or remote)",
                other
            )))
        }
    };

    let action = if name.is_none() && mode.is_none() {
        ProfileAction::Show
    } else {
        ProfileAction::Update { name, mode }
    };

    let result = api.profile(action)?;
    if let Some(profile) = &result.profile {
        print_profile(profile, api);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(api: &SparlogApi, force: bool) -> Result<()> {
    if !force {
        println!(
            "{}",
            "This erases the local profile and purchase log (remote data is kept)."
                .yellow()
        );
        println!("Re-run with --force to proceed.");
        return Ok(());
    }
    let result = api.reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn parse_month(raw: &str) -> Result<NaiveDate> {
    let parsed = match raw.split_once('-') {
        Some((y, m)) => match (y.parse::<i32>(), m.parse::<u32>()) {
            (Ok(year), Ok(month)) => NaiveDate::from_ymd_opt(year, month, 1),
            _ => None,
        },
        None => None,
    };
    parsed.ok_or_else(|| SparlogError::Api(format!("Invalid month format: {} (expected YYYY-MM)", raw)))
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_entries(entries: &[PurchaseEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        let idx_str = format!("{}. ", i + 1);

        let mut label = if entry.item.is_empty() {
            entry.merchant.clone()
        } else {
            format!("{} - {}", entry.merchant, entry.item)
        };
        if !entry.category.is_empty() {
            label.push_str(&format!(" [{}]", entry.category));
        }

        let amounts = format!(
            "{:>10}  {:>4.0}%  {:>10}",
            money(entry.amount),
            entry.discount_percent,
            money(entry.savings()).green()
        );

        let time_ago = format_time_ago(&entry.date);

        let fixed_width = idx_str.width() + 30 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label_display = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label_display.width());

        println!(
            "  {}{}{}{}  {}",
            idx_str,
            label_display,
            " ".repeat(padding),
            amounts,
            time_ago.dimmed()
        );

        if !entry.note.is_empty() {
            println!("      {}", format!("Note: {}", entry.note).dimmed());
        }
    }
}

fn print_stats(stats: &Stats) {
    println!("{}", "Totals".bold());
    println!("  Purchases: {}", stats.count);
    println!("  Spent:     {}", money(stats.total_spent));
    println!("  Saved:     {}", money(stats.total_saved).green());
}

fn print_insights(insights: &Insights) {
    println!();
    println!("{}", "Insights".bold());
    println!("  SmartScore:   {}/100", insights.smart_score);
    println!(
        "  Top category: {} ({} kr)",
        insights.top_category.category, insights.top_category.amount
    );
    println!(
        "  Best week:    {} ({} kr)",
        insights.best_week.week, insights.best_week.amount
    );
}

fn print_leaderboard(rows: &[LeaderboardRow]) {
    for (i, row) in rows.iter().enumerate() {
        println!(
            "  {}. {:<20} {:>4} purchases  {:>12}",
            i + 1,
            truncate_to_width(&row.display_name, 20),
            row.purchase_count,
            money(row.total_saved).green()
        );
    }
}

fn print_profile(profile: &Profile, api: &SparlogApi) {
    println!("Name: {}", profile.name.bold());
    let mode = match profile.mode {
        StorageMode::Local => "local".to_string(),
        StorageMode::Remote if api.remote_available() => "remote".to_string(),
        // Preference says remote but the adapter never initialized.
        StorageMode::Remote => "remote (adapter unavailable, using local)".to_string(),
    };
    println!("Mode: {}", mode);
}

fn money(value: f64) -> String {
    format!("{:.2} kr", value)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(raw_date: &str) -> String {
    let time_str = match parse_entry_date(raw_date) {
        Some(recorded) => {
            let duration = Local::now().naive_local().signed_duration_since(recorded);
            timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
        }
        None => String::new(),
    };
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
