//! # chatpulse CLI
//!
//! Command-line front end for the chatpulse library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chatpulse::ChatpulseError;
use chatpulse::cli::Args;
use chatpulse::core::{UserStats, WordSummary, apply_filters};
use chatpulse::format::write_to_format;
use chatpulse::session::{Analysis, Session};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), ChatpulseError> {
    let total_start = Instant::now();
    let config = args.to_config()?;
    let filter = args.to_filter()?;
    let export_format = args.export_format()?;

    println!("📊 chatpulse v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if let Some(from) = &args.from {
        println!("📅 From:    {}", from);
    }
    if let Some(to) = &args.to {
        println!("📅 To:      {}", to);
    }
    if !args.users.is_empty() {
        println!("👤 Users:   {}", args.users.join(", "));
    }
    println!();

    let forced = config.parse.format.is_some();
    let mut session = Session::new(config);

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let stats = session.load_path(&args.input)?;
    println!(
        "   Found {} messages in {} format{} ({:.2}s)",
        stats.records,
        stats.format,
        if forced { "" } else { " (detected)" },
        parse_start.elapsed().as_secs_f64()
    );
    let skipped = stats.malformed_lines + stats.orphan_lines;
    if skipped > 0 {
        println!("   Skipped {} unparsable lines", skipped);
    }
    if stats.media_dropped > 0 {
        println!("   Dropped {} media placeholders", stats.media_dropped);
    }

    let analysis = session.analyze(&filter)?;
    if filter.is_active() {
        println!(
            "🔍 {} of {} messages match the filter",
            analysis.message_count, stats.records
        );
    }

    print_report(&analysis);

    if let (Some(path), Some(format)) = (&args.export, export_format) {
        let selected = apply_filters(session.records(), &filter);
        write_to_format(&selected, path, format)?;
        println!("💾 {} table written to {}", format, path.display());
    }

    if let Some(path) = &args.report {
        analysis.write_json(path)?;
        println!("📝 Report written to {}", path.display());
    }

    println!();
    println!(
        "✅ Done in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_report(analysis: &Analysis) {
    for user in &analysis.user_stats {
        println!();
        print_user(user);
    }

    if let Some(busiest) = analysis.heatmap.cells().iter().max_by_key(|c| c.count) {
        println!();
        println!(
            "🔥 Busiest slot: {} {:02}:00 ({} messages)",
            busiest.weekday, busiest.hour, busiest.count
        );
    }
}

fn print_user(user: &UserStats) {
    println!("👤 {}", user.sender);
    println!("   Messages:    {}", user.message_count);
    match &user.words {
        WordSummary::Available(words) => println!(
            "   Words/msg:   mean {:.2}, median {:.1}, std dev {:.2}, max {}",
            words.mean, words.median, words.std_dev, words.max
        ),
        WordSummary::InsufficientSample { .. } => println!("   Words/msg:   N/A"),
    }
    if user.top_emojis.is_empty() {
        println!("   Emojis:      -");
    } else {
        let emojis: Vec<String> = user.top_emojis.iter().map(ToString::to_string).collect();
        println!("   Emojis:      {}", emojis.join(" "));
    }
}
