//! Console entry point for the hymnal. Every subcommand is a thin call into
//! the persistence layer; anything that goes wrong below bubbles up here,
//! gets logged, and turns into a non-zero exit instead of a panic.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use christ_in_song::{import, AppPaths, Database, Hymn};

#[derive(Parser)]
#[command(name = "christ-in-song", version, about = "Christ In Song hymnal")]
struct Cli {
    /// Store the database under this directory instead of the platform
    /// default.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database, seeding defaults when it does not exist yet.
    Init,
    /// Display a hymn by number and record the view.
    Show { number: i64 },
    /// Full-text search across titles, verses, authors, and composers.
    Search { query: String },
    /// List favorited hymns, most recently added first.
    Favorites,
    /// Mark a hymn as favorite.
    Favorite { number: i64 },
    /// Remove a hymn from favorites.
    Unfavorite { number: i64 },
    /// List recently viewed hymns, most recent first.
    Recent {
        #[arg(default_value_t = 10)]
        limit: usize,
    },
    /// List categories with their hymn counts.
    Categories,
    /// Show database statistics.
    Stats,
    /// Copy the database into the backups directory.
    Backup,
    /// Replace all hymns with the contents of a hymnal JSON file.
    Import { file: PathBuf },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("Error: {err:#}");
            eprintln!("Run with RUST_LOG=debug for details.");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = match &cli.data_dir {
        Some(dir) => AppPaths::for_data_dir(dir),
        None => AppPaths::discover()?,
    };

    let db = Database::new(paths);
    db.initialize()?;

    match cli.command {
        Command::Init => {
            let stats = db.database_stats()?;
            println!(
                "Database ready at {} ({} hymns, {} categories).",
                db.paths().database_path().display(),
                stats.total_hymns,
                stats.total_categories
            );
        }
        Command::Show { number } => match db.fetch_hymn_by_number(number)? {
            Some(hymn) => {
                db.add_recently_viewed(hymn.id)?;
                print_hymn(&hymn);
            }
            None => println!("No hymn with number {number}."),
        },
        Command::Search { query } => {
            let hymns = db.search_hymns(&query)?;
            if hymns.is_empty() {
                println!("No hymns match {query:?}.");
            }
            for hymn in &hymns {
                println!("{hymn}");
            }
        }
        Command::Favorites => {
            let hymns = db.fetch_favorites()?;
            if hymns.is_empty() {
                println!("No favorites yet.");
            }
            for hymn in &hymns {
                println!("{hymn}");
            }
        }
        Command::Favorite { number } => {
            let hymn = resolve_hymn(&db, number)?;
            if db.add_favorite(hymn.id)? {
                println!("Added {hymn} to favorites.");
            } else {
                println!("{hymn} is already a favorite.");
            }
        }
        Command::Unfavorite { number } => {
            let hymn = resolve_hymn(&db, number)?;
            if db.remove_favorite(hymn.id)? {
                println!("Removed {hymn} from favorites.");
            } else {
                println!("{hymn} was not a favorite.");
            }
        }
        Command::Recent { limit } => {
            for hymn in &db.fetch_recently_viewed(limit)? {
                println!("{hymn}");
            }
        }
        Command::Categories => {
            for category in &db.fetch_categories()? {
                println!("{category}");
            }
        }
        Command::Stats => {
            let stats = db.database_stats()?;
            println!("Hymns:      {}", stats.total_hymns);
            println!("Categories: {}", stats.total_categories);
            println!("Favorites:  {}", stats.total_favorites);
            println!("Size:       {} bytes", stats.database_size_bytes);
            println!("Version:    {}", stats.database_version);
        }
        Command::Backup => {
            let path = db.backup_database()?;
            println!("Backup written to {}.", path.display());
        }
        Command::Import { file } => {
            let report = import::import_hymns(&db, &file)?;
            println!(
                "Imported {} hymns from {:?} ({}); {} skipped.",
                report.imported, report.title, report.language, report.skipped
            );
        }
    }

    Ok(())
}

/// Look a hymn up by number or fail with a message naming it.
fn resolve_hymn(db: &Database, number: i64) -> Result<Hymn> {
    db.fetch_hymn_by_number(number)?
        .ok_or_else(|| anyhow!("no hymn with number {number}"))
}

/// Print a hymn the way the reading pane lays it out: header, attribution,
/// then the full text.
fn print_hymn(hymn: &Hymn) {
    println!("{hymn}");
    if let Some(category) = &hymn.category_name {
        println!("Category: {category}");
    }
    if let Some(author) = &hymn.author {
        println!("Author: {author}");
    }
    if let Some(composer) = &hymn.composer {
        println!("Composer: {composer}");
    }
    if let Some(reference) = &hymn.scripture_reference {
        println!("Scripture: {reference}");
    }
    println!();
    println!("{}", hymn.full_text());
}
