//! Libris CLI
//!
//! Command-line front end for the Libris catalog.
//!
//! # Commands
//!
//! - `add-book`, `list-books`, `find-book`, `remove-book` - Manage books
//! - `add-user`, `list-users`, `find-user`, `remove-user` - Manage users
//! - `checkout`, `list-checkouts`, `find-checkout` - Manage checkouts
//! - `inspect` - Display catalog statistics and validity
//! - `menu` - Interactive numbered menu (the default)

mod commands;

use clap::{Parser, Subcommand};
use libris_core::{Config, Library, DEFAULT_DATA_FILE};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Libris library catalog tools.
#[derive(Parser)]
#[command(name = "libris")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the catalog snapshot file
    #[arg(global = true, short, long, env = "LIBRIS_DATA", default_value = DEFAULT_DATA_FILE)]
    path: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Require checkouts to reference an existing user and book
    #[arg(global = true, long)]
    enforce_references: bool,

    /// Do not take the catalog lock
    #[arg(global = true, long)]
    no_lock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book to the catalog
    AddBook {
        /// Book title
        #[arg(long)]
        title: String,

        /// Book author
        #[arg(long)]
        author: String,

        /// 10- or 13-digit ISBN
        #[arg(long)]
        isbn: String,
    },

    /// List all books
    ListBooks,

    /// Find a book by ISBN
    FindBook {
        /// ISBN to look up
        isbn: String,
    },

    /// Remove a book by ISBN
    RemoveBook {
        /// ISBN to remove
        isbn: String,
    },

    /// Register a user
    AddUser {
        /// Full name
        #[arg(long)]
        name: String,

        /// Numeric user id
        #[arg(long)]
        user_id: String,
    },

    /// List all users
    ListUsers,

    /// Find a user by id
    FindUser {
        /// User id to look up
        user_id: String,
    },

    /// Remove a user by id
    RemoveUser {
        /// User id to remove
        user_id: String,
    },

    /// Check a book out to a user
    Checkout {
        /// Numeric user id
        #[arg(long)]
        user_id: String,

        /// ISBN of the book
        #[arg(long)]
        isbn: String,
    },

    /// List active checkouts
    ListCheckouts,

    /// Show who has a book checked out
    FindCheckout {
        /// ISBN to look up
        isbn: String,
    },

    /// Display catalog statistics and validity
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run the interactive menu
    Menu,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Menu);

    // Commands that do not open the catalog
    match &command {
        Commands::Inspect { format } => {
            commands::inspect::run(&cli.path, format, &mut io::stdout())?;
            return Ok(());
        }
        Commands::Version => {
            println!("Libris CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Libris Core v{}", libris_core::VERSION);
            return Ok(());
        }
        _ => {}
    }

    let config = Config::new()
        .path(&cli.path)
        .lock(!cli.no_lock)
        .enforce_references(cli.enforce_references);
    let mut library = Library::open_with_config(config)?;
    let out = &mut io::stdout();

    match command {
        Commands::AddBook {
            title,
            author,
            isbn,
        } => commands::books::add(&mut library, &title, &author, &isbn, out)?,
        Commands::ListBooks => commands::books::list(&library, out)?,
        Commands::FindBook { isbn } => commands::books::find(&library, &isbn, out)?,
        Commands::RemoveBook { isbn } => commands::books::remove(&mut library, &isbn, out)?,
        Commands::AddUser { name, user_id } => {
            commands::users::add(&mut library, &name, &user_id, out)?;
        }
        Commands::ListUsers => commands::users::list(&library, out)?,
        Commands::FindUser { user_id } => commands::users::find(&library, &user_id, out)?,
        Commands::RemoveUser { user_id } => {
            commands::users::remove(&mut library, &user_id, out)?;
        }
        Commands::Checkout { user_id, isbn } => {
            commands::checkouts::checkout(&mut library, &user_id, &isbn, out)?;
        }
        Commands::ListCheckouts => commands::checkouts::list(&library, out)?,
        Commands::FindCheckout { isbn } => commands::checkouts::find(&library, &isbn, out)?,
        Commands::Menu => commands::menu::run(&mut library)?,
        Commands::Inspect { .. } | Commands::Version => {}
    }

    Ok(())
}
