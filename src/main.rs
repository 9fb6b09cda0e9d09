//! book-library entry point.

use book_library::{
    client::{
        AddBookForm, ApiClient, BookStore, DEFAULT_API_URL, LibraryScreen, SubmitOutcome,
        screen::{self, DELETE_PROMPT},
    },
    config::{ClientCommand, Cli, Command, Config, ServeArgs},
    db::Database,
    library::LANGUAGES,
    server,
};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    match cli.command {
        Some(Command::Init { force }) => cmd_init(force, config),
        Some(Command::Client { api_url, action }) => cmd_client(api_url, action).await,
        Some(Command::Serve(args)) => cmd_serve(config, args).await,
        None => {
            // Default: start server with env overrides validated like `serve`
            let args = ServeArgs::from_env().unwrap_or_else(|e| e.exit());
            cmd_serve(config, args).await
        }
    }
}

fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Initialize config and database.
fn cmd_init(force: bool, config: Config) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());

    let db = Database::open(&config.database.url)?;
    println!(
        "Initialized database: {} ({} books)",
        config.database.url,
        db.count_books()?
    );

    println!("\nEdit config.toml to configure your server.");
    println!("Then run: book-library serve");

    Ok(())
}

/// Start the server.
async fn cmd_serve(mut config: Config, args: ServeArgs) -> anyhow::Result<()> {
    config.apply_overrides(&args);

    init_logging("book_library=info,tower_http=info");

    let db = match Database::open(&config.database.url) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, database = %config.database.url, "Cannot open database");
            return Err(e.into());
        }
    };

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.url,
        books = db.count_books()?,
        "Connected to database"
    );

    let bind = config.server.bind;
    let state = server::AppState::new_with_db(config, db);
    let app = server::create_router(state);

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(address = %bind, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Client commands. The collection is fetched once before acting.
async fn cmd_client(api_url: Option<String>, action: ClientCommand) -> anyhow::Result<()> {
    init_logging("book_library=warn");

    if let ClientCommand::Languages = action {
        for language in LANGUAGES {
            println!("{}", language);
        }
        return Ok(());
    }

    let api = ApiClient::new(api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()));
    let store = BookStore::new(api);
    // A failed fetch is logged by the store; the library just shows empty.
    store.load().await;

    match action {
        ClientCommand::List {
            author,
            language,
            sort,
        } => {
            let library = store.snapshot();
            let mut screen = LibraryScreen::new();
            screen.set_sort(sort);
            screen.set_author_filter(author);
            screen.set_language_filter(language);

            let visible = screen.visible(&library);
            if visible.is_empty() {
                println!("No books found.");
            }
            for book in visible {
                println!("{}\n", screen::render_row(&book));
            }
        }

        ClientCommand::Add {
            title,
            author,
            info,
            language,
        } => {
            let mut form = AddBookForm {
                title,
                author,
                info,
                language,
            };
            match form.submit(&store).await {
                SubmitOutcome::Added(book) => println!("Added: {} ({})", book.title, book.id),
                SubmitOutcome::Rejected(alert) => anyhow::bail!(alert),
                SubmitOutcome::Failed => anyhow::bail!("Book was not added"),
            }
        }

        ClientCommand::Update {
            id,
            title,
            author,
            info,
            language,
        } => {
            let Some(mut book) = store.get(&id) else {
                anyhow::bail!("Book not found: {}", id);
            };
            if let Some(title) = title {
                book.title = title;
            }
            if let Some(author) = author {
                book.author = author;
            }
            if let Some(info) = info {
                book.info = info;
            }
            if let Some(language) = language {
                book.language = language;
            }

            match store.update(book).await {
                Some(updated) => println!("{}", screen::render_row(&updated)),
                None => anyhow::bail!("Book was not updated"),
            }
        }

        ClientCommand::Delete { id, yes } => {
            let mut screen = LibraryScreen::new();
            screen.request_delete(id.clone());

            if !yes && !confirm(DELETE_PROMPT)? {
                screen.cancel_delete();
                println!("Cancelled.");
                return Ok(());
            }

            if screen.confirm_delete(&store).await {
                println!("Deleted: {}", id);
            } else {
                anyhow::bail!("Book was not deleted");
            }
        }

        ClientCommand::Languages => {}
    }

    Ok(())
}

/// Ask a yes/no question on the terminal.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
