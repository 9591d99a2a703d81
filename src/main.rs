//! Command line front end for recording client versments.

use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::Config;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;

use versment_crm::db::{DbPool, establish_connection_pool};
use versment_crm::dialog::client_search::ClientSearch;
use versment_crm::dialog::versment::VersmentDialog;
use versment_crm::domain::client::NewClient;
use versment_crm::domain::types::{ClientId, VersmentId, VersmentType, format_date};
use versment_crm::domain::versment::Versment;
use versment_crm::forms::FormError;
use versment_crm::models::config::AppConfig;
use versment_crm::repository::DieselRepository;
use versment_crm::repository::errors::RepositoryError;
use versment_crm::services::client as client_service;
use versment_crm::services::versment as versment_service;
use versment_crm::services::{ServiceError, ServiceResult};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Parser, Debug)]
#[command(name = "versment-crm", version, about = "Record payments received from clients")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List clients, optionally filtered like the client picker does
    Clients {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Register a new client
    AddClient {
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        first_name: Option<String>,
    },
    /// List versments, optionally for one client
    List {
        #[arg(short, long)]
        client: Option<i32>,
    },
    /// Show one versment
    Show { id: i32 },
    /// Record a new versment
    Add {
        /// Client label or search text matching a single client
        #[arg(short, long)]
        client: String,
        #[arg(short, long)]
        amount: String,
        #[arg(short = 't', long = "type")]
        kind: Option<VersmentType>,
        /// Payment date as YYYY-MM-DD, today when omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Year concerned, the current year when omitted
        #[arg(short, long)]
        year: Option<String>,
    },
    /// Change a recorded versment
    Edit {
        id: i32,
        #[arg(short, long)]
        client: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<VersmentType>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },
    /// Delete a versment
    Delete { id: i32 },
    /// Total amount paid by a client
    Total { client_id: i32 },
}

/// Field overrides applied to the dialog before confirming it.
struct DialogInput {
    client: Option<String>,
    amount: Option<String>,
    kind: Option<VersmentType>,
    date: Option<String>,
    year: Option<String>,
}

fn load_config() -> Result<AppConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<AppConfig>()
}

fn run_migrations(pool: &DbPool) -> Result<(), String> {
    let mut pooled = pool.get().map_err(|e| e.to_string())?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| e.to_string())?;
    for version in applied {
        log::info!("Applied migration {version}");
    }
    Ok(())
}

fn print_versment(versment: &Versment) {
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        versment.id.map(|id| id.to_string()).unwrap_or_default(),
        versment.client_id,
        versment.amount,
        versment.kind,
        format_date(versment.payment_date),
        versment.year_concerned,
    );
}

/// Points the dialog's client picker at the client described by `query`.
///
/// A query narrowing the candidates to a single client selects it, as a
/// user would pick the only entry left in the list.
fn pick_client(dialog: &mut VersmentDialog, query: &str) {
    let search = dialog.search_mut();
    search.set_query(query);
    if search.candidates().count() == 1 {
        search.select(0);
    }
}

fn fill_and_confirm(dialog: &mut VersmentDialog, input: DialogInput) -> ServiceResult<Versment> {
    if let Some(client) = &input.client {
        pick_client(dialog, client);
    }
    if let Some(amount) = &input.amount {
        dialog.set_amount(amount);
    }
    if input.kind.is_some() {
        dialog.set_kind(input.kind);
    }
    if let Some(date) = &input.date {
        dialog.set_payment_date(date);
    }
    if let Some(year) = &input.year {
        dialog.set_year_concerned(year);
    }

    if let Err(err) = dialog.confirm() {
        if matches!(err, FormError::InvalidClient) {
            for item in dialog.search().candidates() {
                eprintln!("  candidate: {}", item.label());
            }
        }
        return Err(err.into());
    }

    dialog.result().ok_or(ServiceError::Form(FormError::InvalidClient))
}

fn run(command: Command, repo: &DieselRepository) -> ServiceResult<()> {
    match command {
        Command::Clients { search } => {
            let mut picker = ClientSearch::new(client_service::fetch_all_clients(repo)?);
            picker.set_query(search.as_deref().unwrap_or_default());
            for item in picker.candidates() {
                println!("{}", item.label());
            }
        }
        Command::AddClient {
            last_name,
            first_name,
        } => {
            let new_client = NewClient::try_new(last_name, first_name)?;
            let client = client_service::create_client(repo, &new_client)?;
            println!("{}", client.display_label());
        }
        Command::List { client } => {
            let versments = match client {
                Some(client_id) => {
                    versment_service::fetch_versments_by_client(repo, ClientId::new(client_id)?)?
                }
                None => versment_service::fetch_all_versments(repo)?,
            };
            versments.iter().for_each(print_versment);
        }
        Command::Show { id } => {
            let versment = versment_service::get_versment_by_id(repo, VersmentId::new(id)?)?
                .ok_or(ServiceError::NotFound)?;
            print_versment(&versment);
        }
        Command::Add {
            client,
            amount,
            kind,
            date,
            year,
        } => {
            let mut dialog = VersmentDialog::open(repo, None)?;
            let versment = fill_and_confirm(
                &mut dialog,
                DialogInput {
                    client: Some(client),
                    amount: Some(amount),
                    kind,
                    date,
                    year,
                },
            )?;
            let id = versment_service::save_versment(repo, &versment)?;
            println!("{id}");
        }
        Command::Edit {
            id,
            client,
            amount,
            kind,
            date,
            year,
        } => {
            let existing = versment_service::get_versment_by_id(repo, VersmentId::new(id)?)?
                .ok_or(ServiceError::NotFound)?;
            let mut dialog = VersmentDialog::open(repo, Some(existing))?;
            let versment = fill_and_confirm(
                &mut dialog,
                DialogInput {
                    client,
                    amount,
                    kind,
                    date,
                    year,
                },
            )?;
            versment_service::save_versment(repo, &versment)?;
            print_versment(&versment);
        }
        Command::Delete { id } => {
            if !versment_service::delete_versment(repo, VersmentId::new(id)?)? {
                return Err(ServiceError::NotFound);
            }
            log::info!("Deleted versment {id}");
        }
        Command::Total { client_id } => {
            let total = versment_service::total_versments_by_client(repo, ClientId::new(client_id)?)?;
            println!("{total}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        return ExitCode::FAILURE;
    }

    let repo = DieselRepository::new(pool);

    match run(cli.command, &repo) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ServiceError::Form(err)) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(ServiceError::Repository(err @ RepositoryError::UnknownClient(_))) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
