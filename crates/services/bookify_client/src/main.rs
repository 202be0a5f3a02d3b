// File: services/bookify_client/src/main.rs
use bookify_api::BookingApiClient;
use bookify_auth::{AuthClient, SessionStore, StoredSession};
use bookify_common::logging;
use bookify_config::{load_config, AppConfig};
use bookify_flow::{BookingFlow, MyBookings};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(name = "bookify", about = "Book services from the command line")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the service catalog
    Services,
    /// Show available slots for a service on a date
    Availability {
        #[arg(long)]
        service: String,
        /// Calendar day, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },
    /// Book a slot
    Book {
        #[arg(long)]
        service: String,
        /// Calendar day, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// An RFC 3339 instant, or a 1-based index into the day's slots
        #[arg(long)]
        slot: String,
    },
    /// List your bookings
    Bookings,
    /// Log in against the identity provider (password from BOOKIFY_PASSWORD)
    Login {
        #[arg(long)]
        email: String,
    },
    /// Forget the stored session
    Logout,
}

fn session_store(config: &AppConfig) -> SessionStore {
    match config.session.as_ref().and_then(|s| s.file.clone()) {
        Some(file) => SessionStore::with_file(PathBuf::from(file)),
        None => SessionStore::in_memory(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        logging::init_with_level(Level::DEBUG);
    } else {
        logging::init();
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let api = Arc::new(BookingApiClient::new(&config.api));
    let store = Arc::new(session_store(&config));

    match cli.command {
        Command::Services => run_services(api, store).await,
        Command::Availability { service, date } => {
            run_availability(api, store, service, date).await
        }
        Command::Book {
            service,
            date,
            slot,
        } => run_book(api, store, service, date, slot).await,
        Command::Bookings => run_bookings(api, store).await,
        Command::Login { email } => run_login(&config, store, email).await,
        Command::Logout => run_logout(store),
    }
}

async fn run_services(api: Arc<BookingApiClient>, store: Arc<SessionStore>) -> ExitCode {
    let mut flow = BookingFlow::new(api, store);
    flow.load_services().await;

    if let Some(feedback) = flow.feedback() {
        eprintln!("{feedback}");
        if feedback.is_error() {
            return ExitCode::FAILURE;
        }
    }

    if flow.services().is_empty() {
        println!("No services found.");
    }
    for service in flow.services() {
        println!(
            "{}  {} (${:.2}, {} min)",
            service.id, service.name, service.price, service.duration
        );
    }
    ExitCode::SUCCESS
}

async fn run_availability(
    api: Arc<BookingApiClient>,
    store: Arc<SessionStore>,
    service: String,
    date: NaiveDate,
) -> ExitCode {
    let mut flow = BookingFlow::new(api, store);
    flow.set_service(service).await;
    flow.set_date(date).await;

    if let Some(feedback) = flow.feedback() {
        println!("{feedback}");
        if feedback.is_error() {
            return ExitCode::FAILURE;
        }
    }

    for (index, slot) in flow.available_slots().iter().enumerate() {
        println!("{:>2}. {}", index + 1, slot.to_rfc3339());
    }
    ExitCode::SUCCESS
}

async fn run_book(
    api: Arc<BookingApiClient>,
    store: Arc<SessionStore>,
    service: String,
    date: NaiveDate,
    slot: String,
) -> ExitCode {
    let mut flow = BookingFlow::new(api, store);
    flow.set_service(service).await;
    flow.set_date(date).await;

    if let Some(feedback) = flow.feedback() {
        if feedback.is_error() {
            eprintln!("{feedback}");
            return ExitCode::FAILURE;
        }
    }

    // `--slot 2` means "the second slot listed by `availability`".
    let chosen = match slot.parse::<usize>() {
        Ok(index) => {
            let Some(instant) = index
                .checked_sub(1)
                .and_then(|i| flow.available_slots().get(i))
            else {
                eprintln!("No available slot with index {index}.");
                return ExitCode::FAILURE;
            };
            instant.to_rfc3339()
        }
        Err(_) => slot,
    };

    flow.select_slot(chosen);
    flow.submit_booking().await;

    match flow.feedback() {
        Some(feedback) if feedback.is_error() => {
            eprintln!("{feedback}");
            ExitCode::FAILURE
        }
        Some(feedback) => {
            println!("{feedback}");
            ExitCode::SUCCESS
        }
        None => ExitCode::SUCCESS,
    }
}

async fn run_bookings(api: Arc<BookingApiClient>, store: Arc<SessionStore>) -> ExitCode {
    let mut view = MyBookings::new(api, store);
    view.load().await;

    if let Some(feedback) = view.feedback() {
        eprintln!("{feedback}");
        return ExitCode::FAILURE;
    }

    if view.bookings().is_empty() {
        println!("No bookings yet.");
    }
    for booking in view.bookings() {
        println!(
            "{}  {}  {} to {}  [{}]",
            booking.id,
            booking.service_name(),
            booking.start_time.to_rfc3339(),
            booking.end_time.to_rfc3339(),
            booking.status
        );
    }
    ExitCode::SUCCESS
}

async fn run_login(config: &AppConfig, store: Arc<SessionStore>, email: String) -> ExitCode {
    let Some(auth_config) = config.auth.clone() else {
        eprintln!("No [auth] section in the configuration.");
        return ExitCode::FAILURE;
    };
    let Ok(password) = std::env::var("BOOKIFY_PASSWORD") else {
        eprintln!("Set BOOKIFY_PASSWORD to log in.");
        return ExitCode::FAILURE;
    };

    let client = AuthClient::new(auth_config);
    match client.login(&email, &password).await {
        Ok(tokens) => match store.store(StoredSession::from(tokens)) {
            Ok(()) => {
                println!("Logged in as {email}.");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Failed to persist session: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_logout(store: Arc<SessionStore>) -> ExitCode {
    match store.clear() {
        Ok(()) => {
            println!("Logged out.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to clear session: {err}");
            ExitCode::FAILURE
        }
    }
}
