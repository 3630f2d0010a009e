// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod admin;
mod auth;
mod booking;
mod error;
mod mail;
mod pages;
mod render;
mod session;

#[cfg(test)]
mod tests;

use axum::{Router, routing::get};
use bungalow_bliss_api::{
    AuthenticationService, DEFAULT_MAIL_FROM, DEFAULT_OWNER_EMAIL, MailSettings,
};
use bungalow_bliss_persistence::Persistence;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tower_sessions::{
    Expiry, MemoryStore, SessionManagerLayer,
    cookie::{SameSite, time::Duration as CookieDuration},
};
use tracing::{error, info};

use crate::error::HttpError;
use crate::mail::{LogTransport, Mailer, run_mail_loop};
use crate::render::{JsonRenderer, Renderer};

/// Bungalow Bliss - booking site for three holiday bungalows
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Mark the session cookie as secure (HTTPS only)
    #[arg(long)]
    production: bool,

    /// Seconds to wait for the database before failing a request
    #[arg(long, default_value_t = 3)]
    db_timeout_secs: u64,

    /// Sender address of outgoing mail
    #[arg(long, default_value = DEFAULT_MAIL_FROM)]
    mail_from: String,

    /// Address that receives new-reservation notifications
    #[arg(long, default_value = DEFAULT_OWNER_EMAIL)]
    owner_email: String,

    /// E-mail of an administrator account to create at startup
    #[arg(long, requires = "admin_password")]
    admin_email: Option<String>,

    /// Password of the administrator account created at startup
    #[arg(long, requires = "admin_email")]
    admin_password: Option<String>,
}

/// Runtime settings shared by all handlers.
#[derive(Debug, Clone)]
struct AppConfig {
    /// Whether the site is served over HTTPS.
    production: bool,
    /// Upper bound on waiting for the database.
    db_timeout: Duration,
    mail: MailSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            production: false,
            db_timeout: Duration::from_secs(3),
            mail: MailSettings::default(),
        }
    }
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        Self {
            production: args.production,
            db_timeout: Duration::from_secs(args.db_timeout_secs),
            mail: MailSettings {
                from: args.mail_from.clone(),
                owner: args.owner_email.clone(),
            },
        }
    }
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; handlers reach it through
/// `AppState::persistence`, which bounds the wait.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    config: Arc<AppConfig>,
    renderer: Arc<dyn Renderer>,
    mailer: Mailer,
}

impl AppState {
    fn new(
        persistence: Persistence,
        config: AppConfig,
        renderer: Arc<dyn Renderer>,
        mailer: Mailer,
    ) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            config: Arc::new(config),
            renderer,
            mailer,
        }
    }

    /// Locks the persistence layer.
    ///
    /// # Errors
    ///
    /// Returns a 500 error if the lock is not acquired within the configured
    /// database timeout.
    async fn persistence(&self) -> Result<MutexGuard<'_, Persistence>, HttpError> {
        tokio::time::timeout(self.config.db_timeout, self.persistence.lock())
            .await
            .map_err(|_| {
                error!(
                    timeout_secs = self.config.db_timeout.as_secs(),
                    "Timed out waiting for the database"
                );
                HttpError::internal("Database timeout")
            })
    }
}

/// Builds the application router with all endpoints.
///
/// Sessions live in a `MemoryStore`, which never evicts expired entries;
/// memory grows with every visitor until the process restarts.
fn build_router(app_state: AppState) -> Router {
    let session_layer: SessionManagerLayer<MemoryStore> =
        SessionManagerLayer::new(MemoryStore::default())
            .with_secure(app_state.config.production)
            .with_same_site(SameSite::Lax)
            .with_expiry(Expiry::OnInactivity(CookieDuration::hours(24)));

    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/eremite", get(pages::eremite))
        .route("/couple", get(pages::couple))
        .route("/family", get(pages::family))
        .route(
            "/reservation",
            get(booking::search_page).post(booking::search),
        )
        .route(
            "/reservation-json",
            get(booking::availability_json_query).post(booking::availability_json_form),
        )
        .route("/choose-bungalow/{id}", get(booking::choose_bungalow))
        .route("/book-now", get(booking::book_now))
        .route(
            "/make-reservation",
            get(booking::reservation_form).post(booking::make_reservation),
        )
        .route("/reservation-summary", get(booking::reservation_summary))
        .route("/user/login", get(auth::login_page).post(auth::login))
        .route("/user/logout", get(auth::logout))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/reservations-new", get(admin::new_reservations))
        .route("/admin/reservations-all", get(admin::all_reservations))
        .route(
            "/admin/reservations-calendar",
            get(admin::calendar).post(admin::save_calendar),
        )
        .route(
            "/admin/reservations/{src}/{id}/show",
            get(admin::show_reservation).post(admin::update_reservation),
        )
        .route(
            "/admin/process-reservation/{src}/{id}/do",
            get(admin::process_reservation),
        )
        .route(
            "/admin/delete-reservation/{src}/{id}/do",
            get(admin::delete_reservation),
        )
        .layer(session_layer)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bungalow Bliss server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let (Some(email), Some(password)) = (&args.admin_email, &args.admin_password)
        && let Some(user_id) =
            AuthenticationService::ensure_admin(&mut persistence, "Administrator", email, password)?
    {
        info!(user_id, email = %email, "Created administrator account");
    }

    let (mailer, mail_rx) = Mailer::new();
    tokio::spawn(run_mail_loop(mail_rx, LogTransport));

    let app_state: AppState = AppState::new(
        persistence,
        AppConfig::from(&args),
        Arc::new(JsonRenderer),
        mailer,
    );

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
