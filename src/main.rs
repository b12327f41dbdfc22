use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tutor_match::config::Settings;
use tutor_match::core::Matcher;
use tutor_match::routes::{self, error as route_errors, AppState};
use tutor_match::services::{Catalog, FileSessionStore, SessionContext};

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&settings);
    info!("Starting Tutor Match service...");

    let weights = match settings.scoring.to_weights() {
        Ok(w) => w,
        Err(e) => {
            error!("Invalid scoring configuration: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match &settings.data.seed_path {
        Some(path) => match Catalog::from_json_file(path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load seed data from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            info!("No seed path configured, using built-in sample data");
            Catalog::sample()
        }
    };

    let session = SessionContext::init(Box::new(FileSessionStore::new(&settings.session.dir)));
    info!(
        "Session storage at {} ({})",
        settings.session.dir.display(),
        if session.is_logged_in() { "restored user" } else { "no active session" }
    );

    let matcher = Matcher::new(weights);
    info!("Matcher initialized with weights: {:?}", weights);

    if let Some(seed) = settings.matching.seed {
        info!("Using fixed matching seed {}", seed);
    }

    let app_state = AppState::new(catalog, session, matcher, settings.matching.clone());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(route_errors::json_config())
            .app_data(route_errors::query_config())
            .app_data(route_errors::path_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
