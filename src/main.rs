//! BoostBuddy gamification service
//!
//! Main application entry point

use teloxide::Bot;
use tracing::info;

use BoostBuddy::{
    config::Settings,
    database::{connection, DatabaseService},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file appender on shutdown
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting BoostBuddy gamification service...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = connection::create_pool(&settings.database).await?;

    // Run database migrations
    connection::run_migrations(&db_pool).await?;

    // Initialize services
    info!("Initializing services...");
    let database_service = DatabaseService::new(db_pool);
    let bot = Bot::new(&settings.telegram.token);
    let services = ServiceFactory::new(bot, settings, database_service);

    info!("BoostBuddy is ready!");

    // The dispatcher loop is the only long-running task; core operations are
    // driven by the transport layer through the service interfaces.
    tokio::select! {
        _ = services.notification_dispatcher.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("BoostBuddy has been shut down.");

    Ok(())
}
