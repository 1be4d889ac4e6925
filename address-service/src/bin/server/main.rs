use std::sync::Arc;

use address_service::address::ports::AddressServicePort;
use address_service::address::service::AddressService;
use address_service::config::Config;
use address_service::inbound::http::router::create_router;
use address_service::repositories::InMemoryStore;
use address_service::repositories::PostgresAddressRepository;
use address_service::repositories::PostgresUserRepository;
use address_service::user::ports::UserServicePort;
use address_service::user::service::UserService;
use auth::Authenticator;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "address_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "address-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        in_memory = config.database.url.is_empty(),
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_work_factor(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .with_password_hasher(password_hasher)
            .with_token_lifetime(chrono::Duration::hours(config.jwt.expiration_hours)),
    );
    let auth_gate = Arc::new(authenticator.gate());

    let (user_service, address_service) =
        if config.database.url.is_empty() {
            tracing::warn!("No database url configured, using in-memory store");
            let store = Arc::new(InMemoryStore::new());
            let user_service: Arc<dyn UserServicePort> =
                Arc::new(UserService::new(Arc::clone(&store), Arc::clone(&authenticator)));
            let address_service: Arc<dyn AddressServicePort> =
                Arc::new(AddressService::new(store));
            (user_service, address_service)
        } else {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::clone(&authenticator),
            ));
            let address_service: Arc<dyn AddressServicePort> = Arc::new(AddressService::new(
                Arc::new(PostgresAddressRepository::new(pg_pool)),
            ));
            (user_service, address_service)
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, address_service, auth_gate);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
