//! Gestión Comercial server
//!
//! Quotation tracking backend. Reads configuration from a TOML file
//! (~/.config/gestion-comercial/config.toml).

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use gestion_comercial::config::AppConfig;
use gestion_comercial::infrastructure::crypto::jwt::JwtConfig;
use gestion_comercial::infrastructure::database::migrator::Migrator;
use gestion_comercial::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("GESTION_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Gestión Comercial server...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "gestion-comercial".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Seed a default admin profile on first run
    create_default_admin(&db, &app_cfg).await;

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(db.clone(), jwt_config);

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Gestión Comercial shutdown complete");
    Ok(())
}

/// Create a default admin profile if no profiles exist
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use gestion_comercial::infrastructure::crypto::password::hash_password;
    use gestion_comercial::infrastructure::database::entities::profile;
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    let profile_count = profile::Entity::find().count(db).await.unwrap_or(0);

    if profile_count == 0 {
        info!("Creating default admin profile...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let now = chrono::Utc::now();
        let admin = profile::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(app_cfg.admin.email.clone()),
            display_name: Set(Some(app_cfg.admin.display_name.clone())),
            password_hash: Set(password_hash),
            role: Set(Some("admin".to_string())),
            is_active: Set(true),
            permissions: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        match admin.insert(db).await {
            Ok(_) => {
                info!("Default admin created: {}", app_cfg.admin.email);
                warn!("Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin profile: {}", e);
            }
        }
    }
}
