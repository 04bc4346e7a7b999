use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, info};

use portal_api::{handlers, middleware::auth_middleware, AppState};
use portal_core::repositories::{
    AccountRepository, ActionRepository, AppointmentRepository, DocumentStore, KycRepository,
    Mailer, ProfileRepository, ProgressRepository, ResetTokenRepository,
};
use portal_core::services::{AuthService, DeletionService, ProvisioningService, ReviewService};
use portal_infrastructure::{
    create_pool, run_migrations, LocalDocumentStore, PgAccountRepository, PgActionRepository,
    PgAppointmentRepository, PgKycRepository, PgProfileRepository, PgProgressRepository,
    PgResetTokenRepository, SmtpMailer,
};
use portal_security::{JwtService, UrlSigner};
use portal_shared::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    portal_shared::telemetry::init_telemetry();

    info!("Portal server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database
    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    run_migrations(&pool).await?;
    info!("Database connection established.");

    // Repositories
    let accounts: Arc<dyn AccountRepository> = Arc::new(PgAccountRepository::new(pool.clone()));
    let profiles: Arc<dyn ProfileRepository> = Arc::new(PgProfileRepository::new(pool.clone()));
    let kyc: Arc<dyn KycRepository> = Arc::new(PgKycRepository::new(pool.clone()));
    let appointments: Arc<dyn AppointmentRepository> =
        Arc::new(PgAppointmentRepository::new(pool.clone()));
    let progress: Arc<dyn ProgressRepository> = Arc::new(PgProgressRepository::new(pool.clone()));
    let actions: Arc<dyn ActionRepository> = Arc::new(PgActionRepository::new(pool.clone()));
    let reset_tokens: Arc<dyn ResetTokenRepository> =
        Arc::new(PgResetTokenRepository::new(pool.clone()));

    // Adapters
    let url_signer = UrlSigner::new(&config.storage.signing_key);
    let documents: Arc<dyn DocumentStore> = Arc::new(LocalDocumentStore::new(
        config.storage.root.clone(),
        url_signer.clone(),
        config.app.public_url.clone(),
        config.storage.url_ttl_seconds,
    ));
    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config.email)?);
    let jwt = Arc::new(JwtService::new(
        config.jwt.secret.clone(),
        config.jwt.access_token_expiry,
    ));

    // Services
    let auth = Arc::new(AuthService::new(
        accounts.clone(),
        profiles.clone(),
        reset_tokens.clone(),
        mailer.clone(),
        jwt.clone(),
        config.app.public_url.clone(),
    ));
    let provisioning = Arc::new(ProvisioningService::new(
        accounts.clone(),
        profiles.clone(),
        reset_tokens.clone(),
        mailer.clone(),
        config.app.public_url.clone(),
    ));
    let deletion = Arc::new(DeletionService::new(
        profiles.clone(),
        kyc.clone(),
        appointments.clone(),
        progress.clone(),
        actions.clone(),
        accounts.clone(),
        documents.clone(),
    ));
    let review = Arc::new(ReviewService::new(
        kyc.clone(),
        profiles.clone(),
        mailer.clone(),
    ));

    let state = AppState {
        auth,
        provisioning,
        deletion,
        review,
        profiles,
        kyc,
        appointments,
        progress,
        actions,
        documents,
        url_signer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state, jwt);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, jwt: Arc<JwtService>) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/reset-password", post(handlers::auth::reset_password))
        .route("/api/auth/callback", get(handlers::auth::auth_callback))
        .route("/api/recover-password", post(handlers::auth::recover_password))
        // Access control on raw downloads is the URL signature itself
        .route(
            "/api/documents/raw/{*path}",
            get(handlers::documents::download_document),
        );

    // Protected routes (session required)
    let protected_routes = Router::new()
        .route("/api/users/create", post(handlers::users::create_user))
        .route(
            "/api/users/document-submission",
            post(handlers::users::document_submission),
        )
        .route("/api/admin/delete-user", post(handlers::admin::delete_user))
        .route("/api/profiles", get(handlers::profiles::list_profiles))
        .route(
            "/api/profiles/{user_id}",
            get(handlers::profiles::get_profile).put(handlers::profiles::update_profile),
        )
        .route(
            "/api/managers/{manager_id}/clients",
            get(handlers::profiles::manager_clients),
        )
        .route(
            "/api/kyc/{user_id}",
            get(handlers::kyc::get_kyc).put(handlers::kyc::submit_kyc),
        )
        .route("/api/kyc/{user_id}/approve", post(handlers::kyc::approve_kyc))
        .route("/api/kyc/{user_id}/reject", post(handlers::kyc::reject_kyc))
        .route(
            "/api/documents/{user_id}",
            get(handlers::documents::list_documents).post(handlers::documents::upload_document),
        )
        .route(
            "/api/documents/{user_id}/{file}",
            delete(handlers::documents::delete_document),
        )
        .route(
            "/api/clients/{client_id}/appointments",
            get(handlers::appointments::list_for_client),
        )
        .route(
            "/api/appointments",
            post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        )
        .route(
            "/api/clients/{client_id}/progress",
            get(handlers::progress::list_for_client).put(handlers::progress::upsert_progress),
        )
        .route(
            "/api/clients/{client_id}/actions",
            get(handlers::actions::list_for_client),
        )
        .route("/api/actions", post(handlers::actions::create_action))
        .route("/api/actions/{id}", delete(handlers::actions::delete_action))
        .layer(middleware::from_fn(auth_middleware))
        .layer(Extension(jwt));

    // Combine routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        // Body limit (uploads capped at 20MB)
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}
