//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use std::io;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::UserRepository;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::users_scope;
use crate::outbound::persistence::{
    DbPool, DieselUserRepository, InMemoryUserRepository, PoolConfig, run_pending_migrations,
};

/// Assemble the application: trace middleware, users routes, health probes,
/// and Swagger UI in debug builds.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(users_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Select the user repository described by `settings`.
///
/// With a database URL, pending migrations are applied and a pooled Diesel
/// adapter is returned. Without one, users live in memory for the lifetime
/// of the process.
///
/// # Errors
/// Returns [`io::Error`] when migrations fail or the pool cannot be built.
pub async fn build_repository(settings: &ServerSettings) -> io::Result<Arc<dyn UserRepository>> {
    let Some(url) = settings.database_url() else {
        warn!("no database url configured; users are stored in memory");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    info!(max_size = settings.pool_max_size(), "applying database migrations");
    run_pending_migrations(url)
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(io::Error::other)?;
    info!(max_size = settings.pool_max_size(), "database pool ready");
    Ok(Arc::new(DieselUserRepository::new(pool)))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener. The
/// health state is marked ready once the socket is bound.
///
/// # Errors
/// Propagates [`io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> io::Result<Server> {
    let ServerConfig {
        bind_addr,
        repository,
        status_codes,
    } = config;
    let http_state = web::Data::new(HttpState::new(repository).with_status_codes(status_codes));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
