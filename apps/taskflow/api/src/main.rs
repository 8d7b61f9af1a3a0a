use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_categories::{CategoryRepository, InMemoryCategoryRepository, RemoteCategoryRepository};
use domain_tasks::{InMemoryTaskRepository, RemoteTaskRepository, TaskRepository};
use record_store::HttpRecordStore;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Backend, Config};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    match config.backend.clone() {
        Backend::Memory => {
            info!("Using in-memory stores seeded with sample data");
            let tasks = InMemoryTaskRepository::seeded()?;
            let categories = InMemoryCategoryRepository::seeded()?;
            serve(config, tasks, categories).await
        }
        Backend::Remote(store_config) => {
            info!("Using record store at {}", store_config.base_url);
            let store = Arc::new(HttpRecordStore::new(store_config)?);
            let tasks = RemoteTaskRepository::from_shared(Arc::clone(&store));
            let categories = RemoteCategoryRepository::from_shared(store);
            serve(config, tasks, categories).await
        }
    }
}

async fn serve<T, C>(config: Config, tasks: T, categories: C) -> eyre::Result<()>
where
    T: TaskRepository + 'static,
    C: CategoryRepository + 'static,
{
    let state = AppState::new(tasks, categories);

    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.server)?;

    // - /health: liveness with app name/version
    // - /ready: both stores answer a list request
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(state));

    info!(
        "Starting {} v{} ({:?})",
        config.app.name, config.app.version, config.environment
    );

    create_production_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("TaskFlow API shutdown complete");
    Ok(())
}
