// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use dashboard_backend::{
    config::{AppState, Config},
    routes::build_router,
};

#[tokio::main]
async fn main() {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env().expect("Falha ao carregar a configuração.");
    let app_state = AppState::new(config);
    let addr = app_state.config.server_addr.clone();
    let app = build_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener.local_addr().map(|a| a.to_string()).unwrap_or(addr)
    );
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
