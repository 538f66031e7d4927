use gridref::api::create_router;
use gridref::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    let addr = config.bind_address;
    let app = create_router(config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind port");

    tracing::info!("gridref API server listening on http://{}", addr);
    tracing::info!("  GET  /api/mgrs?latitude=<lat>&longitude=<lon>[&precision=<1-5>]");
    tracing::info!("  GET  /api/coordinate?mgrs=<reference>");
    tracing::info!("  GET  /api/utm?latitude=<lat>&longitude=<lon>");
    tracing::info!("  GET  /api/format?latitude=<lat>&longitude=<lon>&format=<mgrs|utm|dd|dms>");
    tracing::info!("  POST /api/upload (multipart/form-data: csv file [+ precision])");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
