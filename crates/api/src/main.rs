use lodgex_infra::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lodgex_observability::init();

    let config = Config::from_env()?;
    let app = lodgex_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
