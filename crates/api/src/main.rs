use anyhow::Context;

use rolodex_infra::CustomerFactory;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rolodex_observability::init();

    let addr = std::env::var("ROLODEX_ADDR").unwrap_or_else(|_| {
        tracing::warn!("ROLODEX_ADDR not set; using {DEFAULT_ADDR}");
        DEFAULT_ADDR.to_string()
    });

    let factory = CustomerFactory::from_env().context("invalid store configuration")?;
    let app = rolodex_api::app::build_app(factory);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
