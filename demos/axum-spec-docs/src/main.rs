use std::io::Error;
use std::net::{Ipv4Addr, SocketAddr};

use axum::{routing, Json, Router};
use spec_docs::axum::SpecDocsLayer;
use spec_docs::{Config, SpecDocs, CONFIG_FILE_ENV};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    // Run with `SPEC_DOCS_CONFIG_FILE=spec-docs.json` to load the configuration from file.
    let config = if std::env::var_os(CONFIG_FILE_ENV).is_some() {
        Config::from_env().map_err(Error::other)?
    } else {
        Config::new()
            .base_path("/api/v1")
            .file_path("./openapi.json")
            .title("Pets API")
    };
    let docs = SpecDocs::new(config).map_err(Error::other)?;
    log::info!("documentation available at http://localhost:8080{}", docs.ui_url());

    let app = Router::new()
        .route("/api/v1/pets", routing::get(pets::list_pets))
        .route("/health", routing::get(|| async { "ok" }))
        .layer(SpecDocsLayer::new(docs).skip(|request| request.uri().path() == "/health"));

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080));
    let listener = TcpListener::bind(&address).await?;
    axum::serve(listener, app).await
}

mod pets {
    use super::Json;

    pub(super) async fn list_pets() -> Json<Vec<&'static str>> {
        Json(vec!["doggie", "kitty"])
    }
}
