// src/main.rs
mod aggregator;
mod config;
mod handlers;
mod models;
mod upstream;
mod utils;

use actix_web::{ web, App, HttpServer };
use env_logger::Env;
use aggregator::Aggregator;
use upstream::UpstreamClient;
use crate::config::Config;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let bind = config.bind();

    let client = UpstreamClient::new(config.clone()).map_err(|e| {
        log::error!("Failed to build upstream HTTP client: {}", e);
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to build upstream HTTP client: {}", e)
        )
    })?;
    let aggregator = web::Data::new(Aggregator::new(client));

    info!("Registry: {}, Roblox API: {}", config.registry_url, config.roblox_api_base);
    info!("Starting server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .app_data(aggregator.clone())
            .route("/", web::get().to(handlers::index::index))
            .route("/favicon.ico", web::get().to(handlers::index::favicon))
            .route("/api/data", web::route().to(handlers::servers::get_live_servers))
            .route("/data", web::route().to(handlers::servers::get_live_servers))
            .route("/api/stats", web::get().to(handlers::servers::get_stats))
            .route("/stats", web::get().to(handlers::servers::get_stats))
    })
        .bind(&bind)?
        .run().await
}
