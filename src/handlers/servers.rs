// src/handlers/servers.rs
use actix_web::{web, HttpResponse};
use log::debug;
use crate::aggregator::Aggregator;
use crate::models::server::LiveStats;

/// Always 200 with a JSON array; upstream trouble only shrinks the array.
pub async fn get_live_servers(aggregator: web::Data<Aggregator>) -> HttpResponse {
    let servers = aggregator.live_servers().await;
    debug!("Serving {} live servers", servers.len());

    HttpResponse::Ok().json(servers)
}

pub async fn get_stats(aggregator: web::Data<Aggregator>) -> HttpResponse {
    let servers = aggregator.live_servers().await;
    let stats = LiveStats::from_servers(&servers);
    debug!(
        "Serving stats: {} servers, {}/{} players",
        stats.total_servers, stats.total_players, stats.total_capacity
    );

    HttpResponse::Ok().json(stats)
}
