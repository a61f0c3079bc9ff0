mod errors;
mod handlers;
mod models;
mod repository;
mod utils;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use sqlx::PgPool;
use std::collections::HashMap;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Initialize the database pool and bring the schema up to date
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to the database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // Fetch the server bind address from an environment variable, default to "127.0.0.1:8080"
    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {}", bind_address);

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "viagens_api".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .expect("Failed to create Prometheus metrics");

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .app_data(web::Data::new(pool.clone())) // Database pool
            .service(
                web::resource("/")
                    .route(web::post().to(handlers::atividade::create_atividade))
                    .route(web::get().to(handlers::atividade::get_all_atividades)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(handlers::atividade::get_atividade_by_id))
                    .route(web::put().to(handlers::atividade::update_atividade))
                    .route(web::delete().to(handlers::atividade::delete_atividade)),
            )
            .service(
                web::resource("/{id}/concluir")
                    .route(web::patch().to(handlers::atividade::concluir_atividade)),
            )
            .service(
                web::resource("/{id}/cancelar")
                    .route(web::patch().to(handlers::atividade::cancelar_atividade)),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
