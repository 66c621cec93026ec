mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;

use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use crate::config::Config;
use crate::db::PgEmployeeStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    // Initialize the database pool and bring the schema up to date
    let pool = db::create_pool(&config).await.map_err(|err| {
        error!("Failed to connect to the database: {}", err);
        io::Error::new(io::ErrorKind::ConnectionRefused, err)
    })?;
    db::run_migrations(&pool).await.map_err(|err| {
        error!("Failed to run migrations: {}", err);
        io::Error::new(io::ErrorKind::Other, err)
    })?;

    let store = web::Data::new(PgEmployeeStore::new(pool));

    info!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(handlers::configure::<PgEmployeeStore>)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
