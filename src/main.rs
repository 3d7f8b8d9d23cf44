mod model;
mod prompt;
mod web;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web::Data};
use dotenv::dotenv;
use log::{info, error};

use model::MeditronPipeline;
use web::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting meditron chat service");

    // Initialize the generation pipeline once; a failure here is fatal
    // and the process never starts serving.
    let pipeline = match MeditronPipeline::new().await {
        Ok(pipeline) => {
            info!("Meditron pipeline initialized");
            Data::new(pipeline)
        }
        Err(e) => {
            error!("Failed to initialize meditron pipeline: {}", e);
            std::process::exit(1);
        }
    };

    // Start web server
    HttpServer::new(move || {
        App::new()
            .app_data(pipeline.clone())
            // All origins, methods, and headers, with credentials.
            .wrap(Cors::permissive())
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", 8000))?
    .run()
    .await
}
