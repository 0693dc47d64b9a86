use actix_web::{web, App, HttpServer};

use todo_service::config::Config;
use todo_service::{api, repository, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(&config)?;

    let todo_repository = web::Data::from(repository::connect(&config)?);

    tracing::info!(
        host = %config.host,
        port = config.port,
        run_mode = %config.run_mode,
        "starting todo service"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(todo_repository.clone())
            .configure(api::config)
            .default_service(web::route().to(api::not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
