use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizmark_server::{
    app_state::AppState, config::Config, errors::AppError, graphql, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.validate().map_err(to_io_error)?;

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let cors_origin = config.cors_allowed_origin.clone();

    let state = AppState::new(config).await.map_err(to_io_error)?;
    let schema = graphql::create_schema(state.clone());

    log::info!("Starting HTTP server on {}:{}", host, port);
    log::info!("GraphiQL playground: http://{}:{}/graphiql", host, port);

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            None => Cors::permissive(),
        };

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(cors)
            .wrap(Logger::new("%a \"%r\" %s %b %Dms %{x-request-id}o"))
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
            .configure(graphql::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

fn to_io_error(err: AppError) -> std::io::Error {
    log::error!("Startup failed: {}", err);
    std::io::Error::other(err.to_string())
}
