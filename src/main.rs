use actix_web::{middleware::Logger, web, App, HttpServer};

use taskmanager::{app, db, middleware::ClientIp, routes, AppContext, Config};

/// Startup is strictly ordered: the database connection is established
/// first, and only then is the listening socket bound. A connect failure is
/// logged and leaves the process non-serving; it is not a crash and no
/// failure exit code is forced.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("database connection failed: {}", err);
            return Ok(());
        }
    };

    let port = config.port;
    let ctx = web::Data::new(AppContext::new(config, pool));

    // actix runs the last-registered wrap first: requests pass Logger,
    // then CORS, then client-IP resolution, then JSON extraction in the
    // handlers themselves.
    let server = HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .app_data(app::json_config())
            .wrap(ClientIp)
            .wrap(app::cors(&ctx.config))
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind(("0.0.0.0", port))?;

    log::info!("server is running on port {}", port);

    server.run().await
}
