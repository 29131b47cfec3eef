use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use fukuwarai::api::{configure_routes, AppState};
use fukuwarai::banner;
use fukuwarai::catalog::Catalog;
use fukuwarai::config::AppConfig;
use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::io;

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

#[actix_web::main]
async fn main() -> io::Result<()> {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  No .env file loaded ({}), using process environment", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let catalog = Catalog::load(app_config.puzzles_path.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let bind = (app_config.host.clone(), app_config.port);
    log::info!(
        "Executing code with '{} {}' (timeout {}s, {} concurrent runs)",
        app_config.interpreter.program,
        app_config.interpreter.args.join(" "),
        app_config.interpreter.timeout.as_secs(),
        app_config.interpreter.max_concurrent
    );
    println!("🚀 Starting server...");
    println!("🧩 Puzzle available at http://{}:{}", bind.0, bind.1);
    println!("▶  Execution endpoint: POST {}", app_config.run_path());

    let state = AppState::new(app_config, catalog);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
            .route("/{_:.*}", web::get().to(static_file_handler))
    })
    .bind(bind)?
    .run()
    .await
}

async fn static_file_handler(req: HttpRequest) -> impl Responder {
    let path = if req.path() == "/" {
        "index.html"
    } else {
        // trim leading '/'
        &req.path()[1..]
    };

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok().content_type(mime.as_ref()).body(Cow::into_owned(content.data))
        }
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}
