use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use tienda_diablos::config::ServerConfig;
use tienda_diablos::db::establish_connection_pool;
use tienda_diablos::repository::DieselRepository;
use tienda_diablos::routes::admin::{
    add_product, delete_product, show_admin, update_product, upload_image,
};
use tienda_diablos::routes::auth::{login, logout, show_login};
use tienda_diablos::routes::catalog::show_catalog;
use tienda_diablos::routes::main::show_index;
use tienda_diablos::routes::product::show_product;
use tienda_diablos::storage::MediaStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("tienda.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());
    let media_root = env::var("MEDIA_ROOT").unwrap_or("./media".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let admin_username = env::var("TIENDA_ADMIN_USERNAME").unwrap_or("admin".to_string());
    let admin_password = match env::var("TIENDA_ADMIN_PASSWORD") {
        Ok(password) => password,
        Err(_) => {
            log::error!("TIENDA_ADMIN_PASSWORD environment variable not set");
            std::process::exit(1);
        }
    };

    let config = ServerConfig {
        admin_username,
        admin_password,
    };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let store = MediaStore::new(&media_root, "/media");
    if let Err(e) = store.ensure_root() {
        log::error!("Failed to prepare media directory {media_root}: {e}");
        std::process::exit(1);
    }

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(Files::new("/media", &media_root))
            .service(show_index)
            .service(show_catalog)
            .service(show_product)
            .service(show_login)
            .service(login)
            .service(logout)
            .service(show_admin)
            .service(add_product)
            .service(update_product)
            .service(delete_product)
            .service(upload_image)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(store.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
