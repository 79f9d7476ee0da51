use std::env;

use dotenvy::dotenv;

use tienda_diablos::db::establish_connection_pool;
use tienda_diablos::domain::product::NewProduct;
use tienda_diablos::repository::{DieselRepository, ProductWriter};

fn sample_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct::new(
            "Camiseta Titular 2024",
            "Camiseta oficial del Rey de Copas con tecnología de última generación",
            89990.0,
            "Camisetas",
        )
        .with_image("https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=500")
        .with_sizes(["S", "M", "L", "XL"])
        .featured(),
        NewProduct::new(
            "Short de Entrenamiento",
            "Short cómodo para entrenamientos y partidos casuales",
            45990.0,
            "Shorts",
        )
        .with_image("https://images.unsplash.com/photo-1594633312681-425c7b97ccd1?w=500")
        .with_sizes(["S", "M", "L"])
        .featured(),
        NewProduct::new(
            "Bufanda Oficial",
            "Bufanda de lana premium para mostrar tu pasión en las gradas",
            29990.0,
            "Accesorios",
        )
        .with_image("https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=500")
        .featured(),
        NewProduct::new(
            "Gorra Bordada",
            "Gorra con logo bordado a mano, perfecta para el día a día",
            35990.0,
            "Accesorios",
        )
        .with_image("https://images.unsplash.com/photo-1588850561407-ed78c282e89b?w=500"),
        NewProduct::new(
            "Chaqueta Térmica",
            "Chaqueta impermeable para días fríos en el estadio",
            129990.0,
            "Chaquetas",
        )
        .with_image("https://images.unsplash.com/photo-1551028719-00167b16eac5?w=500")
        .with_sizes(["M", "L", "XL"])
        .featured(),
        NewProduct::new(
            "Medias Oficiales",
            "Medias de fútbol con tecnología de compresión",
            19990.0,
            "Medias",
        )
        .with_image("https://images.unsplash.com/photo-1606107557195-0e29a4b5b4aa?w=500"),
        NewProduct::new(
            "Mochila Deportiva",
            "Mochila resistente para llevar tus pertenencias al estadio",
            79990.0,
            "Accesorios",
        )
        .with_image("https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500"),
        NewProduct::new(
            "Camiseta Alternativa",
            "Camiseta alternativa con diseño exclusivo de temporada",
            94990.0,
            "Camisetas",
        )
        .with_image("https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=500")
        .with_sizes(["S", "M", "L", "XL"])
        .featured(),
        NewProduct::new(
            "Pantalón Deportivo",
            "Pantalón cómodo para entrenamientos y uso casual",
            65990.0,
            "Pantalones",
        )
        .with_image("https://images.unsplash.com/photo-1594633312681-425c7b97ccd1?w=500")
        .with_sizes(["S", "M", "L", "XL"]),
        NewProduct::new(
            "Guantes de Portero",
            "Guantes profesionales con tecnología de agarre mejorada",
            89990.0,
            "Accesorios",
        )
        .with_image("https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=500"),
    ]
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or("tienda.db".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    for product in sample_catalog() {
        match repo.create_product(&product) {
            Ok(created) => log::info!("Seeded product {} ({})", created.title, created.id),
            Err(e) => {
                log::error!("Failed to seed product {}: {e}", product.title);
                std::process::exit(1);
            }
        }
    }

    log::info!("Seed completed");
}
