// Route exports
pub mod courses;

use actix_web::web;

pub use courses::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(courses::root))
        .route("/health", web::get().to(courses::health_check))
        .service(
            web::scope("/api")
                .configure(courses::configure),
        );
}
