use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod admin;
mod auth;
mod blog;
mod json_error;
mod public;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .service(health_check)
            .configure(auth::config_routes)
            .configure(admin::config_routes)
            .configure(blog::config_routes)
            .configure(public::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
