use actix_web::web;

use crate::handlers::{analytics, certificates, contact_me, projects};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(projects::get_projects))
    )
    .service(
        web::resource("/certificates")
            .route(web::get().to(certificates::get_certificates))
    )
    .service(
        web::resource("/certificates/categories")
            .route(web::get().to(certificates::get_certificate_categories))
    )
    .service(
        web::resource("/visits")
            .route(web::post().to(analytics::record_visit))
    )
    .service(
        web::scope("/presence/{session_id}")
            .service(
                web::resource("")
                    .route(web::put().to(analytics::heartbeat))
                    .route(web::delete().to(analytics::leave))
            )
            .service(
                web::resource("/visibility")
                    .route(web::post().to(analytics::visibility))
            )
    )
    .service(
        web::resource("/contact")
            .route(web::post().to(contact_me::create_contact_me))
    )
    .service(
        web::resource("/hire")
            .route(web::post().to(contact_me::create_hire_request))
    );
}
