use actix_web::web;

use crate::handlers::{analytics, blog_posts, categories, certificates, export, projects};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(
                web::resource("/projects")
                    .route(web::post().to(projects::create_project))
            )
            .service(
                web::resource("/projects/{project_id}")
                    .route(web::patch().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project))
            )
            .service(
                web::resource("/certificates")
                    .route(web::post().to(certificates::create_certificate))
            )
            .service(
                web::resource("/certificates/{certificate_id}")
                    .route(web::patch().to(certificates::update_certificate))
                    .route(web::delete().to(certificates::delete_certificate))
            )
            .service(
                web::resource("/blog/posts")
                    .route(web::get().to(blog_posts::admin_get_all_blog_posts))
                    .route(web::post().to(blog_posts::create_blog_post))
            )
            .service(
                web::resource("/blog/posts/{post_id}")
                    .route(web::patch().to(blog_posts::update_blog_post))
                    .route(web::delete().to(blog_posts::delete_blog_post))
            )
            .service(
                web::resource("/blog/posts/{post_id}/publish")
                    .route(web::post().to(blog_posts::toggle_publish_blog_post))
            )
            .service(
                web::resource("/blog/categories")
                    .route(web::get().to(categories::admin_get_categories))
                    .route(web::post().to(categories::create_category))
            )
            .service(
                web::resource("/blog/categories/{name}")
                    .route(web::put().to(categories::rename_category))
                    .route(web::delete().to(categories::delete_category))
            )
            .service(
                web::resource("/analytics")
                    .route(web::get().to(analytics::admin_get_analytics))
                    .route(web::patch().to(analytics::admin_update_analytics))
            )
            .service(
                web::resource("/export")
                    .route(web::get().to(export::export_data))
            )
    );
}
