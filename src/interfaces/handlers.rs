pub mod analytics;
pub mod auth;
pub mod blog_posts;
pub mod categories;
pub mod certificates;
pub mod contact_me;
pub mod export;
pub mod home;
pub mod json_error;
pub mod projects;
pub mod system;
