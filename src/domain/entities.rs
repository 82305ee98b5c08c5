pub mod analytics;
pub mod blog_post;
pub mod certificate;
pub mod contact_me;
pub mod credentials;
pub mod option_fields;
pub mod portfolio_data;
pub mod project;
pub mod session;
