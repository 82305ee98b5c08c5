use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

// ───── Storage keys ─────────────────────────────────────────────────
pub const PROJECTS_KEY: &str = "portfolio_projects";
pub const CERTIFICATES_KEY: &str = "portfolio_certificates";
pub const BLOGS_KEY: &str = "portfolio_blogs";
pub const BLOG_CATEGORIES_KEY: &str = "portfolio_blog_categories";
pub const ANALYTICS_KEY: &str = "portfolio_analytics";
pub const CREDENTIALS_KEY: &str = "adminCredentials";
pub const AUTH_TOKEN_KEY: &str = "adminAuthToken";
pub const AUTH_TIME_KEY: &str = "adminAuthTime";
pub const ACTIVE_SESSIONS_KEY: &str = "activeSessions";

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const ALL_CATEGORIES: &str = "All";

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Bundled default dataset, rewritten by `update-portfolio-data`.
pub const BUNDLED_DATA: &str = include_str!("../data/portfolio_data.json");
pub const BUNDLED_DATA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/portfolio_data.json");
