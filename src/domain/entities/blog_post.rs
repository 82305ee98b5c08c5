use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    constants::UNCATEGORIZED,
    entities::option_fields::{validate_required_patch, OptionField},
    utils::{ids::EntryId, tags::TagList},
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 160;
const MAX_EXCERPT_LENGTH: u64 = 500;
const MAX_TAGS: usize = 20;
const DATE_FORMAT: &str = "%Y-%m-%d";

// ───── Stored model ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    pub id: EntryId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub date: String,
    pub published: bool,
}

impl BlogPost {
    /// Points the post at `categories` or, failing that, at "Uncategorized".
    pub fn resolve_category(&mut self, categories: &[String]) {
        let requested = self.category.trim();
        self.category = if categories.iter().any(|c| c == requested) {
            requested.to_string()
        } else {
            UNCATEGORIZED.to_string()
        };
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBlogPostRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    pub excerpt: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    #[validate(custom(function = "validate_tag_list"))]
    pub tags: TagList,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    #[validate(custom(function = "validate_date"))]
    pub date: Option<String>,

    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UpdateBlogPostRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required"),
        custom(function = "validate_required_patch")
    )]
    pub title: OptionField<String>,

    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    pub excerpt: OptionField<String>,

    pub content: OptionField<String>,

    pub category: OptionField<String>,

    #[validate(custom(function = "validate_optional_tag_list"))]
    pub tags: OptionField<TagList>,

    pub image: OptionField<String>,

    #[validate(custom(function = "validate_optional_date"))]
    pub date: OptionField<String>,

    pub published: OptionField<bool>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    if date.trim().is_empty() {
        return Ok(());
    }
    chrono::NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| new_validation_error("invalid_date", "Date must use the YYYY-MM-DD format"))
}

pub fn validate_optional_date(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let Some(date) = value.value_ref() {
        validate_date(date)?;
    }
    Ok(())
}

pub fn validate_tag_list(tags: &TagList) -> Result<(), ValidationError> {
    if tags.clone().normalize().len() > MAX_TAGS {
        return Err(new_validation_error("too_many_tags", "Too many tags provided"));
    }
    Ok(())
}

pub fn validate_optional_tag_list(value: &OptionField<TagList>) -> Result<(), ValidationError> {
    if let Some(tags) = value.value_ref() {
        validate_tag_list(tags)?;
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

// ───── Conversions ──────────────────────────────────────────────────

impl NewBlogPostRequest {
    /// Builds the stored post; an empty or missing date becomes `today`.
    pub fn into_blog_post(self, id: EntryId, today: chrono::NaiveDate, categories: &[String]) -> BlogPost {
        let date = self
            .date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| today.format(DATE_FORMAT).to_string());

        let mut post = BlogPost {
            id,
            title: self.title.trim().to_string(),
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            tags: self.tags.normalize(),
            image: self.image,
            date,
            published: self.published,
        };
        post.resolve_category(categories);
        post
    }
}

impl UpdateBlogPostRequest {
    pub fn apply(self, post: &mut BlogPost, categories: &[String]) {
        self.title.map_value(|t| t.trim().to_string()).apply_to(&mut post.title);
        self.excerpt.apply_to(&mut post.excerpt);
        self.content.apply_to(&mut post.content);
        self.category.apply_to(&mut post.category);
        self.tags.map_value(TagList::normalize).apply_to(&mut post.tags);
        self.image.apply_to(&mut post.image);
        // an emptied date keeps the original publication date
        if let OptionField::SetToValue(date) = self.date {
            let date = date.trim();
            if !date.is_empty() {
                post.date = date.to_string();
            }
        }
        self.published.apply_to(&mut post.published);
        post.resolve_category(categories);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn categories() -> Vec<String> {
        vec!["Backend".to_string(), "React".to_string()]
    }

    fn request() -> NewBlogPostRequest {
        NewBlogPostRequest {
            title: "Actix in production".into(),
            excerpt: "Notes".into(),
            content: "Body".into(),
            category: "Backend".into(),
            tags: TagList::from("rust, actix ,"),
            image: String::new(),
            date: None,
            published: false,
        }
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let post = request().into_blog_post(1, today, &categories());

        assert_eq!(post.date, "2026-10-18");
        assert_eq!(post.tags, vec!["rust", "actix"]);
        assert_eq!(post.category, "Backend");
    }

    #[test]
    fn unknown_category_falls_back_to_uncategorized() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let post = NewBlogPostRequest {
            category: "Gardening".into(),
            ..request()
        }
        .into_blog_post(1, today, &categories());

        assert_eq!(post.category, UNCATEGORIZED);
    }

    #[test]
    fn dates_must_be_iso_formatted() {
        assert!(validate_date("2024-02-29").is_ok());
        assert!(validate_date("").is_ok());
        assert!(validate_date("29/02/2024").is_err());
    }

    #[test]
    fn patch_can_unpublish_and_retag() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mut post = NewBlogPostRequest { published: true, ..request() }
            .into_blog_post(1, today, &categories());

        let patch: UpdateBlogPostRequest =
            serde_json::from_str(r#"{"published": false, "tags": ["web"], "date": ""}"#).unwrap();
        patch.apply(&mut post, &categories());

        assert!(!post.published);
        assert_eq!(post.tags, vec!["web"]);
        assert_eq!(post.date, "2026-10-18");
    }
}
