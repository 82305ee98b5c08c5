use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    entities::option_fields::{validate_required_patch, OptionField},
    utils::{ids::EntryId, tags::TagList},
};

const MAX_TITLE_LENGTH: u64 = 120;
const MAX_DESCRIPTION_LENGTH: u64 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub link: String,
    pub price: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProjectRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub technologies: TagList,

    #[serde(default)]
    #[validate(custom(function = "validate_link"))]
    pub link: String,

    #[serde(default)]
    pub price: String,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UpdateProjectRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required"),
        custom(function = "validate_required_patch")
    )]
    pub title: OptionField<String>,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: OptionField<String>,

    pub image: OptionField<String>,

    pub technologies: OptionField<TagList>,

    #[validate(custom(function = "validate_optional_link"))]
    pub link: OptionField<String>,

    pub price: OptionField<String>,
}

impl NewProjectRequest {
    pub fn into_project(self, id: EntryId) -> Project {
        Project {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            image: self.image,
            technologies: self.technologies.normalize(),
            link: self.link.trim().to_string(),
            price: self.price,
        }
    }
}

impl UpdateProjectRequest {
    /// Merges the patch into `project`; the id never changes.
    pub fn apply(self, project: &mut Project) {
        self.title.map_value(|t| t.trim().to_string()).apply_to(&mut project.title);
        self.description.apply_to(&mut project.description);
        self.image.apply_to(&mut project.image);
        self.technologies
            .map_value(TagList::normalize)
            .apply_to(&mut project.technologies);
        self.link.map_value(|l| l.trim().to_string()).apply_to(&mut project.link);
        self.price.apply_to(&mut project.price);
    }
}

/// Empty links are allowed; anything else must be an http(s) URL.
pub fn validate_link(link: &str) -> Result<(), ValidationError> {
    let link = link.trim();
    if link.is_empty() {
        return Ok(());
    }
    match url::Url::parse(link) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        Ok(_) => Err(new_validation_error("invalid_url_scheme", "Link must start with http:// or https://")),
        Err(_) => Err(new_validation_error("invalid_url", "Invalid link format")),
    }
}

pub fn validate_optional_link(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let Some(link) = value.value_ref() {
        validate_link(link)?;
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(technologies: &str) -> NewProjectRequest {
        NewProjectRequest {
            title: "Teqtronics".into(),
            description: "Company site".into(),
            image: "/projects/teqtronics.png".into(),
            technologies: TagList::from(technologies),
            link: "https://teqtronics.com".into(),
            price: "$450".into(),
        }
    }

    #[test]
    fn new_project_normalizes_technologies() {
        let project = request("React, Node.js , MongoDB").into_project(7);

        assert_eq!(project.id, 7);
        assert_eq!(project.technologies, vec!["React", "Node.js", "MongoDB"]);
    }

    #[test]
    fn link_must_be_http_when_present() {
        assert!(validate_link("").is_ok());
        assert!(validate_link("https://color-on.in").is_ok());
        assert!(validate_link("ftp://color-on.in").is_err());
        assert!(validate_link("not a url").is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r#"{"title": "X", "stars": 5}"#;
        assert!(serde_json::from_str::<UpdateProjectRequest>(raw).is_err());
    }

    #[test]
    fn clearing_the_title_fails_validation() {
        let patch: UpdateProjectRequest = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_keeps_id_and_untouched_fields() {
        let mut project = request("React").into_project(1);
        let patch: UpdateProjectRequest =
            serde_json::from_str(r#"{"price": "$500", "technologies": "Rust, Actix"}"#).unwrap();

        patch.apply(&mut project);

        assert_eq!(project.id, 1);
        assert_eq!(project.title, "Teqtronics");
        assert_eq!(project.price, "$500");
        assert_eq!(project.technologies, vec!["Rust", "Actix"]);
    }
}
