use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::option_fields::{validate_required_patch, OptionField},
    utils::ids::EntryId,
};

const MAX_TITLE_LENGTH: u64 = 120;

/// `name` mirrors `title` and `image` mirrors `file` (when a file is set)
/// after every write; see [`Certificate::sync_aliases`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub id: EntryId,
    pub title: String,
    pub name: String,
    pub file: String,
    pub category: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Certificate {
    pub fn sync_aliases(&mut self) {
        self.name = self.title.clone();
        if !self.file.is_empty() {
            self.image = Some(self.file.clone());
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCertificateRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub issuer: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub file: String,

    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UpdateCertificateRequest {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required"),
        custom(function = "validate_required_patch")
    )]
    pub title: OptionField<String>,

    pub description: OptionField<String>,
    pub issuer: OptionField<String>,
    pub date: OptionField<String>,
    pub category: OptionField<String>,
    pub file: OptionField<String>,
    pub image: OptionField<String>,
}

impl NewCertificateRequest {
    pub fn into_certificate(self, id: EntryId) -> Certificate {
        let mut certificate = Certificate {
            id,
            title: self.title.trim().to_string(),
            name: String::new(),
            file: self.file,
            category: self.category.trim().to_string(),
            issuer: self.issuer,
            date: self.date,
            description: self.description,
            image: self.image.filter(|image| !image.is_empty()),
        };
        certificate.sync_aliases();
        certificate
    }
}

impl UpdateCertificateRequest {
    pub fn apply(self, certificate: &mut Certificate) {
        self.title.map_value(|t| t.trim().to_string()).apply_to(&mut certificate.title);
        self.description.apply_to(&mut certificate.description);
        self.issuer.apply_to(&mut certificate.issuer);
        self.date.apply_to(&mut certificate.date);
        self.category.map_value(|c| c.trim().to_string()).apply_to(&mut certificate.category);
        self.file.apply_to(&mut certificate.file);
        self.image.apply_to_option(&mut certificate.image);
        certificate.sync_aliases();
    }
}
