use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::{
    constants::{
        ALL_CATEGORIES, ANALYTICS_KEY, BLOGS_KEY, BLOG_CATEGORIES_KEY, CERTIFICATES_KEY,
        PROJECTS_KEY, UNCATEGORIZED,
    },
    entities::{
        analytics::{AnalyticsSnapshot, UpdateAnalyticsRequest},
        blog_post::{BlogPost, NewBlogPostRequest, UpdateBlogPostRequest},
        certificate::{Certificate, NewCertificateRequest, UpdateCertificateRequest},
        portfolio_data::PortfolioData,
        project::{NewProjectRequest, Project, UpdateProjectRequest},
    },
    errors::{AppError, StorageError},
    repositories::storage::{JsonStorage, StorageRepository},
    utils::{
        clock::Clock,
        ids::{EntryId, IdGenerator},
    },
};

const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;

/// A persisted slice of [`PortfolioData`]; each one lives under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Projects,
    Certificates,
    Blogs,
    BlogCategories,
    Analytics,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Projects,
        Section::Certificates,
        Section::Blogs,
        Section::BlogCategories,
        Section::Analytics,
    ];

    fn key(self) -> &'static str {
        match self {
            Section::Projects => PROJECTS_KEY,
            Section::Certificates => CERTIFICATES_KEY,
            Section::Blogs => BLOGS_KEY,
            Section::BlogCategories => BLOG_CATEGORIES_KEY,
            Section::Analytics => ANALYTICS_KEY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogPage {
    pub posts: Vec<BlogPost>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 60, message = "Category name is required"))]
    pub name: String,
}

/// In-memory copy of every content collection, mirrored to storage after
/// each mutation.
///
/// Writes clone the current data, apply the change to the copy, persist the
/// touched sections and only then swap the copy in. A failed write leaves
/// the visible state untouched.
pub struct ContentStore {
    data: RwLock<PortfolioData>,
    storage: Arc<dyn StorageRepository>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
}

impl ContentStore {
    /// Hydrates every section from storage, using `defaults` for sections
    /// that were never saved.
    pub fn open(
        storage: Arc<dyn StorageRepository>,
        clock: Arc<dyn Clock>,
        defaults: PortfolioData,
    ) -> Result<Self, StorageError> {
        let PortfolioData { projects, certificates, blogs, blog_categories, analytics } = defaults;

        let data = PortfolioData {
            projects: storage.load_json(PROJECTS_KEY)?.unwrap_or(projects),
            certificates: storage.load_json(CERTIFICATES_KEY)?.unwrap_or(certificates),
            blogs: storage.load_json(BLOGS_KEY)?.unwrap_or(blogs),
            blog_categories: storage.load_json(BLOG_CATEGORIES_KEY)?.unwrap_or(blog_categories),
            analytics: storage.load_json(ANALYTICS_KEY)?.unwrap_or(analytics),
        };

        let ids = IdGenerator::default();
        data.projects.iter().map(|p| p.id)
            .chain(data.certificates.iter().map(|c| c.id))
            .chain(data.blogs.iter().map(|b| b.id))
            .for_each(|id| ids.observe(id));

        info!(
            projects = data.projects.len(),
            certificates = data.certificates.len(),
            blogs = data.blogs.len(),
            "Content store loaded"
        );

        Ok(ContentStore {
            data: RwLock::new(data),
            storage,
            clock,
            ids,
        })
    }

    /// Runs `change` against a copy of the data. When it reports a change
    /// (`Some`), the touched sections are written and the copy becomes the
    /// live state.
    fn commit<R>(
        &self,
        sections: &[Section],
        change: impl FnOnce(&mut PortfolioData) -> Option<R>,
    ) -> Result<Option<R>, StorageError> {
        let mut live = self.data.write();
        let mut draft = live.clone();

        let Some(result) = change(&mut draft) else {
            return Ok(None);
        };

        for section in sections {
            self.persist(&draft, *section)?;
        }
        *live = draft;
        Ok(Some(result))
    }

    fn persist(&self, data: &PortfolioData, section: Section) -> Result<(), StorageError> {
        let key = section.key();
        match section {
            Section::Projects => self.storage.save_json(key, &data.projects),
            Section::Certificates => self.storage.save_json(key, &data.certificates),
            Section::Blogs => self.storage.save_json(key, &data.blogs),
            Section::BlogCategories => self.storage.save_json(key, &data.blog_categories),
            Section::Analytics => self.storage.save_json(key, &data.analytics),
        }?;
        debug!(key, "Persisted content section");
        Ok(())
    }

    fn next_id(&self) -> EntryId {
        self.ids.next_id(self.clock.now())
    }

    pub fn check_storage(&self) -> Result<(), StorageError> {
        self.storage.check_connection()
    }

    // ───── Projects ─────────────────────────────────────────────────────

    pub fn projects(&self) -> Vec<Project> {
        self.data.read().projects.clone()
    }

    #[instrument(skip(self, request))]
    pub fn add_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        request.validate()?;
        let project = request.into_project(self.next_id());

        let added = self.commit(&[Section::Projects], |data| {
            data.projects.push(project.clone());
            Some(project)
        })?;
        added.ok_or_else(|| AppError::InternalError("project was not stored".to_string()))
    }

    #[instrument(skip(self, request))]
    pub fn update_project(&self, id: EntryId, request: UpdateProjectRequest) -> Result<Option<Project>, AppError> {
        request.validate()?;
        Ok(self.commit(&[Section::Projects], |data| {
            let project = data.projects.iter_mut().find(|p| p.id == id)?;
            request.apply(project);
            Some(project.clone())
        })?)
    }

    /// Returns whether a project was removed.
    pub fn delete_project(&self, id: EntryId) -> Result<bool, AppError> {
        let removed = self.commit(&[Section::Projects], |data| {
            let index = data.projects.iter().position(|p| p.id == id)?;
            Some(data.projects.remove(index))
        })?;
        Ok(removed.is_some())
    }

    // ───── Certificates ─────────────────────────────────────────────────

    /// Certificates, optionally restricted to one category (`"All"` means
    /// no restriction).
    pub fn certificates(&self, category: Option<&str>) -> Vec<Certificate> {
        let data = self.data.read();
        match normalize_filter(category) {
            Some(category) => data.certificates.iter()
                .filter(|c| c.category == category)
                .cloned()
                .collect(),
            None => data.certificates.clone(),
        }
    }

    /// `"All"` followed by each certificate category in first-seen order.
    pub fn certificate_categories(&self) -> Vec<String> {
        let data = self.data.read();
        with_all_first(data.certificates.iter().map(|c| c.category.as_str()))
    }

    #[instrument(skip(self, request))]
    pub fn add_certificate(&self, request: NewCertificateRequest) -> Result<Certificate, AppError> {
        request.validate()?;
        let certificate = request.into_certificate(self.next_id());

        let added = self.commit(&[Section::Certificates], |data| {
            data.certificates.push(certificate.clone());
            Some(certificate)
        })?;
        added.ok_or_else(|| AppError::InternalError("certificate was not stored".to_string()))
    }

    #[instrument(skip(self, request))]
    pub fn update_certificate(
        &self,
        id: EntryId,
        request: UpdateCertificateRequest,
    ) -> Result<Option<Certificate>, AppError> {
        request.validate()?;
        Ok(self.commit(&[Section::Certificates], |data| {
            let certificate = data.certificates.iter_mut().find(|c| c.id == id)?;
            request.apply(certificate);
            Some(certificate.clone())
        })?)
    }

    pub fn delete_certificate(&self, id: EntryId) -> Result<bool, AppError> {
        let removed = self.commit(&[Section::Certificates], |data| {
            let index = data.certificates.iter().position(|c| c.id == id)?;
            Some(data.certificates.remove(index))
        })?;
        Ok(removed.is_some())
    }

    // ───── Blog posts ───────────────────────────────────────────────────

    /// Every post, drafts included, newest first.
    pub fn blog_posts(&self) -> Vec<BlogPost> {
        self.data.read().blogs.clone()
    }

    pub fn published_post(&self, id: EntryId) -> Option<BlogPost> {
        self.data.read().blogs.iter()
            .find(|b| b.id == id && b.published)
            .cloned()
    }

    pub fn published_posts(&self, query: &BlogQuery) -> BlogPage {
        let data = self.data.read();
        let category = normalize_filter(query.category.as_deref());

        let matching: Vec<&BlogPost> = data.blogs.iter()
            .filter(|b| b.published)
            .filter(|b| category.is_none_or(|c| b.category == c))
            .collect();

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        let total = matching.len();
        let total_pages = total.div_ceil(per_page as usize) as u32;

        let posts = matching.into_iter()
            .skip((page as usize - 1) * per_page as usize)
            .take(per_page as usize)
            .cloned()
            .collect();

        BlogPage { posts, total, page, per_page, total_pages }
    }

    #[instrument(skip(self, request))]
    pub fn add_blog_post(&self, request: NewBlogPostRequest) -> Result<BlogPost, AppError> {
        request.validate()?;
        let id = self.next_id();
        let today = self.clock.now().date_naive();

        let added = self.commit(&[Section::Blogs], |data| {
            let post = request.into_blog_post(id, today, &data.blog_categories);
            data.blogs.insert(0, post.clone());
            Some(post)
        })?;
        added.ok_or_else(|| AppError::InternalError("blog post was not stored".to_string()))
    }

    #[instrument(skip(self, request))]
    pub fn update_blog_post(&self, id: EntryId, request: UpdateBlogPostRequest) -> Result<Option<BlogPost>, AppError> {
        request.validate()?;
        Ok(self.commit(&[Section::Blogs], |data| {
            let categories = &data.blog_categories;
            let post = data.blogs.iter_mut().find(|b| b.id == id)?;
            request.apply(post, categories);
            Some(post.clone())
        })?)
    }

    pub fn toggle_publish(&self, id: EntryId) -> Result<Option<BlogPost>, AppError> {
        Ok(self.commit(&[Section::Blogs], |data| {
            let post = data.blogs.iter_mut().find(|b| b.id == id)?;
            post.published = !post.published;
            Some(post.clone())
        })?)
    }

    pub fn delete_blog_post(&self, id: EntryId) -> Result<bool, AppError> {
        let removed = self.commit(&[Section::Blogs], |data| {
            let index = data.blogs.iter().position(|b| b.id == id)?;
            Some(data.blogs.remove(index))
        })?;
        Ok(removed.is_some())
    }

    // ───── Blog categories ──────────────────────────────────────────────

    pub fn blog_categories(&self) -> Vec<String> {
        self.data.read().blog_categories.clone()
    }

    /// `"All"` plus the categories that published posts actually use.
    pub fn public_blog_categories(&self) -> Vec<String> {
        let data = self.data.read();
        with_all_first(data.blogs.iter().filter(|b| b.published).map(|b| b.category.as_str()))
    }

    /// Returns false when the category already existed.
    pub fn add_category(&self, request: CategoryRequest) -> Result<bool, AppError> {
        let name = required_category_name(&request.name)?;

        let added = self.commit(&[Section::BlogCategories], |data| {
            if data.blog_categories.iter().any(|c| *c == name) {
                return None;
            }
            data.blog_categories.push(name);
            Some(())
        })?;
        Ok(added.is_some())
    }

    /// Renames `old` everywhere it is used. Returns false when `old` does
    /// not exist.
    #[instrument(skip(self))]
    pub fn rename_category(&self, old: &str, new: &str) -> Result<bool, AppError> {
        let new = required_category_name(new)?;
        if new == old {
            return Ok(self.data.read().blog_categories.iter().any(|c| c == old));
        }

        let mut conflict = false;
        let renamed = self.commit(&[Section::Blogs, Section::BlogCategories], |data| {
            if data.blog_categories.iter().any(|c| *c == new) {
                conflict = true;
                return None;
            }
            let slot = data.blog_categories.iter_mut().find(|c| c.as_str() == old)?;
            *slot = new.clone();

            data.blogs.iter_mut()
                .filter(|b| b.category == old)
                .for_each(|b| b.category = new.clone());
            Some(())
        })?;

        if conflict {
            return Err(AppError::Conflict(format!("Category '{new}' already exists")));
        }
        Ok(renamed.is_some())
    }

    /// Removes the category and moves its posts to "Uncategorized". Posts
    /// are never deleted.
    #[instrument(skip(self))]
    pub fn delete_category(&self, name: &str) -> Result<bool, AppError> {
        let removed = self.commit(&[Section::Blogs, Section::BlogCategories], |data| {
            let index = data.blog_categories.iter().position(|c| c == name)?;
            data.blog_categories.remove(index);

            data.blogs.iter_mut()
                .filter(|b| b.category == name)
                .for_each(|b| b.category = UNCATEGORIZED.to_string());
            Some(())
        })?;
        Ok(removed.is_some())
    }

    // ───── Analytics ────────────────────────────────────────────────────

    pub fn analytics(&self) -> AnalyticsSnapshot {
        self.data.read().analytics.clone()
    }

    pub fn record_visit(&self) -> Result<AnalyticsSnapshot, AppError> {
        let snapshot = self.commit(&[Section::Analytics], |data| {
            data.analytics.site_visits += 1;
            Some(data.analytics.clone())
        })?;
        Ok(snapshot.unwrap_or_default())
    }

    /// Stores the live visitor count; unchanged counts are not rewritten.
    pub fn set_online_users(&self, online: u64) -> Result<(), AppError> {
        self.commit(&[Section::Analytics], |data| {
            if data.analytics.online_users == online {
                return None;
            }
            data.analytics.online_users = online;
            Some(())
        })?;
        Ok(())
    }

    pub fn update_analytics(&self, request: UpdateAnalyticsRequest) -> Result<AnalyticsSnapshot, AppError> {
        request.validate()?;
        let snapshot = self.commit(&[Section::Analytics], |data| {
            request.apply(&mut data.analytics);
            Some(data.analytics.clone())
        })?;
        Ok(snapshot.unwrap_or_default())
    }

    // ───── Export ───────────────────────────────────────────────────────

    pub fn export(&self) -> PortfolioData {
        self.data.read().clone()
    }

    /// Writes every section, e.g. after seeding a fresh store.
    pub fn persist_all(&self) -> Result<(), StorageError> {
        let data = self.data.read();
        Section::ALL.iter().try_for_each(|section| self.persist(&data, *section))
    }
}

fn normalize_filter(category: Option<&str>) -> Option<&str> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
}

fn with_all_first<'a>(categories: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for category in categories {
        if !out.iter().any(|c| c == category) {
            out.push(category.to_string());
        }
    }
    out
}

fn required_category_name(name: &str) -> Result<String, AppError> {
    let request = CategoryRequest { name: name.trim().to_string() };
    request.validate()?;
    Ok(request.name)
}
