use uuid::Uuid;

use super::{TITLE_MAX_LEN, ValidationError, validate_slug, validate_title};

#[derive(Debug, Clone)]
pub struct Course {
    pub id: i64,
    pub owner_id: Uuid,
    pub subject_id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub students: Vec<Uuid>,
}

impl Course {
    pub fn has_student(&self, user_id: Uuid) -> bool {
        self.students.contains(&user_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub owner_id: Uuid,
    pub subject_id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
}

impl NewCourse {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title("title", &self.title, TITLE_MAX_LEN)?;
        validate_slug("slug", &self.slug)
    }
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub subject_id: Option<i64>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub overview: Option<String>,
}

impl CourseChanges {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title("title", title, TITLE_MAX_LEN)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug("slug", slug)?;
        }
        Ok(())
    }
}
