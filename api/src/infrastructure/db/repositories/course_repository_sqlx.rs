use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::course_repository::{CourseRepository, SlugTaken};
use crate::domain::courses::course::{Course, CourseChanges, NewCourse};
use crate::infrastructure::db::{PgPool, is_unique_violation};

pub struct SqlxCourseRepository {
    pub pool: PgPool,
}

impl SqlxCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// `slug` is the only unique column of `courses`.
fn slug_error(err: sqlx::Error, slug: Option<&str>) -> anyhow::Error {
    if is_unique_violation(&err) {
        SlugTaken(slug.unwrap_or_default().to_owned()).into()
    } else {
        err.into()
    }
}

fn course_from_row(r: &PgRow) -> Course {
    Course {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        subject_id: r.get("subject_id"),
        title: r.get("title"),
        slug: r.get("slug"),
        overview: r.get("overview"),
        created_at: r.get("created_at"),
        students: r.get("students"),
    }
}

#[async_trait]
impl CourseRepository for SqlxCourseRepository {
    async fn list(&self, subject_slug: Option<String>) -> anyhow::Result<Vec<Course>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.owner_id, c.subject_id, c.title, c.slug, c.overview, c.created_at,
                      COALESCE(array_agg(cs.student_id) FILTER (WHERE cs.student_id IS NOT NULL), '{}') AS students
               FROM courses c
               JOIN subjects s ON s.id = c.subject_id
               LEFT JOIN course_students cs ON cs.course_id = c.id
               WHERE ($1::text IS NULL OR s.slug = $1)
               GROUP BY c.id
               ORDER BY c.created_at DESC, c.id DESC"#,
        )
        .bind(subject_slug)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(course_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Course>> {
        let row = sqlx::query(
            r#"SELECT c.id, c.owner_id, c.subject_id, c.title, c.slug, c.overview, c.created_at,
                      COALESCE(array_agg(cs.student_id) FILTER (WHERE cs.student_id IS NOT NULL), '{}') AS students
               FROM courses c
               LEFT JOIN course_students cs ON cs.course_id = c.id
               WHERE c.id = $1
               GROUP BY c.id"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(course_from_row))
    }

    async fn list_owned(&self, owner_id: Uuid) -> anyhow::Result<Vec<Course>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.owner_id, c.subject_id, c.title, c.slug, c.overview, c.created_at,
                      COALESCE(array_agg(cs.student_id) FILTER (WHERE cs.student_id IS NOT NULL), '{}') AS students
               FROM courses c
               LEFT JOIN course_students cs ON cs.course_id = c.id
               WHERE c.owner_id = $1
               GROUP BY c.id
               ORDER BY c.created_at DESC, c.id DESC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(course_from_row).collect())
    }

    async fn list_enrolled(&self, student_id: Uuid) -> anyhow::Result<Vec<Course>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.owner_id, c.subject_id, c.title, c.slug, c.overview, c.created_at,
                      COALESCE(array_agg(cs.student_id) FILTER (WHERE cs.student_id IS NOT NULL), '{}') AS students
               FROM courses c
               LEFT JOIN course_students cs ON cs.course_id = c.id
               WHERE EXISTS(SELECT 1 FROM course_students me
                            WHERE me.course_id = c.id AND me.student_id = $1)
               GROUP BY c.id
               ORDER BY c.created_at DESC, c.id DESC"#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(course_from_row).collect())
    }

    async fn create(&self, course: &NewCourse) -> anyhow::Result<Course> {
        let row = sqlx::query(
            r#"INSERT INTO courses (owner_id, subject_id, title, slug, overview)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, owner_id, subject_id, title, slug, overview, created_at,
                         '{}'::uuid[] AS students"#,
        )
        .bind(course.owner_id)
        .bind(course.subject_id)
        .bind(&course.title)
        .bind(&course.slug)
        .bind(&course.overview)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| slug_error(e, Some(course.slug.as_str())))?;
        Ok(course_from_row(&row))
    }

    async fn update_owned(
        &self,
        id: i64,
        owner_id: Uuid,
        changes: &CourseChanges,
    ) -> anyhow::Result<Option<Course>> {
        let updated = sqlx::query_scalar::<_, i64>(
            r#"UPDATE courses SET
                    subject_id = COALESCE($1, subject_id),
                    title = COALESCE($2, title),
                    slug = COALESCE($3, slug),
                    overview = COALESCE($4, overview)
                WHERE id = $5 AND owner_id = $6
                RETURNING id"#,
        )
        .bind(changes.subject_id)
        .bind(changes.title.as_deref())
        .bind(changes.slug.as_deref())
        .bind(changes.overview.as_deref())
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| slug_error(e, changes.slug.as_deref()))?;
        match updated {
            Some(id) => self.get_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM courses WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn add_student(&self, course_id: i64, student_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO course_students (course_id, student_id) VALUES ($1, $2)
               ON CONFLICT (course_id, student_id) DO NOTHING"#,
        )
        .bind(course_id)
        .bind(student_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
