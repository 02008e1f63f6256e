//! In-memory implementations of every port, for use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::access_repository::{AccessRepository, CourseMembership};
use crate::application::ports::account_repository::{Account, AccountRepository, EmailTaken};
use crate::application::ports::content_repository::ContentRepository;
use crate::application::ports::course_repository::{CourseRepository, SlugTaken};
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::ports::order_source::OrderSource;
use crate::application::ports::subject_repository::SubjectRepository;
use crate::domain::courses::content::{
    Content, ContentChanges, ContentItem, ItemBase, ItemPayload, NewContent,
};
use crate::domain::courses::course::{Course, CourseChanges, NewCourse};
use crate::domain::courses::module::{Module, ModuleChanges, NewModule};
use crate::domain::courses::subject::Subject;
use crate::domain::ordering::ScopeKey;

#[derive(Default)]
struct State {
    last_id: i64,
    accounts: Vec<(Account, String)>,
    subjects: Vec<Subject>,
    courses: Vec<Course>,
    modules: Vec<Module>,
    contents: Vec<Content>,
    fail_order_queries: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn course_owner(&self, course_id: i64) -> Option<Uuid> {
        self.courses
            .iter()
            .find(|c| c.id == course_id)
            .map(|c| c.owner_id)
    }

    fn module_course(&self, module_id: i64) -> Option<i64> {
        self.modules
            .iter()
            .find(|m| m.id == module_id)
            .map(|m| m.course_id)
    }

    fn content_module(&self, content_id: i64) -> Option<i64> {
        self.contents
            .iter()
            .find(|c| c.id == content_id)
            .map(|c| c.module_id)
    }
}

pub(crate) struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    pub(crate) fn seed_subject(&self, title: &str, slug: &str) -> i64 {
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        st.subjects.push(Subject {
            id,
            title: title.into(),
            slug: slug.into(),
        });
        id
    }

    pub(crate) fn seed_course(&self, owner_id: Uuid, slug: &str) -> i64 {
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        let subject_id = st.subjects.first().map(|s| s.id).unwrap_or(0);
        st.courses.push(Course {
            id,
            owner_id,
            subject_id,
            title: slug.to_uppercase(),
            slug: slug.into(),
            overview: String::new(),
            created_at: chrono::Utc::now(),
            students: Vec::new(),
        });
        id
    }

    pub(crate) fn seed_enrollment(&self, course_id: i64, student_id: Uuid) {
        let mut st = self.state.lock().unwrap();
        if let Some(course) = st.courses.iter_mut().find(|c| c.id == course_id) {
            course.students.push(student_id);
        }
    }

    pub(crate) fn seed_module(&self, course_id: i64, order: i32) -> i64 {
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        st.modules.push(Module {
            id,
            course_id,
            title: format!("Module {id}"),
            description: String::new(),
            order,
        });
        id
    }

    pub(crate) fn seed_content(&self, module_id: i64, owner_id: Uuid, order: i32) -> i64 {
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        let now = chrono::Utc::now();
        st.contents.push(Content {
            id,
            module_id,
            order,
            item: ContentItem::from_parts(
                ItemBase {
                    owner_id,
                    title: format!("Item {id}"),
                    created_at: now,
                    updated_at: now,
                },
                ItemPayload::Text {
                    content: "Lorem ipsum".into(),
                },
            ),
        });
        id
    }

    pub(crate) fn fail_order_queries(&self) {
        self.state.lock().unwrap().fail_order_queries = true;
    }

    pub(crate) fn module_orders(&self, course_id: i64) -> Vec<(i64, i32)> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<_> = st
            .modules
            .iter()
            .filter(|m| m.course_id == course_id)
            .map(|m| (m.id, m.order))
            .collect();
        out.sort_by_key(|(id, order)| (*order, *id));
        out
    }
}

fn sort_courses(courses: &mut [Course]) {
    courses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl OrderSource for MemoryStore {
    async fn max_order(&self, scope: &ScopeKey) -> anyhow::Result<Option<i32>> {
        let st = self.state.lock().unwrap();
        if st.fail_order_queries {
            anyhow::bail!("order query failed");
        }
        let matches = |read: &dyn Fn(&str) -> Option<i64>| {
            scope
                .pairs()
                .iter()
                .all(|(column, value)| read(*column) == Some(*value))
        };
        let max = match scope.table() {
            "modules" => st
                .modules
                .iter()
                .filter(|m| {
                    matches(&|c| match c {
                        "course_id" => Some(m.course_id),
                        _ => None,
                    })
                })
                .map(|m| m.order)
                .max(),
            "contents" => st
                .contents
                .iter()
                .filter(|ct| {
                    matches(&|c| match c {
                        "module_id" => Some(ct.module_id),
                        _ => None,
                    })
                })
                .map(|ct| ct.order)
                .max(),
            other => anyhow::bail!("unknown table {other}"),
        };
        Ok(max)
    }
}

#[async_trait]
impl AccessRepository for MemoryStore {
    async fn course_membership(
        &self,
        course_id: i64,
        user_id: Uuid,
    ) -> anyhow::Result<Option<CourseMembership>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .courses
            .iter()
            .find(|c| c.id == course_id)
            .map(|c| CourseMembership {
                owner_id: c.owner_id,
                enrolled: c.has_student(user_id),
            }))
    }

    async fn course_of_module(&self, module_id: i64) -> anyhow::Result<Option<i64>> {
        Ok(self.state.lock().unwrap().module_course(module_id))
    }

    async fn course_of_content(&self, content_id: i64) -> anyhow::Result<Option<i64>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .content_module(content_id)
            .and_then(|m| st.module_course(m)))
    }
}

#[async_trait]
impl SubjectRepository for MemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<Subject>> {
        let mut out = self.state.lock().unwrap().subjects.clone();
        out.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(out)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Subject>> {
        let st = self.state.lock().unwrap();
        Ok(st.subjects.iter().find(|s| s.id == id).cloned())
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn list(&self, subject_slug: Option<String>) -> anyhow::Result<Vec<Course>> {
        let st = self.state.lock().unwrap();
        let subject_id = match subject_slug {
            Some(slug) => match st.subjects.iter().find(|s| s.slug == slug) {
                Some(s) => Some(s.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let mut out: Vec<Course> = st
            .courses
            .iter()
            .filter(|c| subject_id.is_none_or(|sid| c.subject_id == sid))
            .cloned()
            .collect();
        sort_courses(&mut out);
        Ok(out)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Course>> {
        let st = self.state.lock().unwrap();
        Ok(st.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list_owned(&self, owner_id: Uuid) -> anyhow::Result<Vec<Course>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Course> = st
            .courses
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        sort_courses(&mut out);
        Ok(out)
    }

    async fn list_enrolled(&self, student_id: Uuid) -> anyhow::Result<Vec<Course>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Course> = st
            .courses
            .iter()
            .filter(|c| c.has_student(student_id))
            .cloned()
            .collect();
        sort_courses(&mut out);
        Ok(out)
    }

    async fn create(&self, course: &NewCourse) -> anyhow::Result<Course> {
        let mut st = self.state.lock().unwrap();
        if st.courses.iter().any(|c| c.slug == course.slug) {
            return Err(SlugTaken(course.slug.clone()).into());
        }
        let id = st.next_id();
        let created = Course {
            id,
            owner_id: course.owner_id,
            subject_id: course.subject_id,
            title: course.title.clone(),
            slug: course.slug.clone(),
            overview: course.overview.clone(),
            created_at: chrono::Utc::now(),
            students: Vec::new(),
        };
        st.courses.push(created.clone());
        Ok(created)
    }

    async fn update_owned(
        &self,
        id: i64,
        owner_id: Uuid,
        changes: &CourseChanges,
    ) -> anyhow::Result<Option<Course>> {
        let mut st = self.state.lock().unwrap();
        if let Some(slug) = &changes.slug {
            if st.courses.iter().any(|c| c.id != id && &c.slug == slug) {
                return Err(SlugTaken(slug.clone()).into());
            }
        }
        let Some(course) = st
            .courses
            .iter_mut()
            .find(|c| c.id == id && c.owner_id == owner_id)
        else {
            return Ok(None);
        };
        if let Some(v) = changes.subject_id {
            course.subject_id = v;
        }
        if let Some(v) = &changes.title {
            course.title = v.clone();
        }
        if let Some(v) = &changes.slug {
            course.slug = v.clone();
        }
        if let Some(v) = &changes.overview {
            course.overview = v.clone();
        }
        Ok(Some(course.clone()))
    }

    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.courses.len();
        st.courses.retain(|c| !(c.id == id && c.owner_id == owner_id));
        if st.courses.len() == before {
            return Ok(false);
        }
        let orphan_modules: Vec<i64> = st
            .modules
            .iter()
            .filter(|m| m.course_id == id)
            .map(|m| m.id)
            .collect();
        st.modules.retain(|m| m.course_id != id);
        st.contents
            .retain(|c| !orphan_modules.contains(&c.module_id));
        Ok(true)
    }

    async fn add_student(&self, course_id: i64, student_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let Some(course) = st.courses.iter_mut().find(|c| c.id == course_id) else {
            anyhow::bail!("course {course_id} not found");
        };
        if course.has_student(student_id) {
            return Ok(false);
        }
        course.students.push(student_id);
        Ok(true)
    }
}

#[async_trait]
impl ModuleRepository for MemoryStore {
    async fn list_for_courses(&self, course_ids: &[i64]) -> anyhow::Result<Vec<Module>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Module> = st
            .modules
            .iter()
            .filter(|m| course_ids.contains(&m.course_id))
            .cloned()
            .collect();
        out.sort_by_key(|m| (m.order, m.id));
        Ok(out)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Module>> {
        let st = self.state.lock().unwrap();
        Ok(st.modules.iter().find(|m| m.id == id).cloned())
    }

    async fn insert(&self, module: &NewModule) -> anyhow::Result<Module> {
        let order = module
            .order
            .ok_or_else(|| anyhow::anyhow!("module order not assigned"))?;
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        let created = Module {
            id,
            course_id: module.course_id,
            title: module.title.clone(),
            description: module.description.clone(),
            order,
        };
        st.modules.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: &ModuleChanges) -> anyhow::Result<Option<Module>> {
        let mut st = self.state.lock().unwrap();
        let Some(module) = st.modules.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.title {
            module.title = v.clone();
        }
        if let Some(v) = &changes.description {
            module.description = v.clone();
        }
        if let Some(v) = changes.order {
            module.order = v;
        }
        Ok(Some(module.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.modules.len();
        st.modules.retain(|m| m.id != id);
        st.contents.retain(|c| c.module_id != id);
        Ok(st.modules.len() != before)
    }

    async fn reorder_owned(&self, owner_id: Uuid, orders: &[(i64, i32)]) -> anyhow::Result<u64> {
        let mut st = self.state.lock().unwrap();
        let mut updated = 0;
        for (id, order) in orders {
            let owned = st
                .module_course(*id)
                .and_then(|c| st.course_owner(c))
                .is_some_and(|o| o == owner_id);
            if !owned {
                continue;
            }
            if let Some(m) = st.modules.iter_mut().find(|m| m.id == *id) {
                m.order = *order;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl ContentRepository for MemoryStore {
    async fn list_for_modules(&self, module_ids: &[i64]) -> anyhow::Result<Vec<Content>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Content> = st
            .contents
            .iter()
            .filter(|c| module_ids.contains(&c.module_id))
            .cloned()
            .collect();
        out.sort_by_key(|c| (c.order, c.id));
        Ok(out)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Content>> {
        let st = self.state.lock().unwrap();
        Ok(st.contents.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, content: &NewContent) -> anyhow::Result<Content> {
        let order = content
            .order
            .ok_or_else(|| anyhow::anyhow!("content order not assigned"))?;
        let mut st = self.state.lock().unwrap();
        let id = st.next_id();
        let now = chrono::Utc::now();
        let created = Content {
            id,
            module_id: content.module_id,
            order,
            item: ContentItem::from_parts(
                ItemBase {
                    owner_id: content.owner_id,
                    title: content.title.clone(),
                    created_at: now,
                    updated_at: now,
                },
                content.payload.clone(),
            ),
        };
        st.contents.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: &ContentChanges) -> anyhow::Result<Option<Content>> {
        let mut st = self.state.lock().unwrap();
        let Some(content) = st.contents.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        let mut base = content.item.base().clone();
        if let Some(title) = &changes.title {
            base.title = title.clone();
        }
        base.updated_at = chrono::Utc::now();
        let payload = changes
            .payload
            .clone()
            .unwrap_or_else(|| content.item.payload());
        content.item = ContentItem::from_parts(base, payload);
        if let Some(order) = changes.order {
            content.order = order;
        }
        Ok(Some(content.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.contents.len();
        st.contents.retain(|c| c.id != id);
        Ok(st.contents.len() != before)
    }

    async fn reorder_owned(&self, owner_id: Uuid, orders: &[(i64, i32)]) -> anyhow::Result<u64> {
        let mut st = self.state.lock().unwrap();
        let mut updated = 0;
        for (id, order) in orders {
            let owned = st
                .content_module(*id)
                .and_then(|m| st.module_course(m))
                .and_then(|c| st.course_owner(c))
                .is_some_and(|o| o == owner_id);
            if !owned {
                continue;
            }
            if let Some(c) = st.contents.iter_mut().find(|c| c.id == *id) {
                c.order = *order;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn register(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<Account> {
        let mut st = self.state.lock().unwrap();
        if st.accounts.iter().any(|(a, _)| a.email == email) {
            return Err(EmailTaken(email.into()).into());
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            joined_at: chrono::Utc::now(),
        };
        st.accounts.push((account.clone(), password_hash.into()));
        Ok(account)
    }

    async fn credentials(&self, email: &str) -> anyhow::Result<Option<(Account, String)>> {
        let st = self.state.lock().unwrap();
        Ok(st.accounts.iter().find(|(a, _)| a.email == email).cloned())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .accounts
            .iter()
            .find(|(a, _)| a.id == id)
            .map(|(a, _)| a.clone()))
    }
}
