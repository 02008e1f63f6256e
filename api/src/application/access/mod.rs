use uuid::Uuid;

use crate::application::ports::access_repository::AccessRepository;

#[derive(Debug, Clone)]
pub enum Actor {
    User(Uuid),
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    View,
    Edit,
}

/// What a capability check is about. Modules and contents inherit the
/// permissions of the course they belong to.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    Course(i64),
    Module(i64),
    Content(i64),
}

#[derive(thiserror::Error, Debug)]
pub enum AccessError {
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("failed to resolve access")]
    Store(#[source] anyhow::Error),
}

// Presentation layer is responsible for building Actor from HTTP inputs.

pub async fn course_of<A>(access_repo: &A, target: Target) -> anyhow::Result<Option<i64>>
where
    A: AccessRepository + ?Sized,
{
    match target {
        Target::Course(id) => Ok(Some(id)),
        Target::Module(id) => access_repo.course_of_module(id).await,
        Target::Content(id) => access_repo.course_of_content(id).await,
    }
}

/// Owner edits, enrolled students view, everyone else gets nothing.
/// `None` when the course does not exist.
pub async fn resolve_course<A>(
    access_repo: &A,
    actor: &Actor,
    course_id: i64,
) -> anyhow::Result<Option<Capability>>
where
    A: AccessRepository + ?Sized,
{
    let user_id = match actor {
        Actor::User(uid) => *uid,
        Actor::Anonymous => Uuid::nil(),
    };
    let Some(membership) = access_repo.course_membership(course_id, user_id).await? else {
        return Ok(None);
    };
    let cap = match actor {
        Actor::User(uid) if membership.owner_id == *uid => Capability::Edit,
        Actor::User(_) if membership.enrolled => Capability::View,
        _ => Capability::None,
    };
    Ok(Some(cap))
}

async fn require<A>(
    access_repo: &A,
    actor: &Actor,
    target: Target,
    needed: Capability,
) -> Result<i64, AccessError>
where
    A: AccessRepository + ?Sized,
{
    let course_id = course_of(access_repo, target)
        .await
        .map_err(AccessError::Store)?
        .ok_or(AccessError::NotFound)?;
    let cap = resolve_course(access_repo, actor, course_id)
        .await
        .map_err(AccessError::Store)?
        .ok_or(AccessError::NotFound)?;
    if cap >= needed {
        Ok(course_id)
    } else {
        tracing::debug!(?target, ?cap, ?needed, "access_denied");
        Err(AccessError::Forbidden)
    }
}

/// Returns the id of the course the target belongs to.
pub async fn require_view<A>(
    access_repo: &A,
    actor: &Actor,
    target: Target,
) -> Result<i64, AccessError>
where
    A: AccessRepository + ?Sized,
{
    require(access_repo, actor, target, Capability::View).await
}

pub async fn require_edit<A>(
    access_repo: &A,
    actor: &Actor,
    target: Target,
) -> Result<i64, AccessError>
where
    A: AccessRepository + ?Sized,
{
    require(access_repo, actor, target, Capability::Edit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryStore;

    #[tokio::test]
    async fn owner_edits_student_views_stranger_is_denied() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let student = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let course = store.seed_course(owner, "rust-101");
        store.seed_enrollment(course, student);

        for (uid, expected) in [
            (owner, Capability::Edit),
            (student, Capability::View),
            (stranger, Capability::None),
        ] {
            let actor = Actor::User(uid);
            assert_eq!(
                resolve_course(&store, &actor, course).await.unwrap(),
                Some(expected)
            );
        }
        assert_eq!(
            resolve_course(&store, &Actor::Anonymous, course)
                .await
                .unwrap(),
            Some(Capability::None)
        );
    }

    #[tokio::test]
    async fn missing_course_is_not_found() {
        let store = MemoryStore::new();
        let err = require_view(&store, &Actor::User(Uuid::new_v4()), Target::Course(99))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::NotFound));
    }

    #[tokio::test]
    async fn modules_inherit_course_permissions() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let student = Uuid::new_v4();
        let course = store.seed_course(owner, "rust-101");
        store.seed_enrollment(course, student);
        let module = store.seed_module(course, 0);

        assert_eq!(
            require_edit(&store, &Actor::User(owner), Target::Module(module))
                .await
                .unwrap(),
            course
        );
        assert!(matches!(
            require_edit(&store, &Actor::User(student), Target::Module(module)).await,
            Err(AccessError::Forbidden)
        ));
        assert!(
            require_view(&store, &Actor::User(student), Target::Module(module))
                .await
                .is_ok()
        );
    }
}
