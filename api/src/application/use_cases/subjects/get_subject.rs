use crate::application::ports::subject_repository::SubjectRepository;
use crate::domain::courses::subject::Subject;

pub struct GetSubject<'a, R: SubjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SubjectRepository + ?Sized> GetSubject<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<Subject>> {
        self.repo.get_by_id(id).await
    }
}
