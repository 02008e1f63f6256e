use crate::application::ports::subject_repository::SubjectRepository;
use crate::domain::courses::subject::Subject;

pub struct ListSubjects<'a, R: SubjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: SubjectRepository + ?Sized> ListSubjects<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Subject>> {
        self.repo.list().await
    }
}
