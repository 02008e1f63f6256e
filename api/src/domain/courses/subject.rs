#[derive(Debug, Clone)]
pub struct Subject {
    pub id: i64,
    pub title: String,
    pub slug: String,
}
