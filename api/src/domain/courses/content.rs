use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::domain::ordering::{OrderScope, OrderedEntity, ScopeField};

use super::{ITEM_TITLE_MAX_LEN, ValidationError, validate_order, validate_title, validate_web_url};

static YOUTUBE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("valid regex")
});
static VIMEO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Text,
    Video,
    Image,
    File,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Video => "video",
            ContentKind::Image => "image",
            ContentKind::File => "file",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(ContentKind::Text),
            "video" => Some(ContentKind::Video),
            "image" => Some(ContentKind::Image),
            "file" => Some(ContentKind::File),
            _ => None,
        }
    }
}

/// Attributes every content item carries regardless of its kind.
#[derive(Debug, Clone)]
pub struct ItemBase {
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct TextItem {
    pub base: ItemBase,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct VideoItem {
    pub base: ItemBase,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ImageItem {
    pub base: ItemBase,
    pub file: String,
}

#[derive(Debug, Clone)]
pub struct FileItem {
    pub base: ItemBase,
    pub file: String,
}

#[derive(Debug, Clone)]
pub enum ContentItem {
    Text(TextItem),
    Video(VideoItem),
    Image(ImageItem),
    File(FileItem),
}

/// Kind-specific fields of an item, as supplied by an instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPayload {
    Text { content: String },
    Video { url: String },
    Image { file: String },
    File { file: String },
}

impl ItemPayload {
    pub fn kind(&self) -> ContentKind {
        match self {
            ItemPayload::Text { .. } => ContentKind::Text,
            ItemPayload::Video { .. } => ContentKind::Video,
            ItemPayload::Image { .. } => ContentKind::Image,
            ItemPayload::File { .. } => ContentKind::File,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let (field, value) = match self {
            ItemPayload::Text { content } => ("content", content),
            ItemPayload::Video { url } => ("url", url),
            ItemPayload::Image { file } | ItemPayload::File { file } => ("file", file),
        };
        if value.trim().is_empty() {
            return Err(ValidationError::MissingPayload {
                field,
                kind: self.kind().as_str(),
            });
        }
        if let ItemPayload::Video { url } = self {
            validate_web_url("url", url)?;
        }
        Ok(())
    }

    /// Picks the field `kind` needs out of loosely typed request fields.
    pub fn from_fields(
        kind: ContentKind,
        content: Option<String>,
        url: Option<String>,
        file: Option<String>,
    ) -> Result<Self, ValidationError> {
        let missing = |field| ValidationError::MissingPayload {
            field,
            kind: kind.as_str(),
        };
        let payload = match kind {
            ContentKind::Text => ItemPayload::Text {
                content: content.ok_or_else(|| missing("content"))?,
            },
            ContentKind::Video => ItemPayload::Video {
                url: url.ok_or_else(|| missing("url"))?,
            },
            ContentKind::Image => ItemPayload::Image {
                file: file.ok_or_else(|| missing("file"))?,
            },
            ContentKind::File => ItemPayload::File {
                file: file.ok_or_else(|| missing("file"))?,
            },
        };
        Ok(payload)
    }
}

impl ContentItem {
    pub fn from_parts(base: ItemBase, payload: ItemPayload) -> Self {
        match payload {
            ItemPayload::Text { content } => ContentItem::Text(TextItem { base, content }),
            ItemPayload::Video { url } => ContentItem::Video(VideoItem { base, url }),
            ItemPayload::Image { file } => ContentItem::Image(ImageItem { base, file }),
            ItemPayload::File { file } => ContentItem::File(FileItem { base, file }),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Text(_) => ContentKind::Text,
            ContentItem::Video(_) => ContentKind::Video,
            ContentItem::Image(_) => ContentKind::Image,
            ContentItem::File(_) => ContentKind::File,
        }
    }

    pub fn base(&self) -> &ItemBase {
        match self {
            ContentItem::Text(i) => &i.base,
            ContentItem::Video(i) => &i.base,
            ContentItem::Image(i) => &i.base,
            ContentItem::File(i) => &i.base,
        }
    }

    pub fn payload(&self) -> ItemPayload {
        match self {
            ContentItem::Text(i) => ItemPayload::Text {
                content: i.content.clone(),
            },
            ContentItem::Video(i) => ItemPayload::Video { url: i.url.clone() },
            ContentItem::Image(i) => ItemPayload::Image {
                file: i.file.clone(),
            },
            ContentItem::File(i) => ItemPayload::File {
                file: i.file.clone(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Content {
    pub id: i64,
    pub module_id: i64,
    pub order: i32,
    pub item: ContentItem,
}

#[derive(Debug, Clone)]
pub struct NewContent {
    pub module_id: i64,
    pub owner_id: Uuid,
    pub title: String,
    pub payload: ItemPayload,
    pub order: Option<i32>,
}

fn content_module_id(content: &NewContent) -> Option<i64> {
    Some(content.module_id)
}

impl OrderedEntity for NewContent {
    const SCOPE: OrderScope<Self> = OrderScope {
        table: "contents",
        fields: &[ScopeField {
            column: "module_id",
            read: content_module_id,
        }],
    };

    fn order(&self) -> Option<i32> {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = Some(order);
    }
}

impl NewContent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title("title", &self.title, ITEM_TITLE_MAX_LEN)?;
        validate_order("order", self.order)?;
        self.payload.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentChanges {
    pub title: Option<String>,
    pub payload: Option<ItemPayload>,
    pub order: Option<i32>,
}

impl ContentChanges {
    /// The kind of an existing item is fixed; only its fields may change.
    pub fn validate(&self, current: ContentKind) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title("title", title, ITEM_TITLE_MAX_LEN)?;
        }
        if let Some(payload) = &self.payload {
            if payload.kind() != current {
                return Err(ValidationError::KindChange {
                    from: current.as_str(),
                    to: payload.kind().as_str(),
                });
            }
            payload.validate()?;
        }
        validate_order("order", self.order)
    }
}

// --- Rendering ---

#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Prefix prepended to stored image/file paths, e.g. `/media/`.
    pub media_url: String,
}

impl RenderContext {
    fn media_href(&self, file: &str) -> String {
        if file.starts_with("http://") || file.starts_with("https://") {
            return file.to_string();
        }
        format!(
            "{}/{}",
            self.media_url.trim_end_matches('/'),
            file.trim_start_matches('/')
        )
    }
}

pub trait Renderable {
    /// HTML fragment shown to students.
    fn render(&self, ctx: &RenderContext) -> String;
}

impl Renderable for TextItem {
    fn render(&self, _ctx: &RenderContext) -> String {
        linebreaks(&self.content)
    }
}

impl Renderable for VideoItem {
    fn render(&self, _ctx: &RenderContext) -> String {
        let embed = if let Some(caps) = YOUTUBE_RE.captures(&self.url) {
            Some(format!("https://www.youtube.com/embed/{}?wmode=opaque", &caps[1]))
        } else {
            VIMEO_RE
                .captures(&self.url)
                .map(|caps| format!("https://player.vimeo.com/video/{}", &caps[1]))
        };
        match embed {
            Some(src) => format!(
                r#"<iframe width="480" height="360" src="{}" frameborder="0" allowfullscreen></iframe>"#,
                htmlescape::encode_minimal(&src)
            ),
            None if validate_web_url("url", &self.url).is_ok() => format!(
                r#"<a href="{}">{}</a>"#,
                htmlescape::encode_minimal(&self.url),
                htmlescape::encode_minimal(&self.base.title)
            ),
            // Rows stored before URLs were checked render without a link.
            None => format!("<p>{}</p>", htmlescape::encode_minimal(&self.base.title)),
        }
    }
}

impl Renderable for ImageItem {
    fn render(&self, ctx: &RenderContext) -> String {
        format!(
            r#"<img src="{}" alt="{}">"#,
            htmlescape::encode_minimal(&ctx.media_href(&self.file)),
            htmlescape::encode_minimal(&self.base.title)
        )
    }
}

impl Renderable for FileItem {
    fn render(&self, ctx: &RenderContext) -> String {
        format!(
            r#"<p><a href="{}" class="button" download>Download file</a></p>"#,
            htmlescape::encode_minimal(&ctx.media_href(&self.file))
        )
    }
}

impl Renderable for ContentItem {
    fn render(&self, ctx: &RenderContext) -> String {
        match self {
            ContentItem::Text(i) => i.render(ctx),
            ContentItem::Video(i) => i.render(ctx),
            ContentItem::Image(i) => i.render(ctx),
            ContentItem::File(i) => i.render(ctx),
        }
    }
}

/// Blank lines separate paragraphs, single newlines become `<br>`.
fn linebreaks(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split("\n\n")
        .map(|p| p.trim_matches('\n'))
        .filter(|p| !p.is_empty())
        .map(|p| {
            let escaped = htmlescape::encode_minimal(p);
            format!("<p>{}</p>", escaped.replace('\n', "<br>"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
