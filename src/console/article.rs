//! Article endpoints used by the protected views: the channel picker, the
//! article list and the publish form.

use crate::api::{ApiClient, ApiError, Envelope};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub const CHANNELS_ENDPOINT: &str = "/channels";
pub const ARTICLES_ENDPOINT: &str = "/mp/articles";

/// Cover layouts the publish form offers: none, single image, three images.
pub const COVER_TYPES: [u8; 3] = [0, 1, 3];
const MAX_PER_PAGE: u32 = 100;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Channel {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
struct ChannelList {
    channels: Vec<Channel>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Cover {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<u8>,
    #[serde(default)]
    pub pubdate: Option<String>,
    #[serde(default)]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub read_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub cover: Option<Cover>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ArticlePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub results: Vec<ArticleSummary>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArticleQuery {
    pub page: u32,
    pub per_page: u32,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

impl ArticleQuery {
    fn path(self) -> Result<String, ApiError> {
        if self.page == 0 {
            return Err(ApiError::Validation("Page starts at 1.".to_string()));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ApiError::Validation(format!(
                "Page size must be between 1 and {MAX_PER_PAGE}."
            )));
        }
        Ok(format!(
            "{ARTICLES_ENDPOINT}?page={}&per_page={}",
            self.page, self.per_page
        ))
    }
}

/// Body of `POST /mp/articles`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub channel_id: u64,
    #[serde(rename = "type")]
    pub kind: u8,
    pub cover: Cover,
}

#[derive(Clone, Debug, Default)]
pub struct PublishForm {
    pub title: String,
    pub channel_id: Option<u64>,
    pub content: String,
    pub cover_type: u8,
    pub images: Vec<String>,
}

impl PublishForm {
    /// # Errors
    /// Returns `ApiError::Validation` naming the first field that fails.
    pub fn validate(&self) -> Result<NewArticle, ApiError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::Validation("Article title is required.".to_string()));
        }

        let Some(channel_id) = self.channel_id else {
            return Err(ApiError::Validation("Article channel is required.".to_string()));
        };

        if self.content.trim().is_empty() {
            return Err(ApiError::Validation("Article content is required.".to_string()));
        }

        if !COVER_TYPES.contains(&self.cover_type) {
            return Err(ApiError::Validation(format!(
                "Cover type must be one of {COVER_TYPES:?}."
            )));
        }
        if self.images.len() > usize::from(self.cover_type) {
            return Err(ApiError::Validation(format!(
                "Cover type {} takes at most {} images.",
                self.cover_type, self.cover_type
            )));
        }

        Ok(NewArticle {
            title: title.to_string(),
            content: self.content.clone(),
            channel_id,
            kind: self.cover_type,
            cover: Cover {
                kind: self.cover_type,
                images: self.images.clone(),
            },
        })
    }
}

#[derive(Deserialize)]
struct CreatedArticle {
    id: String,
}

/// # Errors
/// Any error from the request propagates unchanged.
#[instrument(skip_all)]
pub async fn fetch_channels(api: &ApiClient) -> Result<Vec<Channel>, ApiError> {
    let envelope: Envelope<ChannelList> = api.get(CHANNELS_ENDPOINT).await?;
    Ok(envelope.into_data().channels)
}

/// # Errors
/// `Validation` for an out-of-range query; otherwise request errors unchanged.
#[instrument(skip_all, fields(page = query.page, per_page = query.per_page))]
pub async fn fetch_articles(api: &ApiClient, query: ArticleQuery) -> Result<ArticlePage, ApiError> {
    let envelope: Envelope<ArticlePage> = api.get(&query.path()?).await?;
    Ok(envelope.into_data())
}

/// Publishes immediately (not as a draft) and returns the new article id.
///
/// # Errors
/// Any error from the request propagates unchanged.
#[instrument(skip_all, fields(channel_id = article.channel_id))]
pub async fn create_article(api: &ApiClient, article: &NewArticle) -> Result<String, ApiError> {
    let path = format!("{ARTICLES_ENDPOINT}?draft=false");
    let envelope: Envelope<CreatedArticle> = api.post(&path, article).await?;
    let id = envelope.into_data().id;
    info!("article published: {}", id);
    Ok(id)
}
