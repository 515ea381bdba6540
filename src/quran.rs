use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::chapter::{
    fallback_chapter_content, fallback_chapters, fallback_recommendation_content, Chapter,
    SurahContent, SurahHeader, Verse,
};
use crate::config::Config;
use crate::recommendation::Recommendation;

pub type Result<T> = std::result::Result<T, QuranError>;

#[derive(Error, Debug)]
pub enum QuranError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status: {status}")]
    Status { status: StatusCode, url: String },
}

impl QuranError {
    pub fn to_user_friendly_message(&self) -> String {
        match self {
            QuranError::Http(e) if e.is_timeout() => {
                "The request timed out. The Quran API might be slow right now.".to_string()
            }
            QuranError::Http(e) if e.is_connect() || e.is_request() => {
                "Connection error. Please check your internet connection and try again.".to_string()
            }
            QuranError::Http(e) if e.is_decode() => {
                "Received an unexpected response format from the Quran API.".to_string()
            }
            QuranError::Http(_) => "A network error occurred. Please try again later.".to_string(),
            QuranError::Status { status, .. } => {
                format!("The Quran API answered with {}.", status)
            }
        }
    }
}

#[derive(Deserialize)]
struct ChaptersResponse {
    #[serde(default)]
    chapters: Vec<Chapter>,
}

#[derive(Deserialize)]
struct ChapterResponse {
    chapter: Chapter,
}

#[derive(Deserialize)]
struct VersesResponse {
    #[serde(default)]
    verses: Vec<Verse>,
}

#[derive(Clone)]
pub struct QuranClient {
    client: Client,
    base_url: String,
    language: String,
    translation_id: u32,
    per_page: u32,
}

impl QuranClient {
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            translation_id: config.translation_id,
            per_page: config.verses_per_page,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: String) -> Result<T> {
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(QuranError::Status {
                status: response.status(),
                url,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn list_chapters(&self) -> Result<Vec<Chapter>> {
        let url = format!("{}/chapters", self.base_url);
        let body: ChaptersResponse = self.get(url).await?;
        Ok(body.chapters)
    }

    pub async fn chapter(&self, id: u32) -> Result<Chapter> {
        let url = format!("{}/chapters/{}", self.base_url, id);
        let body: ChapterResponse = self.get(url).await?;
        Ok(body.chapter)
    }

    /// First page of verses with word-by-word translations.
    pub async fn verses_by_chapter(&self, id: u32) -> Result<Vec<Verse>> {
        let url = format!(
            "{}/verses/by_chapter/{}?language={}&per_page={}&words=true&translations={}",
            self.base_url, id, self.language, self.per_page, self.translation_id
        );
        let body: VersesResponse = self.get(url).await?;
        Ok(body.verses)
    }
}

/// Chapter list plus the error text to show when the fallback list was used.
#[derive(Debug, Clone)]
pub struct ChapterListing {
    pub chapters: Vec<Chapter>,
    pub error: Option<String>,
}

pub async fn load_chapters(client: &QuranClient) -> ChapterListing {
    debug!(api = %client.base_url(), "loading chapters");
    match client.list_chapters().await {
        Ok(chapters) => ChapterListing { chapters, error: None },
        Err(e) => {
            warn!(error = %e, "{}", e.to_user_friendly_message());
            ChapterListing {
                chapters: fallback_chapters(),
                error: Some("Failed to load chapters".to_string()),
            }
        }
    }
}

pub async fn load_chapter_content(client: &QuranClient, chapter: &Chapter) -> SurahContent {
    match client.verses_by_chapter(chapter.id).await {
        Ok(verses) => SurahContent {
            header: SurahHeader::from(chapter),
            verses,
        },
        Err(e) => {
            warn!(chapter = chapter.id, error = %e, "{}", e.to_user_friendly_message());
            fallback_chapter_content(chapter)
        }
    }
}

/// Recommendations only carry names, so the chapter info is fetched for the
/// verse count and revelation place.
pub async fn load_recommendation_content(
    client: &QuranClient,
    rec: &Recommendation,
) -> SurahContent {
    let fetched = async {
        let chapter = client.chapter(rec.id).await?;
        let verses = client.verses_by_chapter(rec.id).await?;
        Ok::<_, QuranError>((chapter, verses))
    };

    match fetched.await {
        Ok((chapter, verses)) => SurahContent {
            header: SurahHeader {
                id: rec.id,
                name: rec.name.to_string(),
                name_arabic: rec.name_arabic.to_string(),
                translation: rec.translation.to_string(),
                verses_count: chapter.verses_count,
                revelation_place: chapter.revelation_place,
            },
            verses,
        },
        Err(e) => {
            warn!(chapter = rec.id, error = %e, "{}", e.to_user_friendly_message());
            fallback_recommendation_content(rec)
        }
    }
}
