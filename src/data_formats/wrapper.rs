use serde::{Deserialize, Serialize};

use super::response::NewsResponse;

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleNewsWrapper {
    pub news: Vec<NewsResponse>,
    #[serde(rename = "newsCount")]
    pub news_count: usize,
}

impl MultipleNewsWrapper {
    pub fn wrap_news(news: Vec<NewsResponse>) -> MultipleNewsWrapper {
        MultipleNewsWrapper {
            news_count: news.len(),
            news,
        }
    }
}
