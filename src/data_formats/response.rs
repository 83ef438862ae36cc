use serde::{Deserialize, Serialize};

use crate::models::News;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewsResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(rename = "newsViews")]
    pub news_views: i64,
    #[serde(rename = "isFeatured")]
    pub is_featured: bool,
    #[serde(rename = "isNewsHot")]
    pub is_news_hot: bool,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub thumbnail: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl NewsResponse {
    pub fn new(news: News) -> Self {
        let is_news_hot = news.is_news_hot();
        let News {
            id,
            title,
            content,
            category,
            news_views,
            is_featured,
            user_id,
            thumbnail,
            created_at,
        } = news;
        NewsResponse {
            id,
            title,
            content,
            category: category.to_string(),
            news_views,
            is_featured,
            is_news_hot,
            user_id,
            thumbnail,
            created_at: created_at.to_string(),
        }
    }
}
