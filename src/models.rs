use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Articles with more views than this are "hot".
pub const HOT_NEWS_THRESHOLD: i64 = 20;

pub const MAX_TITLE_CHARS: usize = 255;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    Transfer,
    #[default]
    Update,
    Exclusive,
    Match,
    Rumor,
    Analysis,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Transfer,
        Category::Update,
        Category::Exclusive,
        Category::Match,
        Category::Rumor,
        Category::Analysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transfer => "transfer",
            Category::Update => "update",
            Category::Exclusive => "exclusive",
            Category::Match => "match",
            Category::Rumor => "rumor",
            Category::Analysis => "analysis",
        }
    }

    /// Human readable label used in forms and listings
    pub fn label(&self) -> &'static str {
        match self {
            Category::Transfer => "Transfer",
            Category::Update => "Update",
            Category::Exclusive => "Exclusive",
            Category::Match => "Match",
            Category::Rumor => "Rumor",
            Category::Analysis => "Analysis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown news category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

#[derive(Debug, Clone)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub news_views: i64,
    pub is_featured: bool,
    pub user_id: Option<i64>,
    pub thumbnail: Option<String>,
    pub created_at: NaiveDateTime,
}

impl News {
    pub fn is_news_hot(&self) -> bool {
        self.news_views > HOT_NEWS_THRESHOLD
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for News {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let category: String = row.try_get("category")?;
        let category = category
            .parse::<Category>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "category".to_owned(),
                source: Box::new(e),
            })?;
        Ok(News {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            category,
            news_views: row.try_get("news_views")?,
            is_featured: row.try_get("is_featured")?,
            user_id: row.try_get("user_id")?,
            thumbnail: row.try_get("thumbnail")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
