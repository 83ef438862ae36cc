use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::data_formats::{CreateNewsRequest, UpdateNewsRequest};
use crate::errors::RequestError;
use crate::models::{News, MAX_TITLE_CHARS};
use crate::LOG_TARGET;

const NEWS_COLUMNS: &str =
    "id, title, content, category, news_views, is_featured, user_id, thumbnail, created_at";

fn check_text_fields(title: &str, content: &str) -> Result<(), RequestError> {
    if title.trim().is_empty() {
        return Err(RequestError::RunTimeError("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(RequestError::RunTimeError(
            "Title must have at most 255 characters",
        ));
    }
    if content.trim().is_empty() {
        return Err(RequestError::RunTimeError("Content is required"));
    }
    Ok(())
}

/// Stores a new article, filling in the model defaults for omitted values.
pub async fn insert_news(
    pool: &SqlitePool,
    CreateNewsRequest {
        title,
        content,
        category,
        news_views,
        is_featured,
        user_id,
        thumbnail,
    }: CreateNewsRequest,
) -> Result<News, RequestError> {
    check_text_fields(&title, &content)?;
    let news_views = news_views.unwrap_or(0);
    if news_views < 0 {
        return Err(RequestError::RunTimeError("View count cannot be negative"));
    }

    let mut tx = pool.begin().await?;
    let news = sqlx::query_as::<_, News>(&format!(
        r#"
        INSERT INTO news (title, content, category, news_views, is_featured, user_id, thumbnail)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {NEWS_COLUMNS}
        "#
    ))
    .bind(title)
    .bind(content)
    .bind(category.unwrap_or_default().as_str())
    .bind(news_views)
    .bind(is_featured.unwrap_or(false))
    .bind(user_id)
    .bind(thumbnail)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    info!(target: LOG_TARGET, id = news.id, user_id = ?news.user_id, "Created news");
    Ok(news)
}

pub async fn get_news_by_id(pool: &SqlitePool, id: i64) -> Result<Option<News>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<_, News>(&format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = $1"))
        .bind(id)
        .fetch_optional(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

/// Lists articles newest first, optionally only those owned by `owner_id`.
pub async fn list_news(
    pool: &SqlitePool,
    owner_id: Option<i64>,
) -> Result<Vec<News>, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<_, News>(&format!(
        r#"
        SELECT {NEWS_COLUMNS} FROM news
        WHERE (user_id = $1 OR $1 IS NULL)
        ORDER BY created_at DESC, id DESC
        "#
    ))
    .bind(owner_id)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

/// Adds one view and returns the stored article.
///
/// The increment happens inside the `UPDATE`, so concurrent viewers never
/// overwrite each other's counts.
pub async fn increment_news_views(pool: &SqlitePool, id: i64) -> Result<News, RequestError> {
    let mut tx = pool.begin().await?;
    let news = sqlx::query_as::<_, News>(&format!(
        "UPDATE news SET news_views = news_views + 1 WHERE id = $1 RETURNING {NEWS_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;
    let news = news.ok_or(RequestError::NotFound)?;
    debug!(target: LOG_TARGET, id, news_views = news.news_views, "Counted news view");
    Ok(news)
}

pub async fn update_news_in_db(
    pool: &SqlitePool,
    id: i64,
    UpdateNewsRequest {
        title,
        content,
        category,
        thumbnail,
        is_featured,
    }: UpdateNewsRequest,
) -> Result<News, RequestError> {
    check_text_fields(&title, &content)?;
    let mut tx = pool.begin().await?;
    let news = sqlx::query_as::<_, News>(&format!(
        r#"
        UPDATE news
        SET title = $1, content = $2, category = $3, thumbnail = $4, is_featured = $5
        WHERE id = $6
        RETURNING {NEWS_COLUMNS}
        "#
    ))
    .bind(title)
    .bind(content)
    .bind(category.as_str())
    .bind(thumbnail)
    .bind(is_featured)
    .bind(id)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;
    news.ok_or(RequestError::NotFound)
}

pub async fn delete_news_in_db(pool: &SqlitePool, id: i64) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(id)
        .execute(&mut tx)
        .await?;
    tx.commit().await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }
    info!(target: LOG_TARGET, id, "Deleted news");
    Ok(())
}

impl News {
    /// Counts one more view and refreshes `self` with the stored values.
    pub async fn increment_views(&mut self, pool: &SqlitePool) -> Result<(), RequestError> {
        *self = increment_news_views(pool, self.id).await?;
        Ok(())
    }
}
