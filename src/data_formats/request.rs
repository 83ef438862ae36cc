use serde::{Deserialize, Serialize};

use crate::models::{Category, MAX_TITLE_CHARS};

const MAX_USERNAME_CHARS: usize = 150;
const MIN_PASSWORD_CHARS: usize = 8;

/// Validation messages shown next to a re-rendered form.
pub type FormErrors = Vec<String>;

// ----------------- User Request -----------------
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// A registration that passed form validation.
#[derive(Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(self) -> Result<RegisterRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let username = self.username.trim().to_owned();

        if username.is_empty() {
            errors.push("Username is required.".to_owned());
        } else if username.chars().count() > MAX_USERNAME_CHARS {
            errors.push(format!(
                "Username must have at most {MAX_USERNAME_CHARS} characters."
            ));
        } else if !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            errors.push(
                "Username may contain only letters, numbers, and @/./+/-/_ characters.".to_owned(),
            );
        }

        if self.password1 != self.password2 {
            errors.push("The two password fields didn't match.".to_owned());
        } else {
            let password = &self.password1;
            if password.chars().count() < MIN_PASSWORD_CHARS {
                errors.push(format!(
                    "This password is too short. It must contain at least {MIN_PASSWORD_CHARS} characters."
                ));
            }
            if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
                errors.push("This password is entirely numeric.".to_owned());
            }
            if !username.is_empty() && password.eq_ignore_ascii_case(&username) {
                errors.push("The password is too similar to the username.".to_owned());
            }
        }

        if errors.is_empty() {
            Ok(RegisterRequest {
                username,
                password: self.password1,
            })
        } else {
            Err(errors)
        }
    }
}

// ----------------- News Request -----------------

/// Raw fields of the add/edit news form.
///
/// An unchecked checkbox is simply missing from the submitted form, so
/// `is_featured` is only `Some` when it was ticked.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct NewsForm {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub is_featured: Option<String>,
}

/// The editable part of an article after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsFields {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub thumbnail: Option<String>,
    pub is_featured: bool,
}

impl NewsForm {
    pub fn validate(self) -> Result<NewsFields, FormErrors> {
        let mut errors = FormErrors::new();

        let title = self.title.trim().to_owned();
        if title.is_empty() {
            errors.push("Title is required.".to_owned());
        } else if title.chars().count() > MAX_TITLE_CHARS {
            errors.push(format!(
                "Title must have at most {MAX_TITLE_CHARS} characters."
            ));
        }

        let content = self.content.trim().to_owned();
        if content.is_empty() {
            errors.push("Content is required.".to_owned());
        }

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => Category::default(),
            Some(value) => value.parse::<Category>().unwrap_or_else(|e| {
                errors.push(format!("Select a valid choice. {e}."));
                Category::default()
            }),
        };

        let thumbnail = match self.thumbnail.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => match url::Url::parse(value) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Some(value.to_owned()),
                _ => {
                    errors.push("Enter a valid URL for the thumbnail.".to_owned());
                    None
                }
            },
        };

        if errors.is_empty() {
            Ok(NewsFields {
                title,
                content,
                category,
                thumbnail,
                is_featured: self.is_featured.is_some(),
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&crate::models::News> for NewsForm {
    fn from(news: &crate::models::News) -> Self {
        NewsForm {
            title: news.title.clone(),
            content: news.content.clone(),
            category: Some(news.category.as_str().to_owned()),
            thumbnail: news.thumbnail.clone(),
            is_featured: news.is_featured.then(|| "on".to_owned()),
        }
    }
}

/// Arguments for creating an article. Omitted values take the model defaults.
#[derive(Debug, Default, Clone)]
pub struct CreateNewsRequest {
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
    pub news_views: Option<i64>,
    pub is_featured: Option<bool>,
    pub user_id: Option<i64>,
    pub thumbnail: Option<String>,
}

impl CreateNewsRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        CreateNewsRequest {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn from_fields(fields: NewsFields, user_id: Option<i64>) -> Self {
        CreateNewsRequest {
            title: fields.title,
            content: fields.content,
            category: Some(fields.category),
            news_views: None,
            is_featured: Some(fields.is_featured),
            user_id,
            thumbnail: fields.thumbnail,
        }
    }
}

pub type UpdateNewsRequest = NewsFields;
