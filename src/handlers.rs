use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::{request::Parts, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use tracing::{info, warn};

use crate::{
    authentication::{
        end_session, get_jwt_token, set_flash, start_session, take_flash, AuthUser, FlashMessage,
        MaybeUser, LAST_LOGIN_COOKIE, LOGIN_PATH,
    },
    data_formats::{
        CreateNewsRequest, LoginForm, MainPageQueryParams, MultipleNewsWrapper, NewsFilter,
        NewsForm, NewsResponse, RegisterForm,
    },
    db_helpers::{
        authenticate_user, delete_news_in_db, get_news_by_id, get_user_by_id,
        increment_news_views, insert_news, insert_user, list_news, update_news_in_db,
    },
    errors::RequestError,
    models::News,
    views, AppState, LOG_TARGET,
};

type HtmlResult = Result<Markup, RequestError>;
type JsonResult<T> = Result<Json<T>, RequestError>;

/// Article id taken from the path. Anything that is not a valid id is a
/// missing page rather than a bad request.
pub struct NewsId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for NewsId
where
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                info!(target: LOG_TARGET, err = %e, "Unparsable news id");
                RequestError::NotFound
            })?;
        Ok(NewsId(id))
    }
}

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Response {
    info!(target: LOG_TARGET, %uri, "No route");
    (
        StatusCode::NOT_FOUND,
        views::error_page(
            StatusCode::NOT_FOUND,
            &format!("URL {uri} provided was not found"),
        ),
    )
        .into_response()
}

// ----------------- Main Page -----------------
pub async fn show_main(
    Extension(state): Extension<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Query(MainPageQueryParams { filter }): Query<MainPageQueryParams>,
    jar: CookieJar,
) -> Result<Response, RequestError> {
    let owner_id = match (filter, &user) {
        (NewsFilter::All, _) => None,
        (NewsFilter::My, Some(user)) => Some(user.id),
        (NewsFilter::My, None) => return Ok(Redirect::to(LOGIN_PATH).into_response()),
    };
    let news_list = list_news(&state.pool, owner_id).await?;
    let last_login = user
        .as_ref()
        .and_then(|_| jar.get(LAST_LOGIN_COOKIE))
        .map(|cookie| cookie.value().to_owned());

    Ok(views::main_page(user.as_ref(), &news_list, filter, last_login.as_deref()).into_response())
}

// ----------------- User Handlers -----------------
pub async fn show_register() -> Markup {
    views::register_page(&[], "")
}

pub async fn register_user(
    Extension(state): Extension<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, RequestError> {
    let username = form.username.clone();
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => return Ok(views::register_page(&errors, &username).into_response()),
    };

    match insert_user(&state.pool, request).await {
        Ok(_) => {
            let jar = set_flash(jar, FlashMessage::AccountCreated);
            Ok((jar, Redirect::to(LOGIN_PATH)).into_response())
        }
        Err(e) if e.is_unique_violation() => {
            let errors = vec!["A user with that username already exists.".to_owned()];
            Ok(views::register_page(&errors, &username).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn show_login(jar: CookieJar) -> (CookieJar, Markup) {
    let (jar, flash) = take_flash(jar);
    (
        jar,
        views::login_page(&[], flash.map(|flash| flash.text()), ""),
    )
}

pub async fn login_user(
    Extension(state): Extension<Arc<AppState>>,
    jar: CookieJar,
    Form(LoginForm { username, password }): Form<LoginForm>,
) -> Result<Response, RequestError> {
    let user = match authenticate_user(&state.pool, username.trim(), password).await? {
        Some(user) => user,
        None => {
            let errors = vec![
                "Please enter a correct username and password. Note that both fields may be case-sensitive."
                    .to_owned(),
            ];
            return Ok(views::login_page(&errors, None, &username).into_response());
        }
    };

    let token = get_jwt_token(user.id, &state.config.jwt_secret).map_err(|e| {
        warn!(target: LOG_TARGET, err = %e, "Could not issue session token");
        RequestError::ServerError
    })?;
    info!(target: LOG_TARGET, id = user.id, "User logged in");
    Ok((start_session(jar, token), Redirect::to("/")).into_response())
}

pub async fn logout_user(jar: CookieJar) -> (CookieJar, Redirect) {
    (end_session(jar), Redirect::to(LOGIN_PATH))
}

// ----------------- News Handlers -----------------
pub async fn show_create_news(user: AuthUser) -> Markup {
    views::news_form_page(
        &user,
        "Create News",
        "/create-news/",
        &NewsForm::default(),
        &[],
    )
}

pub async fn create_news(
    user: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<NewsForm>,
) -> Result<Response, RequestError> {
    let fields = match form.clone().validate() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(
                views::news_form_page(&user, "Create News", "/create-news/", &form, &errors)
                    .into_response(),
            )
        }
    };
    insert_news(
        &state.pool,
        CreateNewsRequest::from_fields(fields, Some(user.id)),
    )
    .await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn show_news(
    Extension(state): Extension<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    NewsId(id): NewsId,
) -> HtmlResult {
    let news = increment_news_views(&state.pool, id).await?;
    let author = match news.user_id {
        Some(user_id) => get_user_by_id(&state.pool, user_id)
            .await?
            .map(|author| author.username),
        None => None,
    };
    Ok(views::news_detail_page(
        user.as_ref(),
        &news,
        author.as_deref(),
    ))
}

/// Loads an article and checks that `user` may change it.
async fn get_owned_news(state: &AppState, user: &AuthUser, id: i64) -> Result<News, RequestError> {
    let news = get_news_by_id(&state.pool, id)
        .await?
        .ok_or(RequestError::NotFound)?;
    if !news.is_owned_by(user.id) {
        return Err(RequestError::Forbidden);
    }
    Ok(news)
}

pub async fn show_edit_news(
    user: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    NewsId(id): NewsId,
) -> HtmlResult {
    let news = get_owned_news(&state, &user, id).await?;
    Ok(views::news_form_page(
        &user,
        "Edit News",
        &format!("/news/{id}/edit/"),
        &NewsForm::from(&news),
        &[],
    ))
}

pub async fn edit_news(
    user: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    NewsId(id): NewsId,
    Form(form): Form<NewsForm>,
) -> Result<Response, RequestError> {
    get_owned_news(&state, &user, id).await?;
    let fields = match form.clone().validate() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(views::news_form_page(
                &user,
                "Edit News",
                &format!("/news/{id}/edit/"),
                &form,
                &errors,
            )
            .into_response())
        }
    };
    update_news_in_db(&state.pool, id, fields).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn delete_news(
    user: AuthUser,
    Extension(state): Extension<Arc<AppState>>,
    NewsId(id): NewsId,
) -> Result<Redirect, RequestError> {
    get_owned_news(&state, &user, id).await?;
    delete_news_in_db(&state.pool, id).await?;
    Ok(Redirect::to("/"))
}

// ----------------- JSON Handlers -----------------
pub async fn list_news_json(
    Extension(state): Extension<Arc<AppState>>,
) -> JsonResult<MultipleNewsWrapper> {
    let news = list_news(&state.pool, None)
        .await?
        .into_iter()
        .map(NewsResponse::new)
        .collect();
    Ok(Json(MultipleNewsWrapper::wrap_news(news)))
}

pub async fn get_news_json(
    Extension(state): Extension<Arc<AppState>>,
    NewsId(id): NewsId,
) -> JsonResult<NewsResponse> {
    let news = get_news_by_id(&state.pool, id)
        .await?
        .ok_or(RequestError::NotFound)?;
    Ok(Json(NewsResponse::new(news)))
}
