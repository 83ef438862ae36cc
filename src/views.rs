//! HTML pages rendered with `maud`.

use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

use crate::authentication::AuthUser;
use crate::data_formats::{NewsFilter, NewsForm};
use crate::models::{Category, News};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f4; color: #1d2a1d; }
nav { display: flex; gap: 1rem; align-items: center; padding: .75rem 1.5rem; background: #1f6f3f; color: #fff; }
nav a { color: #fff; }
nav .spacer { flex: 1; }
main { max-width: 56rem; margin: 0 auto; padding: 1.5rem; }
.news-list { display: grid; gap: 1rem; }
.news-card { background: #fff; border-radius: .5rem; padding: 1rem; box-shadow: 0 1px 2px #0002; }
.badge { font-size: .75rem; padding: .1rem .4rem; border-radius: .25rem; background: #e0e7e0; margin-right: .25rem; }
.badge.hot { background: #d9412b; color: #fff; }
.badge.featured { background: #e8b923; }
.errors { color: #b00020; }
.flash { background: #dff3e3; padding: .5rem 1rem; border-radius: .25rem; }
form p { display: flex; flex-direction: column; gap: .25rem; }
.filters { display: flex; gap: .5rem; margin-bottom: 1rem; }
.filters a.active { font-weight: bold; }
"#;

fn render_html_head(page_title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (page_title) " | Football News" }
            style { (maud::PreEscaped(STYLE)) }
        }
    }
}

fn render_nav(user: Option<&AuthUser>) -> Markup {
    html! {
        nav {
            a href="/" { "Home" }
            span class="spacer" {}
            @if let Some(user) = user {
                span { "Signed in as " strong { (user.username) } }
                a href="/logout/" { button type="button" { "Logout" } }
            } @else {
                a href="/login/" { "Sign in" }
                a href="/register/" { "Sign up" }
            }
        }
    }
}

/// Wraps page content with the shared head and navigation bar.
pub fn render_html_page(page_title: &str, user: Option<&AuthUser>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (render_html_head(page_title))
            body {
                (render_nav(user))
                main { (content) }
            }
        }
    }
}

fn render_errors(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors {
                    li { (error) }
                }
            }
        }
    }
}

fn render_badges(news: &News) -> Markup {
    html! {
        span class="badge" { (news.category.label()) }
        @if news.is_featured {
            span class="badge featured" { "Featured" }
        }
        @if news.is_news_hot() {
            span class="badge hot" { "Hot" }
        }
    }
}

pub fn main_page(
    user: Option<&AuthUser>,
    news_list: &[News],
    filter: NewsFilter,
    last_login: Option<&str>,
) -> Markup {
    let content = html! {
        h1 { "Football News" }
        @if let Some(last_login) = last_login {
            p { "Last login: " (last_login) }
        }
        div class="filters" {
            a href="/?filter=all" class=[(filter == NewsFilter::All).then_some("active")] {
                "All Articles"
            }
            a href="/?filter=my" class=[(filter == NewsFilter::My).then_some("active")] {
                "My Articles"
            }
            @if user.is_some() {
                a href="/create-news/" { button type="button" { "Add News" } }
            }
        }
        @if news_list.is_empty() {
            p { "No news yet." }
        } @else {
            div class="news-list" {
                @for news in news_list {
                    article class="news-card" {
                        @if let Some(thumbnail) = &news.thumbnail {
                            img src=(thumbnail) alt=(news.title) width="160";
                        }
                        h2 {
                            a href=(format!("/news/{}/", news.id)) { (news.title) }
                        }
                        p { (render_badges(news)) }
                        p { (news.created_at.format("%d %b %Y %H:%M").to_string()) " · " (news.news_views) " views" }
                        @if let Some(user) = user {
                            @if news.is_owned_by(user.id) {
                                p {
                                    a href=(format!("/news/{}/edit/", news.id)) { "Edit" }
                                    " "
                                    form method="post" action=(format!("/news/{}/delete/", news.id)) style="display:inline" {
                                        button type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    render_html_page("Home", user, content)
}

pub fn login_page(errors: &[String], flash: Option<&str>, username: &str) -> Markup {
    let content = html! {
        h1 { "Login" }
        @if let Some(flash) = flash {
            p class="flash" { (flash) }
        }
        (render_errors(errors))
        form method="post" action="/login/" {
            p {
                label for="username" { "Username" }
                input id="username" type="text" name="username" value=(username) required;
            }
            p {
                label for="password" { "Password" }
                input id="password" type="password" name="password" required;
            }
            button type="submit" { "Login" }
        }
        p { "Don't have an account yet? " a href="/register/" { "Register Now" } }
    };
    render_html_page("Login", None, content)
}

pub fn register_page(errors: &[String], username: &str) -> Markup {
    let content = html! {
        h1 { "Register" }
        (render_errors(errors))
        form method="post" action="/register/" {
            p {
                label for="username" { "Username" }
                input id="username" type="text" name="username" value=(username) required;
            }
            p {
                label for="password1" { "Password" }
                input id="password1" type="password" name="password1" required;
            }
            p {
                label for="password2" { "Password confirmation" }
                input id="password2" type="password" name="password2" required;
            }
            button type="submit" { "Register" }
        }
    };
    render_html_page("Register", None, content)
}

/// The add and edit forms share one layout; only heading and target differ.
pub fn news_form_page(
    user: &AuthUser,
    heading: &str,
    action: &str,
    form: &NewsForm,
    errors: &[String],
) -> Markup {
    let selected = form
        .category
        .as_deref()
        .and_then(|c| c.parse::<Category>().ok())
        .unwrap_or_default();
    let content = html! {
        h1 { (heading) }
        (render_errors(errors))
        form method="post" action=(action) {
            p {
                label for="title" { "Title" }
                input id="title" type="text" name="title" maxlength="255" value=(form.title) required;
            }
            p {
                label for="content" { "Content" }
                textarea id="content" name="content" rows="8" required { (form.content) }
            }
            p {
                label for="category" { "Category" }
                select id="category" name="category" {
                    @for category in Category::ALL {
                        option value=(category.as_str()) selected[category == selected] {
                            (category.label())
                        }
                    }
                }
            }
            p {
                label for="thumbnail" { "Thumbnail URL" }
                input id="thumbnail" type="url" name="thumbnail"
                    value=(form.thumbnail.as_deref().unwrap_or_default());
            }
            p {
                label for="is_featured" {
                    input id="is_featured" type="checkbox" name="is_featured"
                        checked[form.is_featured.is_some()];
                    " Featured"
                }
            }
            button type="submit" { (heading) }
        }
        p { a href="/" { "Back to news" } }
    };
    render_html_page(heading, Some(user), content)
}

pub fn news_detail_page(user: Option<&AuthUser>, news: &News, author: Option<&str>) -> Markup {
    let content = html! {
        p { a href="/" { "Back to news" } }
        article {
            h1 { (news.title) }
            p { (render_badges(news)) }
            p {
                "By " (author.unwrap_or("Anonymous"))
                " · " (news.created_at.format("%d %b %Y %H:%M").to_string())
                " · " (news.news_views) " views"
            }
            @if let Some(thumbnail) = &news.thumbnail {
                img src=(thumbnail) alt=(news.title) width="480";
            }
            div class="content" {
                @for paragraph in news.content.lines() {
                    p { (paragraph) }
                }
            }
        }
    };
    render_html_page(&news.title, user, content)
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let content = html! {
        h1 { (status.as_u16()) }
        p { (message) }
        p { a href="/" { "Back to news" } }
    };
    render_html_page(message, None, content)
}
