//! Server-rendered HTML pages.
//!
//! Every user-supplied string goes through `html_escape` before it is placed
//! in the markup. Privileged controls are only emitted when the page context
//! says the viewer is logged in.

use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::models::movie::Movie;

/// Per-request data shared by every page layout.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Display name of the watchlist owner, if an account exists.
    pub owner_name: Option<String>,

    pub authenticated: bool,

    /// Flash messages queued by the previous request.
    pub flashes: Vec<String>,
}

impl PageContext {
    fn heading(&self) -> String {
        match &self.owner_name {
            Some(name) => format!("{}'s Watchlist", encode_text(name)),
            None => "Watchlist".to_string(),
        }
    }
}

fn layout(ctx: &PageContext, content: &str) -> String {
    let heading = ctx.heading();

    let mut flashes = String::new();
    for message in &ctx.flashes {
        let _ = writeln!(flashes, "<div class=\"alert\">{}</div>", encode_text(message));
    }

    let nav = if ctx.authenticated {
        "<li><a href=\"/settings\">Settings</a></li>\n<li><a href=\"/logout\">Logout</a></li>"
    } else {
        "<li><a href=\"/login\">Login</a></li>"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{heading}</title>
<link rel="stylesheet" href="/static/style.css" type="text/css">
</head>
<body>
{flashes}<h2>{heading}</h2>
<nav>
<ul>
<li><a href="/">Home</a></li>
{nav}
</ul>
</nav>
{content}
<footer>
<small>&copy; Watchlist</small>
</footer>
</body>
</html>
"#
    )
}

fn imdb_link(title: &str) -> String {
    let url = format!(
        "https://www.imdb.com/find?q={}",
        urlencoding::encode(title)
    );
    format!(
        r#"<a class="imdb" href="{}" target="_blank" rel="noopener" title="Find this movie on IMDb">IMDb</a>"#,
        encode_double_quoted_attribute(&url)
    )
}

/// GET /
pub fn index(ctx: &PageContext, movies: &[Movie]) -> String {
    let mut content = String::new();
    let _ = writeln!(content, "<p>{} Titles</p>", movies.len());

    if ctx.authenticated {
        content.push_str(
            r#"<form method="post">
Title <input type="text" name="title" autocomplete="off" required>
Year <input type="text" name="year" autocomplete="off" required>
<input class="btn" type="submit" name="submit" value="Add">
</form>
"#,
        );
    }

    content.push_str("<ul class=\"movie-list\">\n");
    for movie in movies {
        let _ = write!(
            content,
            "<li>{} - {}\n<span class=\"float-right\">\n",
            encode_text(&movie.title),
            encode_text(&movie.year)
        );
        if ctx.authenticated {
            let _ = write!(
                content,
                r#"<a class="btn" href="/movie/edit/{id}">Edit</a>
<form class="inline-form" method="post" action="/movie/delete/{id}">
<input class="btn" type="submit" name="delete" value="Delete" onclick="return confirm('Are you sure?')">
</form>
"#,
                id = movie.id
            );
        }
        let _ = write!(content, "{}\n</span>\n</li>\n", imdb_link(&movie.title));
    }
    content.push_str("</ul>");

    layout(ctx, &content)
}

/// GET /movie/edit/{id}
pub fn edit(ctx: &PageContext, movie: &Movie) -> String {
    let content = format!(
        r#"<h3>Edit item</h3>
<form method="post">
Title <input type="text" name="title" autocomplete="off" required value="{title}">
Year <input type="text" name="year" autocomplete="off" required value="{year}">
<input class="btn" type="submit" name="submit" value="Update">
</form>"#,
        title = encode_double_quoted_attribute(&movie.title),
        year = encode_double_quoted_attribute(&movie.year),
    );

    layout(ctx, &content)
}

/// GET /settings
pub fn settings(ctx: &PageContext, current_name: &str) -> String {
    let content = format!(
        r#"<h3>Settings</h3>
<form method="post">
Your Name <input type="text" name="name" autocomplete="off" required value="{}">
<input class="btn" type="submit" name="submit" value="Save">
</form>"#,
        encode_double_quoted_attribute(current_name)
    );

    layout(ctx, &content)
}

/// GET /login
pub fn login(ctx: &PageContext) -> String {
    let content = r#"<h3>Login</h3>
<form method="post">
Username<br>
<input type="text" name="username" required><br><br>
Password<br>
<input type="password" name="password" required><br><br>
<input class="btn" type="submit" name="submit" value="Submit">
</form>"#;

    layout(ctx, content)
}

fn standalone(title: &str, line: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css" type="text/css">
</head>
<body>
<ul class="movie-list">
<li>
{line}
<span class="float-right">
<a href="/">Go Back</a>
</span>
</li>
</ul>
</body>
</html>
"#
    )
}

/// Rendered for unknown routes and unknown movie ids.
#[must_use]
pub fn not_found() -> String {
    standalone("404 - Page Not Found", "Page Not Found - 404")
}

#[must_use]
pub fn error_page(status: StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    standalone(
        &format!("{} - {}", status.as_u16(), reason),
        &format!("{} - {}", reason, status.as_u16()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, title: &str, year: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year: year.to_string(),
        }
    }

    fn guest() -> PageContext {
        PageContext {
            owner_name: Some("TestName".to_string()),
            authenticated: false,
            flashes: Vec::new(),
        }
    }

    #[test]
    fn test_guest_index_has_no_privileged_controls() {
        let html = index(&guest(), &[movie(1, "Test Movie Title", "2019")]);

        assert!(html.contains("TestName's Watchlist"));
        assert!(html.contains("Test Movie Title"));
        for word in ["Logout", "Edit", "Add", "Delete", "Settings", "<form method=\"post\">"] {
            assert!(!html.contains(word), "guest page leaked {word}");
        }
    }

    #[test]
    fn test_authenticated_index_has_controls() {
        let ctx = PageContext {
            authenticated: true,
            ..guest()
        };
        let html = index(&ctx, &[movie(7, "Leon", "1994")]);

        assert!(html.contains("<form method=\"post\">"));
        assert!(html.contains("href=\"/movie/edit/7\""));
        assert!(html.contains("action=\"/movie/delete/7\""));
        assert!(html.contains("Logout"));
        assert!(html.contains("Settings"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let ctx = PageContext {
            owner_name: Some("<b>me</b>".to_string()),
            authenticated: true,
            flashes: vec!["<i>hi</i>".to_string()],
        };
        let html = index(&ctx, &[movie(1, "<script>alert(1)</script>", "2020")]);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;me&lt;/b&gt;'s Watchlist"));
        assert!(html.contains("<div class=\"alert\">&lt;i&gt;hi&lt;/i&gt;</div>"));
    }

    #[test]
    fn test_edit_form_prefills_values() {
        let html = edit(&guest(), &movie(3, "Say \"Hi\"", "2001"));
        assert!(html.contains("Edit item"));
        assert!(html.contains("value=\"Say &quot;Hi&quot;\""));
        assert!(html.contains("value=\"2001\""));
    }

    #[test]
    fn test_imdb_link_is_url_encoded() {
        let link = imdb_link("WALL-E & Eve");
        assert!(link.contains("q=WALL-E%20%26%20Eve"));
    }

    #[test]
    fn test_heading_without_owner() {
        let html = login(&PageContext::default());
        assert!(html.contains("<h2>Watchlist</h2>"));
    }

    #[test]
    fn test_not_found_page() {
        let html = not_found();
        assert!(html.contains("Page Not Found - 404"));
        assert!(html.contains("Go Back"));
    }

    #[test]
    fn test_error_page_uses_status_reason() {
        let html = error_page(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains("Internal Server Error - 500"));
    }
}
