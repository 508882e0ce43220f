use axum::response::{Html, Json};

use crate::config::{SiteConfig, site_config};

pub async fn site() -> Json<SiteConfig> {
    Json(site_config())
}

/// Landing page carrying the site metadata and the login link.
pub async fn index() -> Html<String> {
    let site = site_config();
    let nav = site
        .main_nav
        .iter()
        .map(|item| format!(r#"<a href="{}">{}</a>"#, item.href, item.title))
        .collect::<Vec<_>>()
        .join(" ");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{name}</title>
<meta name="description" content="{description}">
</head>
<body>
<nav>{nav}</nav>
<h1>{name}</h1>
<p>{description}</p>
<p><a href="/api/spotify/auth">Log in with Spotify</a></p>
</body>
</html>
"#,
        name = site.name,
        description = site.description,
        nav = nav,
    ))
}
