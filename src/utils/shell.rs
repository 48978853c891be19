//! Minimal HTML shell for the client views.
//!
//! Real view rendering lives in the front-end bundle; the server only hands out
//! a page that names the view and carries what the view needs (the login
//! forward target, the Maps loader).

use crate::config::MapsConfig;
use crate::router::View;

const MAPS_LOADER: &str = "https://maps.googleapis.com/maps/api/js";

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn body_for(view: View, redirect: Option<&str>) -> String {
    match view {
        View::Login => {
            let hidden = redirect
                .map(|target| {
                    format!(
                        r#"<input type="hidden" name="redirect" value="{}">"#,
                        escape_html(target)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<form method="post" action="/login"><input name="username"><input name="password" type="password">{}<button type="submit">Log in</button></form><a href="/new">Create account</a>"#,
                hidden
            )
        }
        View::NewAccount => r#"<form method="post" action="/new"><input name="username"><input name="password" type="password"><button type="submit">Create account</button></form>"#.to_string(),
        View::Dashboard => r#"<div id="map"></div><a href="/logout">Log out</a>"#.to_string(),
    }
}

/// Renders the page for `view`. `redirect` is only used by the login view.
pub fn render_shell(view: View, maps: &MapsConfig, redirect: Option<&str>) -> String {
    let maps_script = maps
        .api_key
        .as_deref()
        .map(|key| {
            format!(
                r#"<script async src="{}?key={}"></script>"#,
                MAPS_LOADER,
                escape_html(&urlencoding::encode(key))
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Rentals</title>{}</head><body><div id="app" data-view="{}">{}</div></body></html>"#,
        maps_script,
        view.name(),
        body_for(view, redirect)
    )
}
