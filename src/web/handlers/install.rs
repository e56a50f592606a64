//! Install page and redirects to it

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse},
};
use tracing::{debug, warn};

use crate::web::{AppState, PublicBaseUrl};

const INSTALL_TEMPLATE: &str = include_str!("../../../static/html/install.html");
const INSTALL_PATH: &str = "/install";

fn redirect_to_install() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, INSTALL_PATH)])
}

pub async fn root_redirect() -> impl IntoResponse {
    debug!("Redirecting to install page");
    redirect_to_install()
}

pub async fn fallback_redirect(uri: Uri) -> impl IntoResponse {
    warn!("Invalid path requested: {}", uri.path());
    redirect_to_install()
}

pub async fn install_page(
    State(state): State<AppState>,
    base_url: PublicBaseUrl,
) -> impl IntoResponse {
    Html(render_install_page(
        &state.config.addon.name,
        &state.config.addon.version,
        &base_url,
    ))
}

fn render_install_page(addon_name: &str, version: &str, base_url: &PublicBaseUrl) -> String {
    let stremio_url = format!("stremio://{}/manifest.json", base_url.host);
    let manifest_url = format!("{}/manifest.json", base_url.base);

    INSTALL_TEMPLATE
        .replace("{{ADDON_NAME}}", &escape_html(addon_name))
        .replace("{{STREMIO_URL}}", &escape_html(&stremio_url))
        .replace("{{MANIFEST_URL}}", &escape_html(&manifest_url))
        .replace("{{VERSION}}", &escape_html(version))
}

/// Host headers are client controlled; never splice them into markup raw
fn escape_html(raw: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_links_to_manifest() {
        let base = PublicBaseUrl {
            base: "https://addon.example".into(),
            host: "addon.example".into(),
        };
        let page = render_install_page("Vavoo.to Italy", "1.1.0", &base);
        assert!(page.contains(r#"href="stremio://addon.example/manifest.json""#));
        assert!(page.contains("https://addon.example/manifest.json"));
        assert!(page.contains("Versione: 1.1.0"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn hostile_host_is_escaped() {
        let base = PublicBaseUrl {
            base: "https://x".into(),
            host: "\"><script>".into(),
        };
        let page = render_install_page("A", "1", &base);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&quot;&gt;&lt;script&gt;"));
    }
}
