use std::path::Path;

use log::info;
use tokio::fs;
use uuid::Uuid;

use crate::error::ApiError;

const STYLESHEET_TAG: &str = "<link rel=\"stylesheet\" href=\"style.css\">";
const SCRIPT_TAG: &str = "<script src=\"script.js\"></script>";

/// Overwrite-or-create `path` with `content`. Parent directories are not
/// created; the caller owns path validity. No sandboxing is performed here,
/// the service trusts its callers.
pub async fn write_file(path: &str, content: &str) -> Result<(), ApiError> {
    fs::write(path, content)
        .await
        .map_err(|e| ApiError::FileOperation(e.to_string()))
}

/// Assemble a static website under a fresh directory in `root` and return
/// the relative URL of its index page.
///
/// When CSS or JS fragments are supplied, the matching `<link>`/`<script>`
/// tag is injected before the first `</head>`/`</body>` unless the HTML
/// already contains the exact tag. Injection is a literal substring replace;
/// HTML without the closing tag is written unmodified.
pub async fn assemble_site(
    root: &Path,
    html: &str,
    css: Option<&str>,
    js: Option<&str>,
) -> Result<String, ApiError> {
    let site_id = Uuid::new_v4().to_string();
    let site_dir = root.join(&site_id);
    fs::create_dir_all(&site_dir)
        .await
        .map_err(|e| ApiError::SiteAssembly(e.to_string()))?;

    let index_path = site_dir.join("index.html");
    write_site_file(&index_path, html).await?;

    if let Some(css) = css {
        write_site_file(&site_dir.join("style.css"), css).await?;
        if !html.contains(STYLESHEET_TAG) {
            let current = read_site_file(&index_path).await?;
            let tag = format!("  {}\n</head>", STYLESHEET_TAG);
            write_site_file(&index_path, &current.replacen("</head>", &tag, 1)).await?;
        }
    }

    if let Some(js) = js {
        write_site_file(&site_dir.join("script.js"), js).await?;
        if !html.contains(SCRIPT_TAG) {
            let current = read_site_file(&index_path).await?;
            let tag = format!("  {}\n</body>", SCRIPT_TAG);
            write_site_file(&index_path, &current.replacen("</body>", &tag, 1)).await?;
        }
    }

    info!("Assembled site {}", site_id);
    Ok(format!("/websites/{}/index.html", site_id))
}

async fn write_site_file(path: &Path, content: &str) -> Result<(), ApiError> {
    fs::write(path, content)
        .await
        .map_err(|e| ApiError::SiteAssembly(e.to_string()))
}

async fn read_site_file(path: &Path) -> Result<String, ApiError> {
    fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::SiteAssembly(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HTML: &str = "<html><head><title>t</title></head><body><p>hi</p></body></html>";

    async fn read_index(root: &Path, url: &str) -> String {
        // url is /websites/{id}/index.html
        let id = url
            .trim_start_matches("/websites/")
            .trim_end_matches("/index.html");
        fs::read_to_string(root.join(id).join("index.html"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn writes_html_only() {
        let dir = tempdir().unwrap();
        let url = assemble_site(dir.path(), HTML, None, None).await.unwrap();
        assert!(url.starts_with("/websites/"));
        assert!(url.ends_with("/index.html"));
        assert_eq!(read_index(dir.path(), &url).await, HTML);
    }

    #[tokio::test]
    async fn injects_stylesheet_and_script() {
        let dir = tempdir().unwrap();
        let url = assemble_site(dir.path(), HTML, Some("body{}"), Some("x()"))
            .await
            .unwrap();

        let index = read_index(dir.path(), &url).await;
        assert!(index.contains(STYLESHEET_TAG));
        assert!(index.contains(SCRIPT_TAG));
        // Tags land inside head/body respectively
        assert!(index.find(STYLESHEET_TAG).unwrap() < index.find("</head>").unwrap());
        assert!(index.contains(&format!("  {}\n</body>", SCRIPT_TAG)));
    }

    #[tokio::test]
    async fn no_duplicate_injection_when_tag_present() {
        let dir = tempdir().unwrap();
        let html = format!(
            "<html><head>{}</head><body></body></html>",
            STYLESHEET_TAG
        );
        let url = assemble_site(dir.path(), &html, Some("body{}"), None)
            .await
            .unwrap();

        let index = read_index(dir.path(), &url).await;
        assert_eq!(index.matches(STYLESHEET_TAG).count(), 1);
        assert_eq!(index, html);
    }

    #[tokio::test]
    async fn missing_closing_tags_mean_no_injection() {
        let dir = tempdir().unwrap();
        let html = "<p>no head or body here</p>";
        let url = assemble_site(dir.path(), html, Some("body{}"), Some("x()"))
            .await
            .unwrap();

        // Asset files are still written, the html is left alone.
        let id = url
            .trim_start_matches("/websites/")
            .trim_end_matches("/index.html");
        let site_dir = dir.path().join(id);
        assert!(site_dir.join("style.css").exists());
        assert!(site_dir.join("script.js").exists());
        assert_eq!(read_index(dir.path(), &url).await, html);
    }

    #[tokio::test]
    async fn distinct_sites_get_distinct_directories() {
        let dir = tempdir().unwrap();
        let a = assemble_site(dir.path(), HTML, None, None).await.unwrap();
        let b = assemble_site(dir.path(), HTML, None, None).await.unwrap();
        assert_ne!(a, b);
    }
}
