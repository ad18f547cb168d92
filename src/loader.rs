use pointscroll_core::{LoadError, PointCloud, Show};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} for {}", resp.status(), url);
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("response body for {} is not text", url))
}

pub async fn fetch_show(url: &str) -> anyhow::Result<Show> {
    let text = fetch_text(url).await?;
    let show = Show::from_json(&text)?;
    log::info!("[config] {} sections from {}", show.len(), url);
    Ok(show)
}

/// Fetch and decode one section's point cloud. Failures are returned as
/// values for the state machine to handle.
pub async fn fetch_point_cloud(path: &str) -> Result<PointCloud, LoadError> {
    let text = fetch_text(path).await.map_err(|e| LoadError::Fetch {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    PointCloud::from_json(path, &text)
}
