use showcase_core::asset::{parse_glb, ModelAsset};
use showcase_core::cache::ModelCache;
use showcase_core::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Parsed meshes waiting for the frame loop to upload them, keyed by
/// registry index.
pub type UploadQueue = Rc<RefCell<Vec<(usize, Rc<ModelAsset>)>>>;

async fn fetch_response(url: &str) -> anyhow::Result<web::Response> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_val = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    let resp: web::Response = resp_val
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {url}: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    Ok(resp)
}

pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let resp = fetch_response(url).await?;
    let promise = resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("read {url}: body is not text"))
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let resp = fetch_response(url).await?;
    let promise = resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("read {url}: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Fetch every distinct model path once, in parallel. Each finished asset is
/// reported to the showcase for all registry entries sharing its path and
/// queued for upload.
pub fn load_all(showcase: Rc<RefCell<Showcase>>, uploads: UploadQueue) {
    let cache: Rc<RefCell<ModelCache<ModelAsset>>> = Rc::new(RefCell::new(ModelCache::default()));

    let mut by_path: Vec<(String, Vec<usize>)> = Vec::new();
    for (i, m) in showcase.borrow().registry().models().iter().enumerate() {
        match by_path.iter_mut().find(|(p, _)| *p == m.path) {
            Some((_, idx)) => idx.push(i),
            None => by_path.push((m.path.clone(), vec![i])),
        }
    }
    log::info!("[assets] loading {} files", by_path.len());

    for (path, indices) in by_path {
        let showcase = showcase.clone();
        let uploads = uploads.clone();
        let cache = cache.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let parsed = match fetch_bytes(&path).await {
                Ok(bytes) => parse_glb(&path, &bytes).map_err(anyhow::Error::from),
                Err(e) => Err(e),
            };
            match parsed {
                Ok(asset) => {
                    let asset = cache.borrow_mut().insert(&path, asset);
                    let mut sc = showcase.borrow_mut();
                    let mut queue = uploads.borrow_mut();
                    for &i in &indices {
                        sc.on_asset_loaded(i, asset.bounds);
                        queue.push((i, asset.clone()));
                    }
                }
                Err(e) => showcase.borrow_mut().on_asset_failed(e.to_string()),
            }
        });
    }
}
