use sphere_core::SurfaceRect;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the new pixel size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
    (canvas.width(), canvas.height())
}

/// Canvas rectangle in client (CSS) pixels, the space pointer events use.
#[inline]
pub fn canvas_rect(canvas: &web::HtmlCanvasElement) -> SurfaceRect {
    let r = canvas.get_bounding_client_rect();
    SurfaceRect {
        left: r.left() as f32,
        top: r.top() as f32,
        width: r.width() as f32,
        height: r.height() as f32,
    }
}

pub fn navigate_to_project(id: &str) {
    let href = format!("/projects/{id}");
    log::info!("[nav] {href}");
    if let Some(w) = web::window() {
        if let Err(e) = w.location().set_href(&href) {
            log::error!("[nav] set_href failed: {:?}", e);
        }
    }
}
