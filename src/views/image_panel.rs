// ============================================================================
// IMAGE PANEL - Visor de imagen de referencia del malzeme
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::AppState;

/// Renderizar el panel de imagen del área principal. El panel se suscribe al
/// estado compartido (state.image); no existe ningún callback global.
pub fn render_image_panel(state: &AppState) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("div")?
        .id("image-panel")?
        .class("image-panel")
        .build();

    let image = state.image.borrow().clone();

    match image {
        Some(handle) => {
            let header = ElementBuilder::new("div")?
                .class("image-panel-header")
                .build();

            let title = ElementBuilder::new("h3")?
                .class("image-panel-title")
                .text("Resim Görüntüleyici")
                .build();

            let close_btn = ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-close")
                .text("✕")
                .build();

            // Cerrar libera el object URL (via set_image)
            {
                let state = state.clone();
                on_click(&close_btn, move |_| {
                    state.set_image(None);
                })?;
            }

            append_child(&header, &title)?;
            append_child(&header, &close_btn)?;

            let frame = ElementBuilder::new("div")?
                .class("image-frame")
                .build();

            let img = ElementBuilder::new("img")?
                .class("image-view")
                .attr("src", &handle.object_url)?
                .attr("alt", "Görüntülenen Resim")?
                .build();

            append_child(&frame, &img)?;
            append_child(&panel, &header)?;
            append_child(&panel, &frame)?;
        }
        None => {
            let placeholder = ElementBuilder::new("div")?
                .class("image-placeholder")
                .build();

            let icon = ElementBuilder::new("div")?
                .class("image-placeholder-icon")
                .text("🖼️")
                .build();

            let title = ElementBuilder::new("h4")?
                .text("Resim Görüntüleyici")
                .build();

            let hint_text = if *state.image_loading.borrow() {
                "Resim yükleniyor..."
            } else {
                "Sidebar'daki resim arama kutusunu kullanarak resim görüntüleyebilirsiniz."
            };
            let hint = ElementBuilder::new("p")?
                .class("image-placeholder-hint")
                .text(hint_text)
                .build();

            append_child(&placeholder, &icon)?;
            append_child(&placeholder, &title)?;
            append_child(&placeholder, &hint)?;
            append_child(&panel, &placeholder)?;
        }
    }

    Ok(panel)
}
