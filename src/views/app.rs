// ============================================================================
// APP VIEW - Composición de la pantalla completa
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::AppState;
use crate::views::{
    render_end_production_modal, render_header, render_image_panel, render_info_bar, render_login,
    render_sidebar,
};

/// Renderizar la aplicación: login o layout de terminal según la sesión
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    if !state.auth.get_logged_in() {
        return render_login(state);
    }

    let layout = ElementBuilder::new("div")?
        .class("app-layout")
        .build();

    let sidebar = render_sidebar(state)?;
    append_child(&layout, &sidebar)?;

    let main = ElementBuilder::new("div")?
        .class("main-column")
        .build();

    let info_bar = render_info_bar(state)?;
    append_child(&main, &info_bar)?;

    let header = render_header(state)?;
    append_child(&main, &header)?;

    let content = ElementBuilder::new("main")?
        .class("main-content")
        .build();
    let image_panel = render_image_panel(state)?;
    append_child(&content, &image_panel)?;
    append_child(&main, &content)?;

    append_child(&layout, &main)?;

    // El modal vive en la raíz del layout, visible según el estado
    let modal = render_end_production_modal(state)?;
    append_child(&layout, &modal)?;

    Ok(layout)
}
