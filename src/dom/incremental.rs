// ============================================================================
// INCREMENTAL UPDATES - Reemplazo de subárboles específicos del DOM
// ============================================================================
// Cada vista con id propio se puede regenerar y reemplazar in-place sin
// re-render completo. Los listeners del subárbol viejo los limpia el
// navegador al destruir los nodos.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::get_element_by_id;
use crate::state::AppState;
use crate::views::{
    render_actions, render_end_production_modal, render_image_panel, render_info_bar,
    render_operations_panel,
};

/// Reemplazar el nodo con el id dado por uno recién renderizado
fn swap_by_id(id: &str, fresh: Element) -> Result<(), JsValue> {
    let old = get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))?;
    old.replace_with_with_node_1(&fresh)
}

/// Barra de información del iş merkezi + botones de transacción
pub fn update_header(state: &AppState) -> Result<(), JsValue> {
    swap_by_id("workcenter-info-bar", render_info_bar(state)?)?;
    swap_by_id("header-actions", render_actions(state)?)
}

/// Tabla de iş emirleri (card completo del sidebar)
pub fn update_operations_panel(state: &AppState) -> Result<(), JsValue> {
    swap_by_id("operations-panel", render_operations_panel(state)?)
}

/// Panel de imagen del contenido principal
pub fn update_image_panel(state: &AppState) -> Result<(), JsValue> {
    swap_by_id("image-panel", render_image_panel(state)?)
}

/// Modal de Üretim Bitir. Si el modal no existe y hay que mostrarlo, el
/// caller debe caer a re-render completo.
pub fn update_end_production_modal(state: &AppState) -> Result<(), JsValue> {
    let show = *state.show_end_production.borrow();
    match get_element_by_id("end-production-modal") {
        Some(old) => old.replace_with_with_node_1(&render_end_production_modal(state)?.into()),
        None if show => {
            log::warn!("⚠️ Modal no existe, necesita re-render completo");
            Err(JsValue::from_str("Modal not found, needs full render"))
        }
        None => Ok(()),
    }
}
