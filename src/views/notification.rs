// ============================================================================
// NOTIFICATION - Toasts transitorios (success / info / warning / error)
// ============================================================================
// Todos los errores se reportan por aquí; ninguno se traga en silencio salvo
// los fallos de lectura de storage durante la hidratación.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::dom::{append_child, document, get_element_by_id, ElementBuilder};

/// Tiempo en pantalla de cada toast
const TOAST_DURATION_MS: u32 = 3_000;

pub fn success(message: &str) {
    log::info!("✅ [TOAST] {}", message);
    show("success", message);
}

pub fn info(message: &str) {
    log::info!("ℹ️ [TOAST] {}", message);
    show("info", message);
}

pub fn warning(message: &str) {
    log::warn!("⚠️ [TOAST] {}", message);
    show("warning", message);
}

pub fn error(message: &str) {
    log::error!("❌ [TOAST] {}", message);
    show("error", message);
}

fn show(kind: &str, message: &str) {
    if let Err(e) = append_toast(kind, message) {
        log::error!("❌ [TOAST] No se pudo mostrar el toast: {:?}", e);
    }
}

fn append_toast(kind: &str, message: &str) -> Result<(), JsValue> {
    let container = ensure_container()?;

    let toast = ElementBuilder::new("div")?
        .class(&format!("toast toast-{}", kind))
        .text(message)
        .build();

    append_child(&container, &toast)?;

    // Autoexpiración; el nodo se quita del DOM y el navegador limpia el resto
    Timeout::new(TOAST_DURATION_MS, move || {
        toast.remove();
    })
    .forget();

    Ok(())
}

/// El contenedor fijo se crea una sola vez y cuelga directamente de <body>
/// para sobrevivir a los re-renders completos de #app
fn ensure_container() -> Result<Element, JsValue> {
    if let Some(container) = get_element_by_id("toast-container") {
        return Ok(container);
    }

    let container = ElementBuilder::new("div")?
        .id("toast-container")?
        .class("toast-container")
        .build();

    let body = document()
        .and_then(|doc| doc.body())
        .ok_or_else(|| JsValue::from_str("No body"))?;
    body.append_child(&container)?;

    Ok(container)
}
