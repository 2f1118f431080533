// ============================================================================
// APP - Aplicación principal
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::incremental::{
    update_end_production_modal, update_header, update_image_panel, update_operations_panel,
};
use crate::dom::{get_element_by_id, set_inner_html};
use crate::state::{AppState, IncrementalUpdate};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Option<Element>,
}

impl App {
    /// Crear nueva aplicación. El estado se hidrata desde cookie y
    /// localStorage (sesión, selección, códigos de transacción).
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        if state.auth.get_logged_in() {
            log::info!("💾 [APP] Sesión encontrada en cookie, restaurando terminal...");
        }

        // Suscribirse a cambios de estado para re-renderizar automáticamente.
        // Timeout(0) batchea múltiples updates del mismo tick.
        state.subscribe_to_changes(move || {
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self {
            state,
            root: Some(root),
        })
    }

    /// Renderizar aplicación completa
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::info!("🎬 [APP] App::render() llamado");

        if let Some(root) = &self.root {
            // Limpiar contenido anterior
            set_inner_html(root, "");

            let app_view = render_app(&self.state)?;
            root.append_child(&app_view)?;
        }
        Ok(())
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Actualización incremental del DOM (solo elementos específicos)
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        match update_type {
            IncrementalUpdate::Header => update_header(&self.state),
            IncrementalUpdate::OperationsTable => update_operations_panel(&self.state),
            IncrementalUpdate::ImagePanel => update_image_panel(&self.state),
            IncrementalUpdate::EndProductionModal => update_end_production_modal(&self.state),
        }
    }
}
