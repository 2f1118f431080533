// ============================================================================
// TERMINAL DE PLANTA MES - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con el gateway
// ============================================================================

mod app;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_logger::Config;

use crate::app::App;
use crate::state::UpdateType;
use crate::viewmodels::OperationsViewModel;

// Instancia global de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(Config::default());
    log::info!("🚀 Shopfloor Terminal - Rust Puro + MVVM");

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;

    let state = app.state().clone();

    // Guardar app en la variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Con sesión restaurada, cargar el directorio de iş merkezleri al arrancar
    if state.auth.get_logged_in() {
        OperationsViewModel::load_workcenters(&state);
    }

    // Listeners globales: solo se registran UNA VEZ aquí, por lo que es seguro
    // usar forget() sin acumulación (ver dom::events).
    if let Some(win) = web_sys::window() {
        // "loggedIn": el formulario completó el login
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                log::info!("🔄 [MAIN] Evento loggedIn recibido, re-renderizando app...");
                rerender_app();
                OperationsViewModel::load_workcenters(&state);
            }) as Box<dyn FnMut(web_sys::Event)>);
            win.add_event_listener_with_callback("loggedIn", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // "sessionExpired": algún endpoint devolvió 401, volver al login
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                log::warn!("🔒 [MAIN] Sesión caducada, volviendo al login...");
                state.auth.logout();
                rerender_app();
            }) as Box<dyn FnMut(web_sys::Event)>);
            win.add_event_listener_with_callback(
                "sessionExpired",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }
    }

    Ok(())
}

/// Re-renderizar la app (re-render completo)
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Actualizar la app con tipo específico
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| {
        match update_type {
            UpdateType::Incremental(inc_type) => {
                // Primero intentamos actualización incremental
                let needs_full_render = {
                    if let Some(ref app) = *app_cell.borrow() {
                        match app.update_incremental(inc_type.clone()) {
                            Ok(()) => false,
                            Err(e) => {
                                let error_str = format!("{:?}", e);
                                if error_str.contains("needs full render")
                                    || error_str.contains("not found")
                                {
                                    log::info!("🔄 [UPDATE] Cambiando a re-render completo");
                                    true
                                } else {
                                    log::error!(
                                        "❌ Error en actualización incremental {:?}: {:?}",
                                        inc_type,
                                        e
                                    );
                                    false
                                }
                            }
                        }
                    } else {
                        log::warn!("⚠️ [UPDATE] App no está inicializada");
                        false
                    }
                };

                // Liberar el borrow anterior antes del re-render completo
                if needs_full_render {
                    if let Some(ref mut app_mut) = *app_cell.borrow_mut() {
                        let _ = app_mut.render();
                    }
                }
            }
            UpdateType::FullRender => {
                if let Some(ref mut app_mut) = *app_cell.borrow_mut() {
                    if let Err(e) = app_mut.render() {
                        log::error!("❌ Error re-renderizando: {:?}", e);
                    }
                } else {
                    log::warn!("⚠️ [RERENDER] App no está inicializada");
                }
            }
        }
    });
}
