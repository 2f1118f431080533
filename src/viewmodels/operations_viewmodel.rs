// ============================================================================
// OPERATIONS VIEWMODEL - Directorio de iş merkezleri y lista de iş emirleri
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::models::find_workcenter;
use crate::services::ApiClient;
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::viewmodels::ImageViewModel;
use crate::views::notification;

pub struct OperationsViewModel;

impl OperationsViewModel {
    /// Cargar el directorio stand → iş merkezleri al arrancar la sesión
    pub fn load_workcenters(state: &AppState) {
        *state.workcenters_loading.borrow_mut() = true;
        let state = state.clone();

        spawn_local(async move {
            let api = ApiClient::new();
            match api.list_workcenters().await {
                Ok(tree) => {
                    *state.workcenters.borrow_mut() = tree;
                    *state.workcenters_loading.borrow_mut() = false;

                    // Reconstruir el registro seleccionado persistido ahora
                    // que el directorio está disponible
                    let saved_value = state.selection.selected_value.borrow().clone();
                    if let Some(value) = saved_value {
                        let found = find_workcenter(&state.workcenters.borrow(), &value).cloned();
                        match found {
                            Some(record) => {
                                log::info!("✅ İş merkezi restaurado desde storage: {}", record.name);
                                *state.selection.selected_record.borrow_mut() = Some(record);
                            }
                            None => {
                                // El directorio cambió: la selección guardada ya no existe
                                log::warn!("⚠️ İş merkezi persistido ya no existe: {}", value);
                                state.selection.clear_all();
                            }
                        }
                    }

                    notification::success("İş merkezi verileri başarıyla yüklendi");
                    crate::rerender_app();
                }
                Err(e) => {
                    log::error!("❌ İş merkezi verileri yüklenirken hata: {}", e);
                    *state.workcenters.borrow_mut() = Vec::new();
                    *state.workcenters_loading.borrow_mut() = false;
                    notification::error("İş merkezi verileri yüklenirken bir hata oluştu");
                    crate::rerender_app();
                }
            }
        });
    }

    /// Cambio en el selector del directorio. Un value vacío limpia todo.
    pub fn select_workcenter(state: &AppState, value: &str) {
        if value.is_empty() {
            state.selection.clear_all();
            notification::info("Seçim temizlendi");
            crate::rerender_app();
            return;
        }

        let record = find_workcenter(&state.workcenters.borrow(), value).cloned();
        let Some(record) = record else {
            log::warn!("⚠️ Value de selector desconocido: {}", value);
            return;
        };

        let previous_id = state.selection.selected_workcenter_id.borrow().clone();
        if previous_id.as_deref() != Some(record.name.as_str()) {
            // İş merkezi distinto: desalojar los códigos cacheados de las
            // operaciones anteriores y limpiar selección y lista persistidas
            let previous_confirmations = state.selection.current_confirmations();
            state.statuses.evict(&previous_confirmations);
            state.selection.clear_row_selection();
            state.selection.clear_operations();
        }

        notification::info(&format!("{} iş merkezi seçildi", record.name));
        let workcenter_id = record.name.clone();
        state.selection.set_workcenter(value, record);
        crate::rerender_app();

        Self::fetch_operations(state, &workcenter_id);
    }

    /// Pedir la lista de iş emirleri de un iş merkezi. También se usa para el
    /// refresh diferido tras cada transacción.
    pub fn fetch_operations(state: &AppState, workcenter_id: &str) {
        log::info!("🔄 fetch_operations: {}", workcenter_id);
        *state.selection.operations_loading.borrow_mut() = true;
        *state.selection.operations_fetched.borrow_mut() = true;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::OperationsTable));

        let state = state.clone();
        let workcenter_id = workcenter_id.to_string();

        spawn_local(async move {
            let api = ApiClient::new();
            match api.list_operations(&workcenter_id).await {
                Ok(rows) => {
                    if rows.is_empty() {
                        notification::info(&format!(
                            "{} için operasyon bulunamadı",
                            workcenter_id
                        ));
                    } else {
                        notification::success(&format!(
                            "{} için {} iş emri yüklendi",
                            workcenter_id,
                            rows.len()
                        ));
                    }
                    state.selection.set_operations(rows);
                }
                Err(e) => {
                    log::error!("❌ Operasyonlar yüklenirken hata: {}", e);
                    notification::error("Operasyonlar yüklenirken bir hata oluştu");
                    state.selection.set_operations(Vec::new());
                }
            }
            *state.selection.operations_loading.borrow_mut() = false;
            crate::rerender_app_with_type(UpdateType::Incremental(
                IncrementalUpdate::OperationsTable,
            ));
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
        });
    }

    /// Marcar/desmarcar una fila de la tabla (multi-select por checkbox)
    pub fn toggle_row(state: &AppState, key: &str, checked: bool) {
        let mut keys = state.selection.selected_row_keys.borrow().clone();
        let mut records = state.selection.selected_records.borrow().clone();

        if checked {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
            records.retain(|r| r.key != key);
            if let Some(row) = state
                .selection
                .operations
                .borrow()
                .iter()
                .find(|op| op.key == key)
            {
                records.push(row.clone());
            }
        } else {
            keys.retain(|k| k != key);
            records.retain(|r| r.key != key);
        }

        let count = keys.len();
        state.selection.set_row_selection(keys, records);

        if count > 0 {
            notification::info(&format!("{} iş emri seçildi", count));
        } else {
            notification::info("iş emri seçimi kaldırıldı");
        }

        // La última fila marcada con malzeme dispara la búsqueda automática
        // de imagen (gana la selección más reciente)
        if checked {
            let material = state
                .selection
                .selected_records
                .borrow()
                .last()
                .map(|row| row.material.clone())
                .unwrap_or_default();
            if !material.is_empty() {
                ImageViewModel::lookup(state, &material);
            }
        }

        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::OperationsTable));
    }
}
