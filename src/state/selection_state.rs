// ============================================================================
// SELECTION STATE - Iş merkezi y filas seleccionadas + persistencia
// ============================================================================
// Invariante: como mucho un iş merkezi seleccionado; al cambiarlo se limpia
// la selección de iş emirleri. Cada cambio se espeja en localStorage y se
// restaura en el arranque.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{OperationRow, OperationsCache, WorkCenter};
use crate::utils::{
    load_from_storage, remove_from_storage, save_to_storage, KEY_OPERATIONS_DATA,
    KEY_SELECTED_RECORDS, KEY_SELECTED_ROW_KEYS, KEY_SELECTED_WORKCENTER,
    KEY_SELECTED_WORKCENTER_ID,
};

#[derive(Clone)]
pub struct SelectionState {
    /// Value del selector ("WORKCENTER-COMPANY-PLANT")
    pub selected_value: Rc<RefCell<Option<String>>>,
    /// Código del iş merkezi (lo que viaja como workcenterId)
    pub selected_workcenter_id: Rc<RefCell<Option<String>>>,
    /// Registro completo para la barra de información
    pub selected_record: Rc<RefCell<Option<WorkCenter>>>,
    /// Última lista de operaciones recibida
    pub operations: Rc<RefCell<Vec<OperationRow>>>,
    /// Distingue "lista vacía tras fetch" de "aún sin fetch"
    pub operations_fetched: Rc<RefCell<bool>>,
    pub operations_loading: Rc<RefCell<bool>>,
    /// Keys de las filas marcadas con checkbox
    pub selected_row_keys: Rc<RefCell<Vec<String>>>,
    /// Registros de las filas marcadas, en orden de selección
    pub selected_records: Rc<RefCell<Vec<OperationRow>>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            selected_value: Rc::new(RefCell::new(None)),
            selected_workcenter_id: Rc::new(RefCell::new(None)),
            selected_record: Rc::new(RefCell::new(None)),
            operations: Rc::new(RefCell::new(Vec::new())),
            operations_fetched: Rc::new(RefCell::new(false)),
            operations_loading: Rc::new(RefCell::new(false)),
            selected_row_keys: Rc::new(RefCell::new(Vec::new())),
            selected_records: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Restaurar la selección persistida. Los fallos de lectura caen en
    /// silencio al estado vacío.
    pub fn hydrate() -> Self {
        let state = Self::new();

        if let Some(value) = load_from_storage::<String>(KEY_SELECTED_WORKCENTER) {
            *state.selected_value.borrow_mut() = Some(value);
        }
        if let Some(id) = load_from_storage::<String>(KEY_SELECTED_WORKCENTER_ID) {
            *state.selected_workcenter_id.borrow_mut() = Some(id);
        }
        if let Some(cache) = load_from_storage::<OperationsCache>(KEY_OPERATIONS_DATA) {
            log::info!(
                "💾 [SELECTION] {} operaciones restauradas (guardadas {})",
                cache.operations.len(),
                cache.saved_at
            );
            *state.operations.borrow_mut() = cache.operations;
            *state.operations_fetched.borrow_mut() = true;
        }
        if let Some(records) = load_from_storage::<Vec<OperationRow>>(KEY_SELECTED_RECORDS) {
            *state.selected_records.borrow_mut() = records;
        }
        if let Some(keys) = load_from_storage::<Vec<String>>(KEY_SELECTED_ROW_KEYS) {
            *state.selected_row_keys.borrow_mut() = keys;
        }

        state
    }

    /// Fila activa para el panel de transacciones: el primer registro
    /// seleccionado cuya key sigue marcada
    pub fn selected_row(&self) -> Option<OperationRow> {
        let keys = self.selected_row_keys.borrow();
        self.selected_records
            .borrow()
            .iter()
            .find(|record| keys.contains(&record.key))
            .cloned()
    }

    /// Confirmations de la lista de operaciones actual (para desalojar el
    /// cache de códigos al cambiar de iş merkezi)
    pub fn current_confirmations(&self) -> Vec<String> {
        self.operations
            .borrow()
            .iter()
            .filter(|op| !op.confirmation.is_empty())
            .map(|op| op.confirmation.clone())
            .collect()
    }

    /// Fijar el iş merkezi seleccionado y persistirlo
    pub fn set_workcenter(&self, value: &str, record: WorkCenter) {
        *self.selected_value.borrow_mut() = Some(value.to_string());
        *self.selected_workcenter_id.borrow_mut() = Some(record.name.clone());
        *self.selected_record.borrow_mut() = Some(record.clone());

        persist(KEY_SELECTED_WORKCENTER, &value.to_string());
        persist(KEY_SELECTED_WORKCENTER_ID, &record.name);
    }

    /// Limpiar la selección de filas (al cambiar de iş merkezi)
    pub fn clear_row_selection(&self) {
        self.selected_row_keys.borrow_mut().clear();
        self.selected_records.borrow_mut().clear();
        let _ = remove_from_storage(KEY_SELECTED_ROW_KEYS);
        let _ = remove_from_storage(KEY_SELECTED_RECORDS);
    }

    /// Guardar la selección de filas y espejarla en storage
    pub fn set_row_selection(&self, keys: Vec<String>, records: Vec<OperationRow>) {
        persist(KEY_SELECTED_ROW_KEYS, &keys);
        persist(KEY_SELECTED_RECORDS, &records);
        *self.selected_row_keys.borrow_mut() = keys;
        *self.selected_records.borrow_mut() = records;
    }

    /// Vaciar la lista de operaciones persistida (al cambiar de iş merkezi,
    /// antes de que llegue la lista nueva)
    pub fn clear_operations(&self) {
        self.operations.borrow_mut().clear();
        *self.operations_fetched.borrow_mut() = false;
        let _ = remove_from_storage(KEY_OPERATIONS_DATA);
    }

    /// Reemplazar la lista de operaciones y persistirla con timestamp
    pub fn set_operations(&self, operations: Vec<OperationRow>) {
        persist(KEY_OPERATIONS_DATA, &OperationsCache::new(operations.clone()));
        *self.operations.borrow_mut() = operations;
        *self.operations_fetched.borrow_mut() = true;
    }

    /// Limpiar todo (el operario vació el selector)
    pub fn clear_all(&self) {
        *self.selected_value.borrow_mut() = None;
        *self.selected_workcenter_id.borrow_mut() = None;
        *self.selected_record.borrow_mut() = None;
        self.operations.borrow_mut().clear();
        *self.operations_fetched.borrow_mut() = false;
        self.selected_row_keys.borrow_mut().clear();
        self.selected_records.borrow_mut().clear();

        let _ = remove_from_storage(KEY_SELECTED_WORKCENTER);
        let _ = remove_from_storage(KEY_SELECTED_WORKCENTER_ID);
        let _ = remove_from_storage(KEY_OPERATIONS_DATA);
        let _ = remove_from_storage(KEY_SELECTED_RECORDS);
        let _ = remove_from_storage(KEY_SELECTED_ROW_KEYS);
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

fn persist<T: serde::Serialize>(key: &str, value: &T) {
    if let Err(e) = save_to_storage(key, value) {
        log::error!("❌ [SELECTION] Error persistiendo {}: {}", key, e);
    }
}
