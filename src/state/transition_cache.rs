// ============================================================================
// TRANSITION CACHE - Store confirmation → código de transacción
// ============================================================================
// Cache cliente de los códigos que devuelven los endpoints de producción,
// persistido en localStorage bajo `workOrderStatuses`. Se desaloja al cambiar
// de iş merkezi; una confirmation desconocida vale 1.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::DEFAULT_TRANSITION_CODE;
use crate::utils::{load_from_storage, save_to_storage, KEY_WORK_ORDER_STATUSES};

/// Store explícito confirmation → último código conocido
#[derive(Clone)]
pub struct TransitionStatusCache {
    codes: Rc<RefCell<HashMap<String, i32>>>,
}

impl TransitionStatusCache {
    pub fn new() -> Self {
        Self {
            codes: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Hidratar desde localStorage; datos corruptos o ausentes → vacío
    pub fn hydrate() -> Self {
        let codes: HashMap<String, i32> =
            load_from_storage(KEY_WORK_ORDER_STATUSES).unwrap_or_default();
        if !codes.is_empty() {
            log::info!("💾 [CACHE] {} códigos de transacción restaurados", codes.len());
        }
        Self {
            codes: Rc::new(RefCell::new(codes)),
        }
    }

    /// Código cacheado de una confirmation (1 si no hay)
    pub fn get(&self, confirmation: &str) -> i32 {
        self.codes
            .borrow()
            .get(confirmation)
            .copied()
            .unwrap_or(DEFAULT_TRANSITION_CODE)
    }

    /// Guardar el código devuelto por el backend para una confirmation
    pub fn set(&self, confirmation: &str, code: i32) {
        merge_status(&mut self.codes.borrow_mut(), confirmation, code);
        self.persist();
    }

    /// Desalojar las confirmations del iş merkezi anterior
    pub fn evict(&self, confirmations: &[String]) {
        if confirmations.is_empty() {
            return;
        }
        evict_statuses(&mut self.codes.borrow_mut(), confirmations);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = save_to_storage(KEY_WORK_ORDER_STATUSES, &*self.codes.borrow()) {
            log::error!("❌ [CACHE] Error persistiendo códigos: {}", e);
        }
    }
}

impl Default for TransitionStatusCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Actualizar el código de una confirmation dejando el resto intacto
pub fn merge_status(codes: &mut HashMap<String, i32>, confirmation: &str, code: i32) {
    codes.insert(confirmation.to_string(), code);
}

/// Eliminar un conjunto de confirmations del mapa
pub fn evict_statuses(codes: &mut HashMap<String, i32>, confirmations: &[String]) {
    for confirmation in confirmations {
        codes.remove(confirmation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_actualiza_solo_la_confirmation_objetivo() {
        let mut codes = HashMap::new();
        merge_status(&mut codes, "C100", 2);
        merge_status(&mut codes, "C200", 4);
        merge_status(&mut codes, "C100", 3);

        assert_eq!(codes.get("C100"), Some(&3));
        assert_eq!(codes.get("C200"), Some(&4));
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn evict_elimina_solo_las_confirmations_dadas() {
        let mut codes = HashMap::new();
        merge_status(&mut codes, "C100", 2);
        merge_status(&mut codes, "C200", 4);
        merge_status(&mut codes, "C300", 5);

        evict_statuses(
            &mut codes,
            &["C100".to_string(), "C300".to_string(), "C999".to_string()],
        );

        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get("C200"), Some(&4));
    }
}
