// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Stand, TransitionAction};
use crate::services::image_service::ImageHandle;
use crate::services::is_authenticated;
use crate::state::{AuthState, SelectionState, TransitionStatusCache};

/// Tipo de actualización del DOM
#[derive(Clone, Debug)]
pub enum UpdateType {
    /// Actualización incremental (solo elementos específicos)
    Incremental(IncrementalUpdate),
    /// Re-render completo (login/logout, cambio de iş merkezi)
    FullRender,
}

/// Tipo de actualización incremental específica
#[derive(Clone, Debug)]
pub enum IncrementalUpdate {
    /// Barra de información + botones de transacción (disabled/enabled)
    Header,
    /// Tabla de iş emirleri
    OperationsTable,
    /// Panel de imagen
    ImagePanel,
    /// Visibilidad del modal de Üretim Bitir
    EndProductionModal,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub selection: SelectionState,
    pub statuses: TransitionStatusCache,

    /// Directorio stand → iş merkezleri (inmutable entre fetches)
    pub workcenters: Rc<RefCell<Vec<Stand>>>,
    pub workcenters_loading: Rc<RefCell<bool>>,

    /// Flag global de transacción en vuelo: deshabilita TODOS los botones
    /// mientras haya una llamada pendiente (una sola a la vez)
    pub busy: Rc<RefCell<Option<TransitionAction>>>,

    /// Imagen mostrada en el panel. Paso de mensajes explícito: el panel se
    /// suscribe a este estado, no hay callback global en window.
    pub image: Rc<RefCell<Option<ImageHandle>>>,
    pub image_loading: Rc<RefCell<bool>>,

    // UI Visibility
    pub show_end_production: Rc<RefCell<bool>>,
    pub sidebar_collapsed: Rc<RefCell<bool>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear el estado hidratando selección, códigos y sesión persistidos
    pub fn new() -> Self {
        let auth = AuthState::new();
        if is_authenticated() {
            auth.set_logged_in(true);
        }

        Self {
            auth,
            selection: SelectionState::hydrate(),
            statuses: TransitionStatusCache::hydrate(),
            workcenters: Rc::new(RefCell::new(Vec::new())),
            workcenters_loading: Rc::new(RefCell::new(false)),
            busy: Rc::new(RefCell::new(None)),
            image: Rc::new(RefCell::new(None)),
            image_loading: Rc::new(RefCell::new(false)),
            show_end_production: Rc::new(RefCell::new(false)),
            sidebar_collapsed: Rc::new(RefCell::new(false)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Código de transacción de la fila activa (1 si no hay nada cacheado)
    pub fn current_transition_code(&self) -> i32 {
        match self.selection.selected_row() {
            Some(row) if !row.confirmation.is_empty() => self.statuses.get(&row.confirmation),
            _ => crate::models::DEFAULT_TRANSITION_CODE,
        }
    }

    /// Reemplazar la imagen mostrada liberando el object URL anterior
    pub fn set_image(&self, handle: Option<ImageHandle>) {
        if let Some(previous) = self.image.borrow_mut().take() {
            previous.revoke();
        }
        *self.image.borrow_mut() = handle;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::ImagePanel));
    }

    pub fn set_image_loading(&self, loading: bool) {
        *self.image_loading.borrow_mut() = loading;
    }

    /// Marcar una transacción en vuelo y refrescar los botones
    pub fn set_busy(&self, action: Option<TransitionAction>) {
        *self.busy.borrow_mut() = action;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Header));
    }

    pub fn is_busy(&self) -> bool {
        self.busy.borrow().is_some()
    }

    pub fn set_show_end_production(&self, show: bool) {
        *self.show_end_production.borrow_mut() = show;
        crate::rerender_app_with_type(UpdateType::Incremental(
            IncrementalUpdate::EndProductionModal,
        ));
    }

    pub fn toggle_sidebar(&self) {
        let collapsed = !*self.sidebar_collapsed.borrow();
        *self.sidebar_collapsed.borrow_mut() = collapsed;
        // Colapsar el sidebar nunca limpia selecciones
        crate::rerender_app();
    }

    /// Logout completo: cookie, estado de auth e imagen
    pub fn logout(&self) {
        crate::services::logout();
        self.auth.logout();
        self.set_image(None);
        *self.busy.borrow_mut() = None;
        *self.show_end_production.borrow_mut() = false;
        crate::rerender_app();
    }

    /// Suscribirse a cambios de estado crítico
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
