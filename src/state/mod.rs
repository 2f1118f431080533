// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod auth_state;
pub mod selection_state;
pub mod transition_cache;

pub use app_state::*;
pub use auth_state::*;
pub use selection_state::*;
pub use transition_cache::*;
