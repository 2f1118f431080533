/// URL base del gateway HTTP
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://192.168.1.202:5000/api (por defecto)
/// - Producción: via BACKEND_URL env var (ver build.rs)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://192.168.1.202:5000/api",
};

/// Timeout fijo para todas las requests HTTP (milisegundos)
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Delay antes de refrescar la lista de operaciones después de una
/// transacción exitosa. El backend necesita este tiempo para asentar
/// el estado, no es un retry.
pub const REFRESH_DELAY_MS: u32 = 1_000;

// Claves de persistencia en localStorage
pub const KEY_SELECTED_WORKCENTER: &str = "selectedWorkcenter";
pub const KEY_SELECTED_WORKCENTER_ID: &str = "selectedWorkcenterId";
pub const KEY_OPERATIONS_DATA: &str = "operationsData";
pub const KEY_SELECTED_RECORDS: &str = "selectedRecords";
pub const KEY_SELECTED_ROW_KEYS: &str = "selectedRowKeys";
pub const KEY_WORK_ORDER_STATUSES: &str = "workOrderStatuses";

/// Cookie de sesión
pub const SESSION_COOKIE: &str = "sessionId";

/// Vigencia de la cookie de sesión: 30 días
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;
