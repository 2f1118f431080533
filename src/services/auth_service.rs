// ============================================================================
// AUTH SERVICE - Login / logout contra /auth/login
// ============================================================================
// El login NO pasa por el interceptor de 401 del ApiClient: unas credenciales
// malas devuelven 401 y eso es un error del formulario, no una sesión
// caducada.
// ============================================================================

use gloo_net::http::Request;

use crate::models::{LoginData, LoginRequest};
use crate::services::api_client::{ApiEnvelope, ApiError};
use crate::utils::{
    delete_cookie, get_cookie, set_cookie, BACKEND_URL, SESSION_COOKIE,
    SESSION_COOKIE_MAX_AGE_SECS,
};

/// Intercambiar credenciales por un identificador de sesión.
/// En éxito persiste la cookie `sessionId` (30 días, Path=/, SameSite=Strict)
/// y devuelve el payload crudo; cualquier error se propaga al caller sin
/// reintentos.
pub async fn login(username: &str, password: &str) -> Result<LoginData, ApiError> {
    let url = format!("{}/auth/login", BACKEND_URL);
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    log::info!("🔐 Login de {}...", username);

    let response = Request::post(&url)
        .json(&request)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| {
            log::error!("❌ [AUTH] Fallo de transporte en login: {}", e);
            ApiError::Network
        })?;

    if !response.ok() {
        let status = response.status();
        let message = match response.json::<ApiEnvelope>().await {
            Ok(envelope) => envelope.error_message(),
            Err(_) => format!("Server hatası: {}", status),
        };
        return Err(ApiError::Status { status, message });
    }

    let envelope = response
        .json::<ApiEnvelope>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    let data = envelope.into_result()?;
    let login_data: LoginData =
        serde_json::from_value(data).map_err(|e| ApiError::Parse(e.to_string()))?;

    match &login_data.session_id {
        Some(session_id) => {
            set_cookie(SESSION_COOKIE, session_id, SESSION_COOKIE_MAX_AGE_SECS);
            log::info!("✅ [AUTH] Sesión persistida");
        }
        None => {
            log::warn!("⚠️ [AUTH] Login exitoso pero sin sessionId en la respuesta");
        }
    }

    Ok(login_data)
}

/// Borrar el identificador de sesión persistido
pub fn logout() {
    delete_cookie(SESSION_COOKIE);
    log::info!("👋 [AUTH] Sesión eliminada");
}

/// Hay sesión si y solo si la cookie existe
pub fn is_authenticated() -> bool {
    get_cookie(SESSION_COOKIE).is_some()
}
