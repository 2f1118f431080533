// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra el gateway.
// Todas las requests autenticadas llevan el header `session-id` leído de la
// cookie; un 401 en cualquier endpoint borra la sesión y dispara el evento
// global `sessionExpired`.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use web_sys::AbortController;

use crate::models::{
    parse_operation_rows, transform_operations, transform_workcenters, OperationRow, RawStand,
    Stand, TransitionOutcome,
};
use crate::utils::{
    delete_cookie, get_cookie, BACKEND_URL, REQUEST_TIMEOUT_MS, SESSION_COOKIE,
};

/// Error de la capa de API. Se distingue transporte, fallo HTTP, fallo
/// explícito del backend (success:false) y respuesta con forma inesperada.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// No llegó respuesta (red caída, timeout de 10s, abort)
    #[error("Sunucuya ulaşılamıyor. İnternet bağlantınızı kontrol edin.")]
    Network,
    /// Respuesta HTTP con status de error
    #[error("{message}")]
    Status { status: u16, message: String },
    /// El backend respondió success:false; mensaje ya extraído
    #[error("{0}")]
    Backend(String),
    /// Ni éxito ni fallo reconocible en el envelope
    #[error("Beklenmeyen yanıt formatı!")]
    UnexpectedShape,
    /// El cuerpo no se pudo deserializar
    #[error("Yanıt çözümlenemedi: {0}")]
    Parse(String),
}

/// Cuerpo de `error` en el envelope del gateway
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Envelope estándar del gateway: { success, data, error?, message? }.
/// El backend devuelve `success` unas veces como boolean y otras como el
/// string "true"/"false"; la normalización tolerante vive aquí y no debe
/// "arreglarse" asumiendo un solo tipo.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: Value,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        match &self.success {
            Value::Bool(b) => *b,
            Value::String(s) => s == "true",
            _ => false,
        }
    }

    pub fn is_failure(&self) -> bool {
        match &self.success {
            Value::Bool(b) => !*b,
            Value::String(s) => s == "false",
            _ => false,
        }
    }

    /// Cadena de extracción del mensaje más específico disponible
    pub fn error_message(&self) -> String {
        if let Some(error) = &self.error {
            if let Some(message) = error.message.as_deref().filter(|m| !m.is_empty()) {
                return message.to_string();
            }
            if let Some(description) = error.description.as_deref().filter(|d| !d.is_empty()) {
                return description.to_string();
            }
        }
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return message.to_string();
        }
        "Bilinmeyen hata".to_string()
    }

    /// Normalizar el envelope: éxito → data, fallo → mensaje, resto → forma
    /// inesperada
    pub fn into_result(self) -> Result<Value, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else if self.is_failure() {
            Err(ApiError::Backend(self.error_message()))
        } else {
            Err(ApiError::UnexpectedShape)
        }
    }
}

/// Payload de los endpoints de transacción. Los campos opcionales solo se
/// serializan cuando el endpoint los requiere.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionPayload {
    #[serde(rename = "workcenterId")]
    pub workcenter_id: String,
    #[serde(rename = "PSCONFIRMATION")]
    pub confirmation: String,
    #[serde(rename = "POTYPE", skip_serializing_if = "Option::is_none")]
    pub po_type: Option<String>,
    #[serde(rename = "PRDORDER", skip_serializing_if = "Option::is_none")]
    pub prd_order: Option<String>,
    #[serde(rename = "OPERATION", skip_serializing_if = "Option::is_none")]
    pub operation: Option<i32>,
    #[serde(rename = "BOMLEVEL", skip_serializing_if = "Option::is_none")]
    pub bom_level: Option<i32>,
    #[serde(rename = "PDCOUTPUT", skip_serializing_if = "Option::is_none")]
    pub pdc_output: Option<u32>,
    #[serde(rename = "PDCSCRAP", skip_serializing_if = "Option::is_none")]
    pub pdc_scrap: Option<u32>,
}

impl TransitionPayload {
    /// /canias/start-production solo lleva workcenterId + PSCONFIRMATION
    pub fn start(workcenter_id: &str, row: &OperationRow) -> Self {
        Self {
            workcenter_id: workcenter_id.to_string(),
            confirmation: row.confirmation.clone(),
            po_type: None,
            prd_order: None,
            operation: None,
            bom_level: None,
            pdc_output: None,
            pdc_scrap: None,
        }
    }

    /// Forma común de start-failure / finish-failure
    pub fn failure(workcenter_id: &str, row: &OperationRow) -> Self {
        Self {
            po_type: Some(row.po_type.clone()),
            prd_order: Some(row.prd_order.clone()),
            operation: Some(parse_int_field(&row.operation)),
            bom_level: Some(parse_int_field(&row.bom_level)),
            ..Self::start(workcenter_id, row)
        }
    }

    /// end-production añade las cantidades introducidas por el operario
    pub fn end(workcenter_id: &str, row: &OperationRow, output: u32, scrap: u32) -> Self {
        Self {
            pdc_output: Some(output),
            pdc_scrap: Some(scrap),
            ..Self::failure(workcenter_id, row)
        }
    }

    /// quick-transactions fija PDCOUTPUT:1, PDCSCRAP:0
    pub fn quick(workcenter_id: &str, row: &OperationRow) -> Self {
        Self::end(workcenter_id, row, 1, 0)
    }
}

/// El ERP envía OPERATION/BOMLEVEL como string; los endpoints los esperan
/// como enteros
fn parse_int_field(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
        }
    }

    /// Listar stands e iş merkezleri
    pub async fn list_workcenters(&self) -> Result<Vec<Stand>, ApiError> {
        let url = format!("{}/canias/list-workcenters", self.base_url);
        log::info!("🏭 Cargando directorio de iş merkezleri...");

        let builder = authenticated(Request::get(&url));
        let envelope = send_for_envelope(builder, None::<&()>).await?;
        let data = envelope.into_result()?;

        let stands: Vec<RawStand> = serde_json::from_value(data)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let tree = transform_workcenters(stands);
        log::info!("✅ Directorio cargado: {} stands", tree.len());
        Ok(tree)
    }

    /// Listar iş emirleri de un iş merkezi.
    /// TBLRETURN ausente o vacío no es un error: lista vacía.
    pub async fn list_operations(&self, workcenter_id: &str) -> Result<Vec<OperationRow>, ApiError> {
        let url = format!("{}/canias/list-operations", self.base_url);
        log::info!("📡 Cargando operaciones de {}...", workcenter_id);

        let body = serde_json::json!({ "workcenterId": workcenter_id });
        let builder = authenticated(Request::post(&url));
        let envelope = send_for_envelope(builder, Some(&body)).await?;
        let data = envelope.into_result()?;

        let rows = transform_operations(parse_operation_rows(&data));
        log::info!("✅ {} operaciones para {}", rows.len(), workcenter_id);
        Ok(rows)
    }

    pub async fn start_production(
        &self,
        payload: &TransitionPayload,
    ) -> Result<TransitionOutcome, ApiError> {
        self.transition("/canias/start-production", payload).await
    }

    pub async fn end_production(
        &self,
        payload: &TransitionPayload,
    ) -> Result<TransitionOutcome, ApiError> {
        self.transition("/canias/end-production", payload).await
    }

    pub async fn start_failure(
        &self,
        payload: &TransitionPayload,
    ) -> Result<TransitionOutcome, ApiError> {
        self.transition("/canias/start-failure", payload).await
    }

    pub async fn finish_failure(
        &self,
        payload: &TransitionPayload,
    ) -> Result<TransitionOutcome, ApiError> {
        self.transition("/canias/finish-failure", payload).await
    }

    pub async fn quick_transactions(
        &self,
        payload: &TransitionPayload,
    ) -> Result<TransitionOutcome, ApiError> {
        self.transition("/canias/quick-transactions", payload).await
    }

    async fn transition(
        &self,
        endpoint: &str,
        payload: &TransitionPayload,
    ) -> Result<TransitionOutcome, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::info!("⚙️ {} → {}", endpoint, payload.confirmation);

        let builder = authenticated(Request::post(&url));
        let envelope = send_for_envelope(builder, Some(payload)).await?;
        let data = envelope.into_result()?;
        Ok(TransitionOutcome::from_data(&data))
    }

    /// Descargar el recurso binario de imagen para un número de malzeme
    pub async fn fetch_image(&self, image_name: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/canias/send-pdf-file2", self.base_url);
        log::info!("🖼️ Pidiendo imagen {}...", image_name);

        let body = serde_json::json!({ "imageName": image_name });
        let builder = authenticated(Request::post(&url));
        let response = send_raw(builder, Some(&body)).await?;

        if response.status() == 404 {
            return Err(ApiError::Status {
                status: 404,
                message: "Resim bulunamadı".to_string(),
            });
        }
        if !response.ok() {
            return Err(status_error(&response).await);
        }

        response
            .binary()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Adjuntar el header de sesión si hay cookie
fn authenticated(builder: RequestBuilder) -> RequestBuilder {
    match get_cookie(SESSION_COOKIE) {
        Some(session_id) => builder.header("session-id", &session_id),
        None => builder,
    }
}

/// Enviar la request con timeout fijo y manejo global de 401
async fn send_raw<T: Serialize>(
    builder: RequestBuilder,
    body: Option<&T>,
) -> Result<Response, ApiError> {
    // Timeout de 10s vía AbortController: un abort se reporta igual que un
    // fallo de red
    let controller = AbortController::new().ok();
    let builder = match &controller {
        Some(ctrl) => {
            let ctrl_clone = ctrl.clone();
            Timeout::new(REQUEST_TIMEOUT_MS, move || ctrl_clone.abort()).forget();
            builder.abort_signal(Some(&ctrl.signal()))
        }
        None => builder,
    };

    let response = match body {
        Some(json) => builder
            .json(json)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| {
        log::error!("❌ [API] Fallo de transporte: {}", e);
        ApiError::Network
    })?;

    if response.status() == 401 {
        handle_unauthorized();
        return Err(ApiError::Status {
            status: 401,
            message: "Oturum süresi doldu. Lütfen tekrar giriş yapın.".to_string(),
        });
    }

    Ok(response)
}

/// Enviar y parsear el envelope estándar
async fn send_for_envelope<T: Serialize>(
    builder: RequestBuilder,
    body: Option<&T>,
) -> Result<ApiEnvelope, ApiError> {
    let response = send_raw(builder, body).await?;

    if !response.ok() {
        return Err(status_error(&response).await);
    }

    response
        .json::<ApiEnvelope>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Construir el error de status intentando extraer el mensaje del cuerpo
async fn status_error(response: &Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<ApiEnvelope>().await {
        Ok(envelope) if envelope.error.is_some() || envelope.message.is_some() => {
            envelope.error_message()
        }
        _ => format!("Server hatası: {}", status),
    };
    ApiError::Status { status, message }
}

/// 401 en cualquier endpoint: borrar la sesión y avisar a la app para que
/// vuelva al login
fn handle_unauthorized() {
    log::warn!("🔒 [API] 401 recibido - cerrando sesión");
    delete_cookie(SESSION_COOKIE);
    if let Some(win) = web_sys::window() {
        if let Ok(event) = web_sys::Event::new("sessionExpired") {
            let _ = win.dispatch_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> ApiEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn success_como_string_y_como_bool() {
        assert!(envelope(json!({ "success": "true", "data": 1 })).is_success());
        assert!(envelope(json!({ "success": true, "data": 1 })).is_success());
        assert!(!envelope(json!({ "success": "false" })).is_success());
        assert!(!envelope(json!({ "success": false })).is_success());
        assert!(!envelope(json!({})).is_success());
    }

    #[test]
    fn failure_como_string_y_como_bool() {
        assert!(envelope(json!({ "success": false })).is_failure());
        assert!(envelope(json!({ "success": "false" })).is_failure());
        assert!(!envelope(json!({ "success": "true" })).is_failure());
        // success ausente o con tipo raro no es ni éxito ni fallo
        assert!(!envelope(json!({})).is_failure());
        assert!(!envelope(json!({ "success": 1 })).is_failure());
    }

    #[test]
    fn cadena_de_mensajes_de_error() {
        let e = envelope(json!({
            "success": false,
            "error": { "message": "Makine kilitli", "description": "desc" },
            "message": "outer"
        }));
        assert_eq!(e.error_message(), "Makine kilitli");

        let e = envelope(json!({
            "success": false,
            "error": { "description": "Operasyon kapalı" },
            "message": "outer"
        }));
        assert_eq!(e.error_message(), "Operasyon kapalı");

        let e = envelope(json!({ "success": false, "message": "outer" }));
        assert_eq!(e.error_message(), "outer");

        let e = envelope(json!({ "success": false }));
        assert_eq!(e.error_message(), "Bilinmeyen hata");
    }

    #[test]
    fn into_result_normaliza_las_tres_formas() {
        let ok = envelope(json!({ "success": "true", "data": 4 })).into_result();
        assert_eq!(ok, Ok(json!(4)));

        let fail = envelope(json!({ "success": false, "message": "hata" })).into_result();
        assert_eq!(fail, Err(ApiError::Backend("hata".to_string())));

        let weird = envelope(json!({ "status": "ok" })).into_result();
        assert_eq!(weird, Err(ApiError::UnexpectedShape));
    }

    #[test]
    fn payload_start_solo_lleva_los_campos_base() {
        let row = OperationRow {
            key: "C100".into(),
            prd_order: "P1".into(),
            confirmation: "C100".into(),
            material: "MAT123".into(),
            stext: String::new(),
            target_out: String::new(),
            target_start: String::new(),
            target_end: String::new(),
            status: crate::models::DisplayStatus::New,
            status3: "0".into(),
            status4: "0".into(),
            operation: "10".into(),
            bom_level: "0".into(),
            po_type: "1".into(),
            workcenter: "WC01".into(),
            confirm_pos: String::new(),
            open_date: String::new(),
        };

        let start = serde_json::to_value(TransitionPayload::start("WC01", &row)).unwrap();
        assert_eq!(start, json!({ "workcenterId": "WC01", "PSCONFIRMATION": "C100" }));

        let failure = serde_json::to_value(TransitionPayload::failure("WC01", &row)).unwrap();
        assert_eq!(failure["OPERATION"], json!(10));
        assert_eq!(failure["BOMLEVEL"], json!(0));
        assert_eq!(failure["PRDORDER"], json!("P1"));
        assert!(failure.get("PDCOUTPUT").is_none());

        let quick = serde_json::to_value(TransitionPayload::quick("WC01", &row)).unwrap();
        assert_eq!(quick["PDCOUTPUT"], json!(1));
        assert_eq!(quick["PDCSCRAP"], json!(0));

        let end = serde_json::to_value(TransitionPayload::end("WC01", &row, 25, 2)).unwrap();
        assert_eq!(end["PDCOUTPUT"], json!(25));
        assert_eq!(end["PDCSCRAP"], json!(2));
    }

    #[test]
    fn operation_no_numerica_cae_a_cero() {
        assert_eq!(parse_int_field("15"), 15);
        assert_eq!(parse_int_field(" 7 "), 7);
        assert_eq!(parse_int_field(""), 0);
        assert_eq!(parse_int_field("x"), 0);
    }
}
