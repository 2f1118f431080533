use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload de `data` en la respuesta de /auth/login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginData {
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
