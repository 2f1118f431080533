// ============================================================================
// TRANSITION - Máquina de estados de las transacciones de producción
// ============================================================================
// El código de transacción lo asigna el backend después de cada llamada y se
// cachea por confirmation. NO se deriva de STATUS3/STATUS4 y puede discrepar
// del estado mostrado en la tabla; la habilitación de botones usa solo este
// código.
// ============================================================================

use serde_json::Value;

/// Código por defecto cuando una confirmation no tiene código cacheado
pub const DEFAULT_TRANSITION_CODE: i32 = 1;

/// Las cinco acciones del panel de transacciones
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionAction {
    StartProduction,
    FinishProduction,
    StartDowntime,
    FinishDowntime,
    QuickTransaction,
}

impl TransitionAction {
    pub fn label(&self) -> &'static str {
        match self {
            TransitionAction::StartProduction => "Üretim Başlat",
            TransitionAction::FinishProduction => "Üretim Bitir",
            TransitionAction::StartDowntime => "Duruş Başlat",
            TransitionAction::FinishDowntime => "Duruş Bitir",
            TransitionAction::QuickTransaction => "Başlat Bitir",
        }
    }
}

/// Acciones habilitadas para un código de transacción
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct EnabledActions {
    pub start_production: bool,
    pub finish_production: bool,
    pub start_downtime: bool,
    pub finish_downtime: bool,
    pub quick_transaction: bool,
}

impl EnabledActions {
    pub fn allows(&self, action: TransitionAction) -> bool {
        match action {
            TransitionAction::StartProduction => self.start_production,
            TransitionAction::FinishProduction => self.finish_production,
            TransitionAction::StartDowntime => self.start_downtime,
            TransitionAction::FinishDowntime => self.finish_downtime,
            TransitionAction::QuickTransaction => self.quick_transaction,
        }
    }
}

/// Tabla fija código → acciones habilitadas
pub fn enabled_actions(code: i32) -> EnabledActions {
    let mut actions = EnabledActions::default();
    match code {
        1 | 9 | 10 => {
            actions.start_production = true;
            actions.quick_transaction = true;
        }
        2 => {
            actions.start_downtime = true;
        }
        3 => {
            actions.finish_downtime = true;
        }
        4 => {
            actions.finish_production = true;
            actions.start_downtime = true;
        }
        5 => {
            actions.finish_downtime = true;
        }
        _ => {}
    }
    actions
}

/// Resultado de una transacción exitosa. El backend normalmente devuelve el
/// nuevo código en `data` como número (a veces string numérico); el endpoint
/// de Başlat Bitir puede devolver en su lugar un objeto con `message`.
#[derive(Clone, PartialEq, Debug)]
pub enum TransitionOutcome {
    Status(i32),
    Message(String),
    Unspecified,
}

impl TransitionOutcome {
    pub fn from_data(data: &Value) -> Self {
        if let Some(code) = status_code_from_data(data) {
            return TransitionOutcome::Status(code);
        }
        if let Some(message) = data.get("message").and_then(Value::as_str) {
            return TransitionOutcome::Message(message.to_string());
        }
        TransitionOutcome::Unspecified
    }
}

/// Interpretar `data` como código de estado (número o string numérico)
pub fn status_code_from_data(data: &Value) -> Option<i32> {
    match data {
        Value::Number(n) => n.as_i64().map(|v| v as i32),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tabla_de_habilitacion_completa() {
        for code in [1, 9, 10] {
            let a = enabled_actions(code);
            assert!(a.start_production && a.quick_transaction, "code {}", code);
            assert!(!a.finish_production && !a.start_downtime && !a.finish_downtime);
        }

        let a = enabled_actions(2);
        assert_eq!(
            a,
            EnabledActions { start_downtime: true, ..Default::default() }
        );

        let a = enabled_actions(3);
        assert_eq!(
            a,
            EnabledActions { finish_downtime: true, ..Default::default() }
        );

        let a = enabled_actions(4);
        assert!(a.finish_production && a.start_downtime);
        assert!(!a.start_production && !a.finish_downtime && !a.quick_transaction);

        let a = enabled_actions(5);
        assert_eq!(
            a,
            EnabledActions { finish_downtime: true, ..Default::default() }
        );
    }

    #[test]
    fn codigos_no_listados_no_habilitan_nada() {
        for code in [0, 6, 7, 8, 11, -1, 99] {
            assert_eq!(enabled_actions(code), EnabledActions::default(), "code {}", code);
        }
    }

    #[test]
    fn allows_refleja_los_flags() {
        let a = enabled_actions(4);
        assert!(a.allows(TransitionAction::FinishProduction));
        assert!(a.allows(TransitionAction::StartDowntime));
        assert!(!a.allows(TransitionAction::QuickTransaction));
    }

    #[test]
    fn outcome_desde_numero_y_string() {
        assert_eq!(TransitionOutcome::from_data(&json!(4)), TransitionOutcome::Status(4));
        assert_eq!(TransitionOutcome::from_data(&json!("2")), TransitionOutcome::Status(2));
    }

    #[test]
    fn outcome_desde_objeto_con_mensaje() {
        let data = json!({ "message": "İşlem tamamlandı" });
        assert_eq!(
            TransitionOutcome::from_data(&data),
            TransitionOutcome::Message("İşlem tamamlandı".to_string())
        );
    }

    #[test]
    fn outcome_inesperado() {
        assert_eq!(TransitionOutcome::from_data(&json!(null)), TransitionOutcome::Unspecified);
        assert_eq!(TransitionOutcome::from_data(&json!({ "x": 1 })), TransitionOutcome::Unspecified);
    }

    #[test]
    fn codigo_de_estado_tolerante() {
        assert_eq!(status_code_from_data(&json!(10)), Some(10));
        assert_eq!(status_code_from_data(&json!(" 3 ")), Some(3));
        assert_eq!(status_code_from_data(&json!("abc")), None);
        assert_eq!(status_code_from_data(&json!([])), None);
    }
}
