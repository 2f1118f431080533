// ============================================================================
// TRANSITION VIEWMODEL - Las cinco transacciones de producción
// ============================================================================
// Validación → request → cache de código → refresh diferido. Solo una
// transacción en vuelo a la vez (flag global busy); los fallos no tocan el
// cache de códigos.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use crate::models::{OperationRow, TransitionAction, TransitionOutcome};
use crate::services::{ApiClient, TransitionPayload};
use crate::state::AppState;
use crate::utils::REFRESH_DELAY_MS;
use crate::viewmodels::OperationsViewModel;
use crate::views::notification;

pub struct TransitionViewModel;

impl TransitionViewModel {
    /// Entrada desde los botones del panel. Üretim Bitir primero pide las
    /// cantidades en el modal; el resto dispara directamente.
    pub fn trigger(state: &AppState, action: TransitionAction) {
        if state.is_busy() {
            return;
        }
        let Some((workcenter_id, row)) = Self::validated_selection(state) else {
            return;
        };

        match action {
            TransitionAction::FinishProduction => {
                state.set_show_end_production(true);
            }
            _ => Self::execute(state, action, workcenter_id, row, None),
        }
    }

    /// Submit del modal de Üretim Bitir con las cantidades del operario
    pub fn submit_end_production(state: &AppState, output: u32, scrap: u32) {
        if state.is_busy() {
            return;
        }
        let Some((workcenter_id, row)) = Self::validated_selection(state) else {
            return;
        };
        Self::execute(
            state,
            TransitionAction::FinishProduction,
            workcenter_id,
            row,
            Some((output, scrap)),
        );
    }

    /// Toda transacción requiere iş merkezi seleccionado y una fila con
    /// confirmation; si falta algo se avisa y NO se envía nada a la red
    fn validated_selection(state: &AppState) -> Option<(String, OperationRow)> {
        let workcenter_id = state.selection.selected_workcenter_id.borrow().clone();
        let Some(workcenter_id) = workcenter_id.filter(|id| !id.is_empty()) else {
            notification::warning("Lütfen önce bir iş merkezi seçin!");
            return None;
        };

        let row = state.selection.selected_row();
        let Some(row) = row.filter(|r| !r.confirmation.is_empty()) else {
            notification::warning("Lütfen önce İş Emirleri tablosundan bir satır seçin!");
            return None;
        };

        Some((workcenter_id, row))
    }

    fn execute(
        state: &AppState,
        action: TransitionAction,
        workcenter_id: String,
        row: OperationRow,
        quantities: Option<(u32, u32)>,
    ) {
        state.set_busy(Some(action));
        let state = state.clone();

        spawn_local(async move {
            let api = ApiClient::new();
            let payload = match (action, quantities) {
                (TransitionAction::StartProduction, _) => {
                    TransitionPayload::start(&workcenter_id, &row)
                }
                (TransitionAction::FinishProduction, Some((output, scrap))) => {
                    TransitionPayload::end(&workcenter_id, &row, output, scrap)
                }
                (TransitionAction::FinishProduction, None) => {
                    // No debería llegar sin cantidades; abortar sin request
                    log::error!("❌ Üretim Bitir sin cantidades");
                    state.set_busy(None);
                    return;
                }
                (TransitionAction::StartDowntime, _) | (TransitionAction::FinishDowntime, _) => {
                    TransitionPayload::failure(&workcenter_id, &row)
                }
                (TransitionAction::QuickTransaction, _) => {
                    TransitionPayload::quick(&workcenter_id, &row)
                }
            };

            log::info!("⚙️ {} → {:?}", action.label(), payload.confirmation);

            let result = match action {
                TransitionAction::StartProduction => api.start_production(&payload).await,
                TransitionAction::FinishProduction => api.end_production(&payload).await,
                TransitionAction::StartDowntime => api.start_failure(&payload).await,
                TransitionAction::FinishDowntime => api.finish_failure(&payload).await,
                TransitionAction::QuickTransaction => api.quick_transactions(&payload).await,
            };

            match result {
                Ok(outcome) => {
                    Self::apply_outcome(&state, action, &workcenter_id, &row, outcome);
                }
                Err(e) => {
                    log::error!("🔴 {} FAILED: {}", action.label(), e);
                    notification::error(&format!("{}: {}", failure_prefix(action), e));
                    // Fallo: el cache queda intacto y no hay refresh
                    state.set_busy(None);
                }
            }
        });
    }

    fn apply_outcome(
        state: &AppState,
        action: TransitionAction,
        workcenter_id: &str,
        row: &OperationRow,
        outcome: TransitionOutcome,
    ) {
        match outcome {
            TransitionOutcome::Status(code) => {
                log::info!("🟢 {} OK - nuevo status: {}", action.label(), code);
                state.statuses.set(&row.confirmation, code);
                notification::success(&format!(
                    "{}\nİş Merkezi: {}\nOnay No: {}\nYeni Status: {}",
                    success_message(action),
                    workcenter_id,
                    row.confirmation,
                    code
                ));
            }
            TransitionOutcome::Message(message) => {
                // Başlat Bitir puede responder con un mensaje en vez del
                // código; tras el ciclo completo el status vuelve a 1
                log::info!("🟢 {} OK - mensaje: {}", action.label(), message);
                state.statuses.set(&row.confirmation, 1);
                notification::success(&format!(
                    "{}\nİş Merkezi: {}\nOnay No: {}\nMesaj: {}",
                    success_message(action),
                    workcenter_id,
                    row.confirmation,
                    message
                ));
            }
            TransitionOutcome::Unspecified => {
                if action == TransitionAction::QuickTransaction {
                    state.statuses.set(&row.confirmation, 1);
                    notification::success(success_message(action));
                } else {
                    // Éxito sin código interpretable: no tocar el cache
                    log::warn!("⚠️ {} OK pero sin código en data", action.label());
                    notification::success(success_message(action));
                }
            }
        }

        if action == TransitionAction::FinishProduction {
            state.set_show_end_production(false);
        }
        state.set_busy(None);

        // Refresh diferido: darle 1 segundo al backend para asentar estado
        log::info!("⏰ Refresh de iş emirleri en {} ms...", REFRESH_DELAY_MS);
        let state = state.clone();
        let workcenter_id = workcenter_id.to_string();
        Timeout::new(REFRESH_DELAY_MS, move || {
            OperationsViewModel::fetch_operations(&state, &workcenter_id);
        })
        .forget();
    }
}

fn success_message(action: TransitionAction) -> &'static str {
    match action {
        TransitionAction::StartProduction => "Üretim başarıyla başlatıldı!",
        TransitionAction::FinishProduction => "Üretim başarıyla bitirildi!",
        TransitionAction::StartDowntime => "Duruş başarıyla başlatıldı!",
        TransitionAction::FinishDowntime => "Duruş başarıyla bitirildi!",
        TransitionAction::QuickTransaction => "Başlat Bitir işlemi başarıyla tamamlandı!",
    }
}

fn failure_prefix(action: TransitionAction) -> &'static str {
    match action {
        TransitionAction::StartProduction => "Üretim başlatılamadı",
        TransitionAction::FinishProduction => "Üretim bitirilemedi",
        TransitionAction::StartDowntime => "Duruş başlatılamadı",
        TransitionAction::FinishDowntime => "Duruş bitirilemedi",
        TransitionAction::QuickTransaction => "Başlat Bitir işlemi başarısız",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mensajes_por_accion() {
        assert_eq!(success_message(TransitionAction::StartProduction), "Üretim başarıyla başlatıldı!");
        assert_eq!(failure_prefix(TransitionAction::QuickTransaction), "Başlat Bitir işlemi başarısız");
        assert_eq!(failure_prefix(TransitionAction::StartDowntime), "Duruş başlatılamadı");
    }
}
