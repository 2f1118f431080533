// ============================================================================
// HEADER - Barra de información del iş merkezi + panel de transacciones
// ============================================================================
// La habilitación de cada botón sale SOLO del código de transacción cacheado
// de la fila activa (default 1), nunca del estado mostrado en la tabla; ambos
// modelos pueden discrepar y eso es comportamiento del ERP.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, set_disabled, ElementBuilder};
use crate::models::{enabled_actions, TransitionAction};
use crate::state::AppState;
use crate::viewmodels::TransitionViewModel;

/// Barra superior: toggle del sidebar, botones de transacción y logout
pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?
        .class("app-header")
        .build();

    let toggle_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-toggle-sidebar")
        .text("☰")
        .build();
    {
        let state = state.clone();
        on_click(&toggle_btn, move |_| {
            state.toggle_sidebar();
        })?;
    }
    append_child(&header, &toggle_btn)?;

    let actions = render_actions(state)?;
    append_child(&header, &actions)?;

    let spacer = ElementBuilder::new("div")?
        .class("header-spacer")
        .build();
    append_child(&header, &spacer)?;

    if let Some(username) = state.auth.get_username() {
        let user = ElementBuilder::new("span")?
            .class("header-username")
            .text(&username)
            .build();
        append_child(&header, &user)?;
    }

    let logout_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-logout")
        .text("⎋ Çıkış Yap")
        .build();
    {
        let state = state.clone();
        on_click(&logout_btn, move |_| {
            log::info!("👋 Logout iniciado");
            state.logout();
        })?;
    }
    append_child(&header, &logout_btn)?;

    Ok(header)
}

/// Los cinco botones del panel de transacciones
pub fn render_actions(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .id("header-actions")?
        .class("header-actions")
        .build();

    let has_workcenter = state
        .selection
        .selected_workcenter_id
        .borrow()
        .as_deref()
        .is_some_and(|id| !id.is_empty());
    let selected_row = state.selection.selected_row();
    let has_row = selected_row
        .as_ref()
        .is_some_and(|row| !row.confirmation.is_empty());

    let code = state.current_transition_code();
    let enabled = enabled_actions(code);
    let busy = state.is_busy();

    let buttons = [
        (TransitionAction::StartProduction, "btn-start-production"),
        (TransitionAction::FinishProduction, "btn-finish-production"),
        (TransitionAction::StartDowntime, "btn-start-downtime"),
        (TransitionAction::FinishDowntime, "btn-finish-downtime"),
        (TransitionAction::QuickTransaction, "btn-quick-transaction"),
    ];

    for (action, class) in buttons {
        let active = has_workcenter && has_row && enabled.allows(action) && !busy;

        let button = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class(&format!(
                "btn-action {} {}",
                class,
                if active { "active" } else { "inactive" }
            ))
            .build();

        let loading = *state.busy.borrow() == Some(action);
        let label = ElementBuilder::new("span")?
            .text(if loading { "..." } else { action.label() })
            .build();
        append_child(&button, &label)?;

        set_disabled(&button, !active)?;

        {
            let state = state.clone();
            on_click(&button, move |_| {
                TransitionViewModel::trigger(&state, action);
            })?;
        }

        append_child(&container, &button)?;
    }

    // Hint con el código actual, útil en planta para diagnosticar botones
    if has_row && has_workcenter {
        let hint = ElementBuilder::new("span")?
            .class("status-hint")
            .text(&format!("(S:{})", code))
            .build();
        append_child(&container, &hint)?;
    }

    Ok(container)
}

/// Tarjeta de información del iş merkezi seleccionado
pub fn render_info_bar(state: &AppState) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?
        .id("workcenter-info-bar")?
        .class("workcenter-info-bar")
        .build();

    let record = state.selection.selected_record.borrow().clone();
    let Some(record) = record else {
        // Sin selección la barra queda vacía pero conserva su id para los
        // reemplazos incrementales
        return Ok(bar);
    };

    let info = ElementBuilder::new("div")?
        .class("workcenter-info")
        .build();

    let title = ElementBuilder::new("h5")?
        .class("workcenter-title")
        .text(&format!("{} - {}", record.name, record.description))
        .build();

    let responsible = if record.responsible.is_empty() {
        "Sorumlu: Belirtilmemiş".to_string()
    } else {
        record.responsible.clone()
    };
    let subtitle = ElementBuilder::new("span")?
        .class("workcenter-subtitle")
        .text(&format!("{} • {}", record.location, responsible))
        .build();

    append_child(&info, &title)?;
    append_child(&info, &subtitle)?;

    let tags = ElementBuilder::new("div")?
        .class("workcenter-tags")
        .build();

    let status_class = if record.status == "Aktif" {
        "tag tag-green"
    } else {
        "tag tag-red"
    };
    let status_tag = ElementBuilder::new("span")?
        .class(status_class)
        .text(&record.status)
        .build();
    append_child(&tags, &status_tag)?;

    if let Some(row) = state.selection.selected_row() {
        let row_tag = ElementBuilder::new("span")?
            .class("tag tag-blue")
            .text(&format!("İş Emri: {}", row.confirmation))
            .build();
        append_child(&tags, &row_tag)?;
    }

    append_child(&bar, &info)?;
    append_child(&bar, &tags)?;

    Ok(bar)
}
