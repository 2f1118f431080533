// ============================================================================
// OPERATIONS TABLE - Tabla de iş emirleri con selección por checkbox
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{append_child, on_change, ElementBuilder};
use crate::models::OperationRow;
use crate::state::AppState;
use crate::viewmodels::OperationsViewModel;

/// Renderizar el card de operaciones del sidebar. Siempre devuelve el nodo
/// con id fijo para poder reemplazarlo incrementalmente.
pub fn render_operations_panel(state: &AppState) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("div")?
        .id("operations-panel")?
        .class("operations-card")
        .build();

    let has_workcenter = state.selection.selected_workcenter_id.borrow().is_some();
    if !has_workcenter {
        return Ok(panel);
    }

    let title = ElementBuilder::new("div")?
        .class("operations-title")
        .text("İş Merkezi Operasyonları")
        .build();
    append_child(&panel, &title)?;

    if *state.selection.operations_loading.borrow() {
        let loading = ElementBuilder::new("div")?
            .class("operations-loading")
            .text("Operasyonlar yükleniyor...")
            .build();
        append_child(&panel, &loading)?;
        return Ok(panel);
    }

    let operations = state.selection.operations.borrow().clone();
    if operations.is_empty() {
        // Estado vacío tras fetch, distinto de "aún sin datos"
        let text = if *state.selection.operations_fetched.borrow() {
            "Bu iş merkezi için operasyon bulunamadı"
        } else {
            "Veri yok"
        };
        let empty = ElementBuilder::new("div")?
            .class("operations-empty")
            .text(text)
            .build();
        append_child(&panel, &empty)?;
        return Ok(panel);
    }

    let table = render_table(state, &operations)?;
    append_child(&panel, &table)?;

    Ok(panel)
}

fn render_table(state: &AppState, operations: &[OperationRow]) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?
        .class("operations-table")
        .build();

    // Cabecera
    let thead = ElementBuilder::new("thead")?.build();
    let header_row = ElementBuilder::new("tr")?.build();
    for column in [
        "", // checkbox
        "Üretim Emri",
        "Onay No",
        "Malzeme",
        "Açıklama",
        "Başlangıç",
        "Bitiş",
        "Hedef Miktar",
        "Durum",
    ] {
        let th = ElementBuilder::new("th")?.text(column).build();
        append_child(&header_row, &th)?;
    }
    append_child(&thead, &header_row)?;
    append_child(&table, &thead)?;

    // Filas
    let tbody = ElementBuilder::new("tbody")?.build();
    let selected_keys = state.selection.selected_row_keys.borrow().clone();

    for operation in operations {
        let row_el = render_row(state, operation, &selected_keys)?;
        append_child(&tbody, &row_el)?;
    }
    append_child(&table, &tbody)?;

    Ok(table)
}

fn render_row(
    state: &AppState,
    operation: &OperationRow,
    selected_keys: &[String],
) -> Result<Element, JsValue> {
    let is_selected = selected_keys.contains(&operation.key);

    let tr = ElementBuilder::new("tr")?
        .class(if is_selected { "row-selected" } else { "" })
        .attr("data-key", &operation.key)?
        .build();

    // Checkbox de selección múltiple
    let checkbox_cell = ElementBuilder::new("td")?
        .class("cell-checkbox")
        .build();
    let checkbox = ElementBuilder::new("input")?
        .attr("type", "checkbox")?
        .build();
    if is_selected {
        checkbox.set_attribute("checked", "checked")?;
    }
    {
        let state = state.clone();
        let key = operation.key.clone();
        on_change(&checkbox, move |e: web_sys::Event| {
            let checked = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.checked())
                .unwrap_or(false);
            OperationsViewModel::toggle_row(&state, &key, checked);
        })?;
    }
    append_child(&checkbox_cell, &checkbox)?;
    append_child(&tr, &checkbox_cell)?;

    for value in [
        operation.prd_order.as_str(),
        operation.confirmation.as_str(),
        operation.material.as_str(),
        operation.stext.as_str(),
    ] {
        let td = ElementBuilder::new("td")?.text(value).build();
        append_child(&tr, &td)?;
    }

    let start_td = ElementBuilder::new("td")?
        .text(&operation.target_start_display())
        .build();
    append_child(&tr, &start_td)?;

    let end_td = ElementBuilder::new("td")?
        .text(&operation.target_end_display())
        .build();
    append_child(&tr, &end_td)?;

    let target_td = ElementBuilder::new("td")?
        .text(&operation.target_out)
        .build();
    append_child(&tr, &target_td)?;

    // Durum con color fijo por estado
    let status_td = ElementBuilder::new("td")?.build();
    let status_span = ElementBuilder::new("span")?
        .class("status-label")
        .attr(
            "style",
            &format!("color: {}; font-weight: bold", operation.status.color()),
        )?
        .text(operation.status.label())
        .build();
    append_child(&status_td, &status_span)?;
    append_child(&tr, &status_td)?;

    Ok(tr)
}
