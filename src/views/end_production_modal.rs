// ============================================================================
// END PRODUCTION MODAL - Cantidades de Üretim Bitir
// ============================================================================
// Antes de mandar end-production el operario confirma el üretilen (PDCOUTPUT)
// y el fire (PDCSCRAP); ambos obligatorios, enteros no negativos.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{append_child, get_element_by_id, on_click, set_disabled, ElementBuilder};
use crate::state::AppState;
use crate::utils::parse_quantity;
use crate::viewmodels::TransitionViewModel;
use crate::views::notification;

pub fn render_end_production_modal(state: &AppState) -> Result<Element, JsValue> {
    let show = *state.show_end_production.borrow();
    let class = if show {
        "end-production-modal show"
    } else {
        "end-production-modal"
    };

    let modal = ElementBuilder::new("div")?
        .id("end-production-modal")?
        .class(class)
        .build();

    // Click en el fondo cierra el modal
    {
        let state = state.clone();
        on_click(&modal, move |_| {
            state.set_show_end_production(false);
        })?;
    }

    let content = ElementBuilder::new("div")?
        .class("modal-content")
        .build();

    // El click dentro del contenido no debe cerrar
    on_click(&content, move |e: web_sys::MouseEvent| {
        e.stop_propagation();
    })?;

    let title = ElementBuilder::new("h3")?
        .text("Üretim Bitir")
        .build();
    append_child(&content, &title)?;

    if let Some(row) = state.selection.selected_row() {
        let subtitle = ElementBuilder::new("p")?
            .class("modal-subtitle")
            .text(&format!("İş Emri: {} - {}", row.confirmation, row.material))
            .build();
        append_child(&content, &subtitle)?;
    }

    let output_group = quantity_group(
        "pdc-output",
        "Üretilen Miktar (PDCOUTPUT)",
        "Üretilen miktarı girin",
    )?;
    let scrap_group = quantity_group(
        "pdc-scrap",
        "Fire Miktarı (PDCSCRAP)",
        "Fire miktarını girin",
    )?;
    append_child(&content, &output_group)?;
    append_child(&content, &scrap_group)?;

    let footer = ElementBuilder::new("div")?
        .class("modal-footer")
        .build();

    let cancel_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-cancel")
        .text("İptal")
        .build();
    {
        let state = state.clone();
        on_click(&cancel_btn, move |_| {
            state.set_show_end_production(false);
        })?;
    }

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-submit-danger")
        .text("Üretimi Bitir")
        .build();
    set_disabled(&submit_btn, state.is_busy())?;
    {
        let state = state.clone();
        on_click(&submit_btn, move |_| {
            submit(&state);
        })?;
    }

    append_child(&footer, &cancel_btn)?;
    append_child(&footer, &submit_btn)?;
    append_child(&content, &footer)?;
    append_child(&modal, &content)?;

    Ok(modal)
}

fn quantity_group(id: &str, label_text: &str, placeholder: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-input")
        .attr("type", "number")?
        .attr("min", "0")?
        .attr("placeholder", placeholder)?
        .build();

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}

/// Leer y validar las cantidades; solo con ambas válidas se dispara la
/// transacción
fn submit(state: &AppState) {
    let output = read_quantity("pdc-output");
    let scrap = read_quantity("pdc-scrap");

    let output = match output {
        Ok(value) => value,
        Err(e) => {
            notification::warning(&format!("Üretilen miktar: {}", e));
            return;
        }
    };
    let scrap = match scrap {
        Ok(value) => value,
        Err(e) => {
            notification::warning(&format!("Fire miktarı: {}", e));
            return;
        }
    };

    TransitionViewModel::submit_end_production(state, output, scrap);
}

fn read_quantity(id: &str) -> Result<u32, String> {
    let value = get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default();
    parse_quantity(&value)
}
