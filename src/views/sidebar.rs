// ============================================================================
// SIDEBAR - Búsqueda de imagen + directorio de iş merkezleri + operaciones
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

use crate::dom::{
    append_child, get_element_by_id, on_change, on_click, on_keydown, set_attribute,
    set_disabled, ElementBuilder,
};
use crate::state::AppState;
use crate::viewmodels::{ImageViewModel, OperationsViewModel};
use crate::views::operations_table::render_operations_panel;

pub fn render_sidebar(state: &AppState) -> Result<Element, JsValue> {
    let collapsed = *state.sidebar_collapsed.borrow();
    let class = if collapsed { "sidebar collapsed" } else { "sidebar" };

    let sidebar = ElementBuilder::new("aside")?
        .id("sidebar")?
        .class(class)
        .build();

    if collapsed {
        return Ok(sidebar);
    }

    let title = ElementBuilder::new("div")?
        .class("sidebar-title")
        .text("İş Merkezi")
        .build();
    append_child(&sidebar, &title)?;

    let search = render_image_search(state)?;
    append_child(&sidebar, &search)?;

    let selector = render_workcenter_selector(state)?;
    append_child(&sidebar, &selector)?;

    let operations = render_operations_panel(state)?;
    append_child(&sidebar, &operations)?;

    Ok(sidebar)
}

/// Caja de búsqueda manual de imagen por número
fn render_image_search(state: &AppState) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("div")?
        .class("image-search-row")
        .build();

    let input = ElementBuilder::new("input")?
        .id("image-search")?
        .class("form-input")
        .attr("type", "text")?
        .attr("placeholder", "Resim No Giriniz")?
        .build();

    // Enter dispara la misma búsqueda que el botón
    {
        let state = state.clone();
        on_keydown(&input, move |e: web_sys::KeyboardEvent| {
            if e.key() == "Enter" {
                lookup_from_input(&state);
            }
        })?;
    }

    let button = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-image-search")
        .text("Resim Göster")
        .build();
    {
        let state = state.clone();
        on_click(&button, move |_| {
            lookup_from_input(&state);
        })?;
    }

    append_child(&row, &input)?;
    append_child(&row, &button)?;
    Ok(row)
}

fn lookup_from_input(state: &AppState) {
    let value = get_element_by_id("image-search")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default();
    ImageViewModel::lookup(state, &value);
    // Limpiar el input tras la búsqueda manual
    if let Some(input) = get_element_by_id("image-search")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}

/// Selector stand → iş merkezi. Los stands son optgroups (no seleccionables),
/// los iş merkezleri las opciones.
fn render_workcenter_selector(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("workcenter-selector")
        .build();

    let select = ElementBuilder::new("select")?
        .id("workcenter-select")?
        .class("workcenter-select")
        .build();

    let loading = *state.workcenters_loading.borrow();
    set_disabled(&select, loading)?;

    let stands = state.workcenters.borrow();
    let selected_value = state.selection.selected_value.borrow().clone();

    let placeholder_text = if loading {
        "Yükleniyor..."
    } else if stands.is_empty() {
        "Veri bulunamadı"
    } else {
        "Stand ve iş merkezi seç..."
    };
    let placeholder = ElementBuilder::new("option")?
        .attr("value", "")?
        .text(placeholder_text)
        .build();
    append_child(&select, &placeholder)?;

    for stand in stands.iter() {
        let group = ElementBuilder::new("optgroup")?.build();
        set_attribute(&group, "label", &stand.title)?;

        for workcenter in &stand.workcenters {
            let option = ElementBuilder::new("option")?
                .attr("value", &workcenter.value)?
                .text(&workcenter.title)
                .build();
            if selected_value.as_deref() == Some(workcenter.value.as_str()) {
                set_attribute(&option, "selected", "selected")?;
            }
            append_child(&group, &option)?;
        }

        append_child(&select, &group)?;
    }

    {
        let state = state.clone();
        on_change(&select, move |e: web_sys::Event| {
            let value = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|select| select.value())
                .unwrap_or_default();
            OperationsViewModel::select_workcenter(&state, &value);
        })?;
    }

    append_child(&container, &select)?;
    Ok(container)
}
