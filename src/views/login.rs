// ============================================================================
// LOGIN VIEW - Formulario de acceso
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{append_child, create_element, on_input, on_submit, set_class_name, ElementBuilder};
use crate::services::{auth_service, ApiError};
use crate::state::AppState;
use crate::views::notification;

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login() llamado");

    // Estado local del formulario (en closures)
    let username = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let loading = Rc::new(RefCell::new(false));

    let login_screen = ElementBuilder::new("div")?
        .class("login-screen")
        .build();

    let login_container = ElementBuilder::new("div")?
        .class("login-container")
        .build();

    // Header
    let login_header = ElementBuilder::new("div")?
        .class("login-header")
        .build();

    let logo = ElementBuilder::new("div")?
        .class("login-logo")
        .build();
    let logo_icon = ElementBuilder::new("div")?
        .class("logo-icon")
        .text("🏭")
        .build();
    append_child(&logo, &logo_icon)?;

    let title = ElementBuilder::new("h1")?
        .text("Hoş Geldiniz")
        .build();
    let subtitle = ElementBuilder::new("p")?
        .text("Hesabınıza giriş yapın")
        .build();

    append_child(&login_header, &logo)?;
    append_child(&login_header, &title)?;
    append_child(&login_header, &subtitle)?;

    // Formulario
    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    let username_group = create_input_group(
        "username",
        "text",
        "Username",
        "Username",
        username.clone(),
    )?;
    let password_group = create_input_group(
        "password",
        "password",
        "Şifre",
        "Şifreniz",
        password.clone(),
    )?;

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .build();
    let btn_text = ElementBuilder::new("span")?
        .class("btn-text")
        .text("Giriş Yap")
        .build();
    append_child(&submit_btn, &btn_text)?;

    // Event listener para submit
    {
        let username = username.clone();
        let password = password.clone();
        let loading = loading.clone();
        let state = state.clone();

        on_submit(&form, move |e: web_sys::Event| {
            e.prevent_default();

            if *loading.borrow() {
                return;
            }

            let username_val = username.borrow().clone();
            let password_val = password.borrow().clone();

            if username_val.is_empty() {
                notification::warning("Username gerekli!");
                return;
            }
            if password_val.is_empty() {
                notification::warning("Şifre gerekli!");
                return;
            }

            *loading.borrow_mut() = true;
            let state = state.clone();
            let loading = loading.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match auth_service::login(&username_val, &password_val).await {
                    Ok(data) => {
                        log::info!("✅ [LOGIN] Login exitoso");
                        let message = data
                            .message
                            .clone()
                            .unwrap_or_else(|| "Giriş başarılı!".to_string());
                        notification::success(&message);

                        // Actualizar estado y avisar a la app
                        state.auth.set_logged_in(true);
                        state.auth.set_username(Some(username_val));

                        if let Some(win) = web_sys::window() {
                            if let Ok(event) = web_sys::Event::new("loggedIn") {
                                let _ = win.dispatch_event(&event);
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("❌ [LOGIN] Error en login: {}", e);
                        notification::error(login_error_message(&e));
                    }
                }
                *loading.borrow_mut() = false;
            });
        })?;
    }

    append_child(&form, &username_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &submit_btn)?;

    append_child(&login_container, &login_header)?;
    append_child(&login_container, &form)?;
    append_child(&login_screen, &login_container)?;

    Ok(login_screen)
}

/// Mapear el error del servicio de auth al mensaje del formulario
fn login_error_message(error: &ApiError) -> &str {
    match error {
        ApiError::Status { status: 401, .. } => "Kullanıcı adı veya şifre hatalı!",
        ApiError::Status { status: 500, .. } => "Sunucu hatası! Lütfen daha sonra tekrar deneyin.",
        ApiError::Status { message, .. } => message,
        ApiError::Network => "Sunucuya ulaşılamıyor! İnternet bağlantınızı kontrol edin.",
        _ => "Beklenmeyen bir hata oluştu!",
    }
}

/// Helper para crear form group con input controlado
fn create_input_group(
    id: &str,
    input_type: &str,
    label_text: &str,
    placeholder: &str,
    value: Rc<RefCell<String>>,
) -> Result<Element, JsValue> {
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
        .attr("type", input_type)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .build();

    {
        let value = value.clone();
        on_input(&input, move |e: web_sys::InputEvent| {
            if let Some(target) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
                *value.borrow_mut() = target.value();
            }
        })?;
    }

    append_child(&group, &label)?;
    append_child(&group, &input)?;

    Ok(group)
}
