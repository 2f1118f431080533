// ============================================================================
// COOKIES - Helpers para la cookie de sesión
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

/// Leer una cookie por nombre
pub fn get_cookie(name: &str) -> Option<String> {
    let doc = html_document()?;
    let cookies = doc.cookie().ok()?;
    find_cookie(&cookies, name)
}

/// Parsear el string `document.cookie` ("a=1; b=2") y extraer un valor
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    for pair in cookies.split(';') {
        let pair = pair.trim();
        if let Some((key, value)) = pair.split_once('=') {
            if key == name && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Guardar una cookie con Max-Age, Path=/ y SameSite=Strict
pub fn set_cookie(name: &str, value: &str, max_age_secs: i64) {
    if let Some(doc) = html_document() {
        let cookie = format!(
            "{}={}; Max-Age={}; Path=/; SameSite=Strict",
            name, value, max_age_secs
        );
        if doc.set_cookie(&cookie).is_err() {
            log::error!("❌ [COOKIES] Error guardando cookie {}", name);
        }
    }
}

/// Borrar una cookie (Max-Age=0)
pub fn delete_cookie(name: &str) {
    if let Some(doc) = html_document() {
        let cookie = format!("{}=; Max-Age=0; Path=/; SameSite=Strict", name);
        if doc.set_cookie(&cookie).is_err() {
            log::error!("❌ [COOKIES] Error eliminando cookie {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::find_cookie;

    #[test]
    fn encuentra_cookie_entre_varias() {
        let cookies = "theme=dark; sessionId=abc123; lang=tr";
        assert_eq!(find_cookie(cookies, "sessionId"), Some("abc123".to_string()));
    }

    #[test]
    fn cookie_ausente_devuelve_none() {
        assert_eq!(find_cookie("theme=dark", "sessionId"), None);
    }

    #[test]
    fn cookie_vacia_cuenta_como_ausente() {
        assert_eq!(find_cookie("sessionId=; theme=dark", "sessionId"), None);
    }

    #[test]
    fn tolera_espacios_y_valores_con_igual() {
        let cookies = " sessionId=a=b ; x=y";
        assert_eq!(find_cookie(cookies, "sessionId"), Some("a=b".to_string()));
    }
}
