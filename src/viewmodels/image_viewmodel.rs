// ============================================================================
// IMAGE VIEWMODEL - Búsqueda de imagen de referencia por número de malzeme
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::services::{image_service, ApiClient, ApiError};
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::views::notification;

pub struct ImageViewModel;

impl ImageViewModel {
    /// Buscar y mostrar la imagen. En error la imagen anterior se conserva.
    pub fn lookup(state: &AppState, image_name: &str) {
        let image_name = image_name.trim().to_string();
        if image_name.is_empty() {
            notification::warning("Lütfen resim numarası girin!");
            return;
        }

        state.set_image_loading(true);
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::ImagePanel));

        let state = state.clone();
        spawn_local(async move {
            let api = ApiClient::new();
            match image_service::fetch_image(&api, &image_name).await {
                Ok(handle) => {
                    state.set_image_loading(false);
                    notification::success(&format!("Resim {} başarıyla yüklendi!", image_name));
                    // set_image libera el object URL anterior y refresca el panel
                    state.set_image(Some(handle));
                }
                Err(e) => {
                    state.set_image_loading(false);
                    match &e {
                        ApiError::Status { status: 404, .. } => {
                            notification::error("Resim bulunamadı");
                        }
                        _ => {
                            notification::error(&format!("Resim getirme başarısız: {}", e));
                        }
                    }
                    // Sin reemplazo: el panel sigue mostrando la imagen previa
                    crate::rerender_app_with_type(UpdateType::Incremental(
                        IncrementalUpdate::ImagePanel,
                    ));
                }
            }
        });
    }
}
