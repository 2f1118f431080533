// ============================================================================
// IMAGE SERVICE - Descarga de imágenes de referencia y blob URLs
// ============================================================================

use js_sys::{Array, Uint8Array};
use web_sys::{Blob, Url};

use crate::services::api_client::{ApiClient, ApiError};

/// Referencia local a una imagen descargada. El object URL debe liberarse
/// con `revoke` cuando se reemplaza o se cierra el panel, si no el blob queda
/// vivo hasta recargar la página.
#[derive(Clone, PartialEq, Debug)]
pub struct ImageHandle {
    pub object_url: String,
    pub image_name: String,
}

impl ImageHandle {
    pub fn revoke(&self) {
        if Url::revoke_object_url(&self.object_url).is_err() {
            log::warn!("⚠️ [IMAGE] No se pudo liberar el object URL de {}", self.image_name);
        } else {
            log::info!("🧹 [IMAGE] Object URL de {} liberado", self.image_name);
        }
    }
}

/// Pedir la imagen al gateway y construir una referencia local mostrable
pub async fn fetch_image(api: &ApiClient, image_name: &str) -> Result<ImageHandle, ApiError> {
    let bytes = api.fetch_image(image_name).await?;
    let object_url = create_object_url(&bytes)
        .map_err(|e| ApiError::Parse(format!("Blob URL oluşturulamadı: {}", e)))?;

    log::info!("✅ [IMAGE] {} descargada ({} bytes)", image_name, bytes.len());

    Ok(ImageHandle {
        object_url,
        image_name: image_name.to_string(),
    })
}

fn create_object_url(bytes: &[u8]) -> Result<String, String> {
    let array = Uint8Array::from(bytes);
    let parts = Array::of1(&array);
    let blob = Blob::new_with_u8_array_sequence(&parts)
        .map_err(|e| format!("{:?}", e))?;
    Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))
}
