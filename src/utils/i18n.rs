// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN - Avisos del carrito
// ============================================================================

use std::collections::HashMap;

pub const KEY_LOGIN_REQUIRED: &str = "login_requerido";
pub const KEY_UPDATE_FAILED: &str = "error_actualizar_carrito";

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();

    match language_code(lang).as_str() {
        "EN" => {
            translations.insert(KEY_LOGIN_REQUIRED, "⚠️ You need to log in to add items to your cart!");
            translations.insert(KEY_UPDATE_FAILED, "Something went wrong while updating your cart!");
        }
        // Vietnamita por defecto (idioma de la tienda)
        _ => {
            translations.insert(KEY_LOGIN_REQUIRED, "⚠️ Bạn cần đăng nhập để thêm vào giỏ hàng!");
            translations.insert(KEY_UPDATE_FAILED, "Có lỗi xảy ra khi thêm sản phẩm vào giỏ!");
        }
    }

    translations
}

/// "vi-VN" -> "VI", "en" -> "EN"
fn language_code(lang: &str) -> String {
    lang.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

/// Función de traducción
///
/// Devuelve la clave si no hay traducción.
pub fn t(key: &str, lang: &str) -> String {
    get_translations(lang)
        .get(key)
        .map(|s| s.to_string())
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vietnamese_is_the_default() {
        assert_eq!(t(KEY_UPDATE_FAILED, "vi-VN"), "Có lỗi xảy ra khi thêm sản phẩm vào giỏ!");
        assert_eq!(t(KEY_UPDATE_FAILED, "fr-FR"), t(KEY_UPDATE_FAILED, "vi-VN"));
    }

    #[test]
    fn english_by_locale_prefix() {
        assert_eq!(t(KEY_LOGIN_REQUIRED, "en-US"), "⚠️ You need to log in to add items to your cart!");
        assert_eq!(t(KEY_LOGIN_REQUIRED, "en_GB"), t(KEY_LOGIN_REQUIRED, "EN"));
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(t("no_existe", "vi-VN"), "no_existe");
    }
}
