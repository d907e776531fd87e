// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "ZH" | "ZH-TW" => {
            // Mensajes de error
            translations.insert("login_failed", "登入失敗，請確認帳號或密碼是否正確");
            translations.insert("register_failed", "註冊失敗，請稍後再試");
            translations.insert("fetch_accounts_failed", "無法載入帳號列表，請稍後再試");
            translations.insert("create_account_failed", "新增帳號失敗，請稍後再試");
            translations.insert("update_account_failed", "更新帳號失敗，請稍後再試");
            translations.insert("delete_account_failed", "刪除帳號失敗，請稍後再試");

            // Roles
            translations.insert("role_admin", "管理員");
            translations.insert("role_editor", "編輯");
            translations.insert("role_user", "用戶");
            translations.insert("role_client", "訪客");

            // Estados
            translations.insert("status_on", "啟用");
            translations.insert("status_off", "停用");
        }
        _ => {
            translations.insert("login_failed", "Login failed, please check your email or password");
            translations.insert("register_failed", "Registration failed, please try again later");
            translations.insert("fetch_accounts_failed", "Could not load the account list, please try again later");
            translations.insert("create_account_failed", "Could not create the account, please try again later");
            translations.insert("update_account_failed", "Could not update the account, please try again later");
            translations.insert("delete_account_failed", "Could not delete the account, please try again later");

            translations.insert("role_admin", "Administrator");
            translations.insert("role_editor", "Editor");
            translations.insert("role_user", "User");
            translations.insert("role_client", "Client");

            translations.insert("status_on", "Active");
            translations.insert("status_off", "Disabled");
        }
    }

    translations
}

/// Función de traducción
///
/// # Arguments
/// * `key` - Clave de traducción
/// * `lang` - Idioma ("EN" o "ZH")
///
/// # Returns
/// String traducida o la clave si no se encuentra traducción
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    // Fallback: devolver la clave si no hay traducción
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(t("status_on", "FR"), "Active");
        assert_eq!(t("status_on", "zh-tw"), "啟用");
    }

    #[test]
    fn unknown_key_returns_key() {
        assert_eq!(t("no_such_key", "EN"), "no_such_key");
    }
}
