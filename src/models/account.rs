use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::i18n::t;

/// Nivel de rol de una cuenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleLevel {
    Admin,
    Editor,
    User,
    Client,
}

impl RoleLevel {
    pub const ALL: [RoleLevel; 4] = [
        RoleLevel::Admin,
        RoleLevel::Editor,
        RoleLevel::User,
        RoleLevel::Client,
    ];

    /// Etiqueta para mostrar en UI
    pub fn label(&self, lang: &str) -> String {
        let key = match self {
            RoleLevel::Admin => "role_admin",
            RoleLevel::Editor => "role_editor",
            RoleLevel::User => "role_user",
            RoleLevel::Client => "role_client",
        };
        t(key, lang)
    }
}

/// Estado de la cuenta: ON = activa, OFF = desactivada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    On,
    Off,
}

impl AccountStatus {
    pub fn label(&self, lang: &str) -> String {
        match self {
            AccountStatus::On => t("status_on", lang),
            AccountStatus::Off => t("status_off", lang),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::On)
    }
}

/// Cuenta tal como la devuelve el backend (copia cacheada, el dueño es el servidor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_level: RoleLevel,
    pub status: AccountStatus,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
}

// Formatos sin zona que aparecen en el backend; se interpretan como UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// `createdAt` llega como string: RFC 3339, fecha-hora sin zona, sólo fecha,
/// o epoch en milisegundos (número o string)
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CreatedAtVisitor;

    impl<'de> Visitor<'de> for CreatedAtVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a timestamp string or epoch milliseconds")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_created_at(value)
                .ok_or_else(|| E::custom(format!("unrecognized createdAt `{}`", value)))
        }

        fn visit_i64<E>(self, millis: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Utc.timestamp_millis_opt(millis)
                .single()
                .ok_or_else(|| E::custom(format!("createdAt out of range: {}", millis)))
        }

        fn visit_u64<E>(self, millis: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let millis = i64::try_from(millis)
                .map_err(|_| E::custom(format!("createdAt out of range: {}", millis)))?;
            self.visit_i64(millis)
        }
    }

    deserializer.deserialize_any(CreatedAtVisitor)
}

fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
}

/// Datos de formulario para crear / actualizar (sin id ni createdAt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountFormDto {
    pub name: String,
    pub email: String,
    pub role_level: RoleLevel,
    pub status: AccountStatus,
}

impl From<&Account> for AccountFormDto {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            role_level: account.role_level,
            status: account.status,
        }
    }
}

/// Filtro opcional del listado
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AccountQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }

    /// Pares `(clave, valor)` para el query string; los campos ausentes no se envían
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(ref name) = self.name {
            params.push(("name".to_string(), name.clone()));
        }
        if let Some(ref email) = self.email {
            params.push(("email".to_string(), email.clone()));
        }
        params
    }
}

/// Contadores derivados del listado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl AccountStats {
    /// Proyección pura del listado; se recalcula en cada lectura
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let active = accounts.iter().filter(|a| a.status.is_active()).count();
        Self {
            total: accounts.len(),
            active,
            inactive: accounts.len() - active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_json(created_at: &str) -> String {
        format!(
            r#"{{"id":"1","name":"John","email":"john@x.com","roleLevel":"USER","status":"ON","createdAt":{}}}"#,
            created_at
        )
    }

    #[test]
    fn created_at_accepts_backend_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        for raw in [
            r#""2024-05-01T08:30:00Z""#,
            r#""2024-05-01T16:30:00+08:00""#,
            r#""2024-05-01 08:30:00""#,
            r#""2024-05-01T08:30:00.000""#,
            "1714552200000",
            r#""1714552200000""#,
        ] {
            let account: Account = serde_json::from_str(&account_json(raw)).unwrap();
            assert_eq!(account.created_at, expected, "createdAt {}", raw);
        }

        let date_only: Account = serde_json::from_str(&account_json(r#""2024-05-01""#)).unwrap();
        assert_eq!(date_only.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn list_with_mixed_timestamp_formats_decodes() {
        let json = format!(
            "[{},{}]",
            account_json(r#""2024-05-01T08:30:00Z""#),
            account_json(r#""2024-05-01 08:30:00""#)
        );
        let accounts: Vec<Account> = serde_json::from_str(&json).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].created_at, accounts[1].created_at);
    }

    #[test]
    fn garbage_created_at_is_rejected() {
        let result: Result<Account, _> = serde_json::from_str(&account_json(r#""yesterday""#));
        assert!(result.is_err());
    }

    #[test]
    fn account_uses_camel_case_and_upper_enums() {
        let json = r#"{
            "id": "1",
            "name": "John",
            "email": "john@x.com",
            "roleLevel": "EDITOR",
            "status": "ON",
            "createdAt": "2024-05-01T08:30:00Z"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.role_level, RoleLevel::Editor);
        assert_eq!(account.status, AccountStatus::On);

        let dto = AccountFormDto::from(&account);
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["roleLevel"], "EDITOR");
        assert_eq!(value["status"], "ON");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn query_params_skip_missing_fields() {
        assert!(AccountQuery::default().to_params().is_empty());
        assert_eq!(
            AccountQuery::by_name("Jo").to_params(),
            vec![("name".to_string(), "Jo".to_string())]
        );
    }

    #[test]
    fn labels_follow_language() {
        assert_eq!(RoleLevel::Admin.label("ZH"), "管理員");
        assert_eq!(RoleLevel::Client.label("EN"), "Client");
        assert_eq!(AccountStatus::Off.label("ZH"), "停用");
    }
}
