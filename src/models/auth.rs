use serde::{Deserialize, Serialize};

/// Formulario de login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Formulario de registro
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}
