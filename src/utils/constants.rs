// Claves de almacenamiento persistente
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "access_token";
pub const STORAGE_KEY_REMEMBERED_EMAIL: &str = "remembered_email";

// Headers
pub const HEADER_INTERVIEWER_NAME: &str = "interviewerName";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// Rutas
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PATH: &str = "/";
