pub mod account;
pub mod auth;

pub use account::{Account, AccountFormDto, AccountQuery, AccountStats, AccountStatus, RoleLevel};
pub use auth::{LoginForm, RegisterForm};
