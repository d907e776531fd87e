use std::env;
use std::fs;
use std::path::Path;

// Variables que `ClientConfig::from_env` lee con option_env!
const CONFIG_KEYS: &[&str] = &[
    "API_BASE_URL",
    "INTERVIEWER_NAME",
    "NETWORK_TIMEOUT_SECONDS",
    "MOCK_LOGIN_LATENCY_MS",
    "SEARCH_DEBOUNCE_MS",
    "CONSOLE_LANGUAGE",
    "ENABLE_LOGGING",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    if !env_file.exists() {
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=.env exists but could not be read, using defaults");
        return;
    };

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        if !CONFIG_KEYS.contains(&key) {
            println!("cargo:warning=.env: unknown key {}", key);
            continue;
        }
        // El entorno real gana sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
