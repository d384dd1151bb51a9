use std::env;
use std::fs;
use std::path::Path;

// Variables que el crate lee con option_env! (ver src/config.rs)
const CONFIG_KEYS: &[&str] = &[
    "CART_UPDATE_URL",
    "LOGIN_URL",
    "CSRF_HEADER",
    "CART_LOCALE",
    "CART_CURRENCY_SUFFIX",
    "ENABLE_LOGGING",
    "REQUEST_TIMEOUT_MS",
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

    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(e) => {
            println!("cargo:warning=No se pudo leer .env: {}", e);
            return;
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // El entorno real tiene prioridad sobre .env
        if CONFIG_KEYS.contains(&key) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
