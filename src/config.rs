use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Vitala";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed key under which the formatted onboarding record is persisted.
pub const ONBOARDING_RECORD_KEY: &str = "onboarding_data";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "info,vitala_lib=debug".to_string()
}

/// Get the application data directory
/// ~/Vitala/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Vitala")
}

/// Path of the app database holding the onboarding record.
pub fn app_db_path() -> PathBuf {
    app_data_dir().join("vitala.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Vitala"));
    }

    #[test]
    fn db_path_under_app_data() {
        let db = app_db_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("vitala.db"));
    }

    #[test]
    fn app_name_is_vitala() {
        assert_eq!(APP_NAME, "Vitala");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
