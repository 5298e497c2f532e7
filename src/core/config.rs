mod parsing;
mod settings;
mod types;

pub(crate) use types::{ConfigError, Environment, Settings};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn load_uses_defaults_in_test_env() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let settings = Settings::load().expect("settings");
        assert_eq!(settings.runtime().environment, Environment::Test);
        assert_eq!(settings.api().api_v1_str, "/api/v1");
        assert_eq!(settings.reference().subjects.len(), 5);
        assert_eq!(settings.reference().classes.len(), 3);
        assert_eq!(
            settings.reference().assignment_keywords,
            vec!["improvement", "areas", "improve", "build"]
        );
        assert!(!settings.redis().enabled);
    }

    #[tokio::test]
    async fn load_rejects_duplicate_subject_ids() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::set_var(
            "SUBJECTS_JSON",
            r#"[{"id":"math","name":"Mathematics"},{"id":"math","name":"Maths"}]"#,
        );

        let result = Settings::load();
        std::env::remove_var("SUBJECTS_JSON");

        assert!(matches!(result, Err(ConfigError::InvalidReference { field: "SUBJECTS_JSON", .. })));
    }

    #[tokio::test]
    async fn strict_config_requires_ai_key() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::set_var("SAHAYAK_STRICT_CONFIG", "1");
        std::env::remove_var("OPENAI_API_KEY");

        let result = Settings::load();
        std::env::set_var("SAHAYAK_STRICT_CONFIG", "0");

        assert!(matches!(result, Err(ConfigError::MissingSecret("OPENAI_API_KEY"))));
    }

    #[tokio::test]
    async fn invalid_port_is_reported() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::set_var("SAHAYAK_PORT", "0");

        let result = Settings::load();
        std::env::remove_var("SAHAYAK_PORT");

        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }
}
