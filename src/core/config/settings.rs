use std::collections::HashSet;

use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment, parse_f64,
    parse_json_list, parse_string_list, parse_u16, parse_u32, parse_u64,
};
use super::types::{
    AiSettings, ApiSettings, BootstrapSettings, ConfigError, CorsSettings, DatabaseSettings,
    RateLimitSettings, RedisSettings, ReferenceSettings, RuntimeSettings, ServerHost, ServerPort,
    ServerSettings, Settings, TelemetrySettings,
};
use crate::core::reference::{
    default_classes, default_subjects, DEFAULT_ASSIGNMENT_KEYWORDS, DEFAULT_TEACHER_EMAILS,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("SAHAYAK_HOST", "0.0.0.0");
        let port = env_or_default("SAHAYAK_PORT", "8000");

        let environment =
            parse_environment(env_optional("SAHAYAK_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("SAHAYAK_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Sahayak API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "sahayak");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "sahayak_db");
        let database_url = env_optional("DATABASE_URL");
        let max_connections =
            parse_u32("DATABASE_MAX_CONNECTIONS", env_or_default("DATABASE_MAX_CONNECTIONS", "20"))?;

        let redis_enabled =
            env_optional("REDIS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);
        let redis_host = env_or_default("REDIS_HOST", "localhost");
        let redis_port = parse_u16("REDIS_PORT", env_or_default("REDIS_PORT", "6379"))?;
        let redis_db = parse_u16("REDIS_DB", env_or_default("REDIS_DB", "0"))?;
        let redis_password = env_or_default("REDIS_PASSWORD", "");

        let openai_api_key = env_or_default("OPENAI_API_KEY", "");
        let openai_base_url = env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1");
        let ai_model = env_or_default("AI_MODEL", "gpt-4o-mini");
        let ai_max_tokens = parse_u32("AI_MAX_TOKENS", env_or_default("AI_MAX_TOKENS", "4000"))?;
        let ai_temperature =
            parse_f64("AI_TEMPERATURE", env_or_default("AI_TEMPERATURE", "0.7"))?;
        let ai_request_timeout =
            parse_u64("AI_REQUEST_TIMEOUT", env_or_default("AI_REQUEST_TIMEOUT", "120"))?;

        let subjects = parse_json_list("SUBJECTS_JSON", env_optional("SUBJECTS_JSON"), default_subjects)?;
        let classes = parse_json_list("CLASSES_JSON", env_optional("CLASSES_JSON"), default_classes)?;
        let teacher_emails =
            parse_string_list(env_optional("TEACHER_EMAILS"), DEFAULT_TEACHER_EMAILS);
        let admin_emails = parse_string_list(env_optional("ADMIN_EMAILS"), &[]);
        let assignment_keywords =
            parse_string_list(env_optional("ASSIGNMENT_KEYWORDS"), DEFAULT_ASSIGNMENT_KEYWORDS);

        let ai_requests_per_window = parse_u64(
            "AI_RATE_LIMIT_REQUESTS",
            env_or_default("AI_RATE_LIMIT_REQUESTS", "20"),
        )?;
        let ai_window_seconds = parse_u64(
            "AI_RATE_LIMIT_WINDOW_SECONDS",
            env_or_default("AI_RATE_LIMIT_WINDOW_SECONDS", "60"),
        )?;

        let seed_demo_data =
            env_optional("SEED_DEMO_DATA").map(|value| parse_bool(&value)).unwrap_or(false);

        let log_level = env_or_default("SAHAYAK_LOG_LEVEL", "info");
        let json = env_optional("SAHAYAK_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
                max_connections,
            },
            redis: RedisSettings {
                enabled: redis_enabled,
                host: redis_host,
                port: redis_port,
                db: redis_db,
                password: redis_password,
            },
            ai: AiSettings {
                openai_api_key,
                openai_base_url,
                ai_model,
                ai_max_tokens,
                ai_temperature,
                ai_request_timeout,
            },
            reference: ReferenceSettings {
                subjects,
                classes,
                teacher_emails,
                admin_emails,
                assignment_keywords,
            },
            rate_limit: RateLimitSettings { ai_requests_per_window, ai_window_seconds },
            bootstrap: BootstrapSettings { seed_demo_data },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn redis(&self) -> &RedisSettings {
        &self.redis
    }

    pub(crate) fn ai(&self) -> &AiSettings {
        &self.ai
    }

    pub(crate) fn reference(&self) -> &ReferenceSettings {
        &self.reference
    }

    pub(crate) fn rate_limit(&self) -> &RateLimitSettings {
        &self.rate_limit
    }

    pub(crate) fn bootstrap(&self) -> &BootstrapSettings {
        &self.bootstrap
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reference.subjects.is_empty() {
            return Err(ConfigError::InvalidReference {
                field: "SUBJECTS_JSON",
                reason: "at least one subject is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for subject in &self.reference.subjects {
            if subject.id.trim().is_empty() || !seen.insert(subject.id.as_str()) {
                return Err(ConfigError::InvalidReference {
                    field: "SUBJECTS_JSON",
                    reason: format!("duplicate or empty subject id '{}'", subject.id),
                });
            }
        }

        let mut seen = HashSet::new();
        for class in &self.reference.classes {
            if class.id.trim().is_empty() || !seen.insert(class.id.as_str()) {
                return Err(ConfigError::InvalidReference {
                    field: "CLASSES_JSON",
                    reason: format!("duplicate or empty class id '{}'", class.id),
                });
            }
        }

        if self.reference.assignment_keywords.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ASSIGNMENT_KEYWORDS",
                value: String::from("<empty>"),
            });
        }

        if !(0.0..=2.0).contains(&self.ai.ai_temperature) {
            return Err(ConfigError::InvalidValue {
                field: "AI_TEMPERATURE",
                value: self.ai.ai_temperature.to_string(),
            });
        }

        if self.rate_limit.ai_window_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "AI_RATE_LIMIT_WINDOW_SECONDS",
                value: "0".to_string(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if self.ai.openai_api_key.is_empty() {
            return Err(ConfigError::MissingSecret("OPENAI_API_KEY"));
        }
        if self.redis.enabled && self.redis.password.is_empty() {
            return Err(ConfigError::MissingSecret("REDIS_PASSWORD"));
        }

        Ok(())
    }
}
