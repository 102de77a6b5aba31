use super::parsing::{
    env_optional, env_or_default, is_http_url, parse_bool, parse_cors_origins, parse_environment,
    parse_u16, parse_u64,
};
use super::secret::load_or_create_secret_key;
use super::types::{
    ApiSettings, ConfigError, CorsSettings, DatabaseSettings, JudgeSettings, MasterSettings,
    RedisSettings, RuntimeSettings, SecuritySettings, ServerHost, ServerPort, ServerSettings,
    Settings, TelemetrySettings,
};

const DEFAULT_JUDGE_URL: &str = "https://api.jdoodle.com/v1/execute";

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("EXAM_HOST", "0.0.0.0");
        let port = env_or_default("EXAM_PORT", "8000");

        let environment =
            parse_environment(env_optional("EXAM_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("EXAM_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Exam Portal API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let secret_key = match env_optional("SECRET_KEY") {
            Some(value) => value,
            None => load_or_create_secret_key(),
        };
        // 30 days
        let access_token_expire_minutes = parse_u64(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            env_or_default("ACCESS_TOKEN_EXPIRE_MINUTES", "43200"),
        )?;
        let algorithm = env_or_default("ALGORITHM", "HS256");
        let login_max_attempts =
            parse_u64("LOGIN_MAX_ATTEMPTS", env_or_default("LOGIN_MAX_ATTEMPTS", "10"))?;
        let login_window_seconds =
            parse_u64("LOGIN_WINDOW_SECONDS", env_or_default("LOGIN_WINDOW_SECONDS", "60"))?;

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "exam_portal");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "exam_portal");
        let database_url = env_optional("DATABASE_URL");

        let redis_host = env_or_default("REDIS_HOST", "localhost");
        let redis_port = parse_u16("REDIS_PORT", env_or_default("REDIS_PORT", "6379"))?;
        let redis_db = parse_u16("REDIS_DB", env_or_default("REDIS_DB", "0"))?;
        let redis_password = env_or_default("REDIS_PASSWORD", "");

        let judge_api_url = env_or_default("JUDGE_API_URL", DEFAULT_JUDGE_URL);
        let judge_client_id = env_or_default("JDOODLE_CLIENT_ID", "");
        let judge_client_secret = env_or_default("JDOODLE_CLIENT_SECRET", "");
        let judge_timeout_seconds =
            parse_u64("JUDGE_TIMEOUT_SECONDS", env_or_default("JUDGE_TIMEOUT_SECONDS", "30"))?;

        let master_email = env_or_default("MASTER_EMAIL", "master@example.com").to_lowercase();
        let master_name = env_or_default("MASTER_NAME", "Master");
        let master_password = env_or_default("MASTER_PASSWORD", "");

        let log_level = env_or_default("EXAM_LOG_LEVEL", "info");
        let json = env_optional("EXAM_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            security: SecuritySettings {
                secret_key,
                access_token_expire_minutes,
                algorithm,
                login_max_attempts,
                login_window_seconds,
            },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
            },
            redis: RedisSettings {
                host: redis_host,
                port: redis_port,
                db: redis_db,
                password: redis_password,
            },
            judge: JudgeSettings {
                api_url: judge_api_url,
                client_id: judge_client_id,
                client_secret: judge_client_secret,
                timeout_seconds: judge_timeout_seconds,
            },
            master: MasterSettings {
                email: master_email,
                name: master_name,
                password: master_password,
            },
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

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
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

    pub(crate) fn judge(&self) -> &JudgeSettings {
        &self.judge
    }

    pub(crate) fn master(&self) -> &MasterSettings {
        &self.master
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.judge.api_url) {
            return Err(ConfigError::InvalidValue {
                field: "JUDGE_API_URL",
                value: self.judge.api_url.clone(),
            });
        }

        if self.judge.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "JUDGE_TIMEOUT_SECONDS",
                value: "0".to_string(),
            });
        }

        if self.security.access_token_expire_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ACCESS_TOKEN_EXPIRE_MINUTES",
                value: "0".to_string(),
            });
        }

        if self.security.login_max_attempts == 0 || self.security.login_window_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "LOGIN_MAX_ATTEMPTS/LOGIN_WINDOW_SECONDS",
                value: format!(
                    "{}/{}",
                    self.security.login_max_attempts, self.security.login_window_seconds
                ),
            });
        }

        if !self.master.email.contains('@') {
            return Err(ConfigError::InvalidValue {
                field: "MASTER_EMAIL",
                value: self.master.email.clone(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if !self.judge.has_credentials() {
            return Err(ConfigError::MissingSecret("JDOODLE_CLIENT_ID/JDOODLE_CLIENT_SECRET"));
        }
        if self.master.password.is_empty() {
            return Err(ConfigError::MissingSecret("MASTER_PASSWORD"));
        }

        Ok(())
    }
}
