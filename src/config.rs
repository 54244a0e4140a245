use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub jwt_secret: String,

    // Analytics windows
    pub streak_log_limit: i64,
    pub risk_history_logs: i64,
    pub recent_logs_default_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            // In dev, also allow LAN access (e.g. testing from another device)
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            streak_log_limit: env::var("STREAK_LOOKBACK_LOGS")
                .unwrap_or_else(|_| "90".into())
                .parse()
                .unwrap_or(90),
            risk_history_logs: env::var("RISK_HISTORY_LOGS")
                .unwrap_or_else(|_| "90".into())
                .parse()
                .unwrap_or(90),
            recent_logs_default_days: env::var("RECENT_LOGS_DEFAULT_DAYS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
