use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_access_token_expiry_secs: i64,
    pub jwt_refresh_token_expiry_secs: i64,
    pub frontend_url: String,
    /// Where unauthenticated page requests are sent.
    pub login_path: String,
    /// Cookie carrying the access token for browser sessions.
    pub auth_cookie_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_access_token_expiry_secs: env::var("JWT_ACCESS_TOKEN_EXPIRY_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .unwrap_or(900),
            jwt_refresh_token_expiry_secs: env::var("JWT_REFRESH_TOKEN_EXPIRY_SECS")
                .unwrap_or_else(|_| "604800".to_string())
                .parse()
                .unwrap_or(604800),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            auth_cookie_name: env::var("AUTH_COOKIE_NAME")
                .unwrap_or_else(|_| "access_token".to_string()),
        })
    }

    /// Redirect target for a page that needs a signed-in user.
    pub fn login_redirect(&self, next: &str) -> String {
        format!("{}?next={}", self.login_path, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/learnboard".to_string(),
            database_max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: "secret".to_string(),
            jwt_access_token_expiry_secs: 900,
            jwt_refresh_token_expiry_secs: 604800,
            frontend_url: "http://localhost:5173".to_string(),
            login_path: "/login".to_string(),
            auth_cookie_name: "access_token".to_string(),
        }
    }

    #[test]
    fn login_redirect_carries_next() {
        assert_eq!(config().login_redirect("/dashboard"), "/login?next=/dashboard");
    }

    #[test]
    fn login_redirect_uses_configured_path() {
        let cfg = AppConfig {
            login_path: "/auth/sign-in".to_string(),
            ..config()
        };
        assert_eq!(cfg.login_redirect("/dashboard"), "/auth/sign-in?next=/dashboard");
    }
}
