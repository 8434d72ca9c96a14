//! Configuration module
//!
//! Settings are read from the process environment (after loading an optional
//! `.env` file) into `StudioConfig`, wrapped by `Config` which exposes getters.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3002;
const DEFAULT_SMTP_HOST: &str = "in-v3.mailjet.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_EMAIL_FROM: &str = "LIIGHT DESIGN <liightdesigninc@gmail.com>";
const DEFAULT_ADMIN_EMAIL: &str = "liightdesigninc@gmail.com";
const DEFAULT_DKIM_DOMAIN: &str = "liightdesign.com";
const DEFAULT_DKIM_SELECTOR: &str = "liight";
const INTAKE_READ_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Process-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
}

/// SMTP relay settings for the notification dispatcher
#[derive(Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub tls: bool,
    pub from: String,
    /// Outgoing mail is DKIM-signed only when a private key is configured.
    pub dkim: Option<DkimSettings>,
}

/// DKIM signing identity. The key is an RSA private key in PKCS#1 PEM form.
#[derive(Clone)]
pub struct DkimSettings {
    pub private_key: String,
    pub domain: String,
    pub selector: String,
}

impl DkimSettings {
    /// Build settings from the raw environment values. Returns `None` unless
    /// a non-empty private key is present; escaped `\n` sequences in the key
    /// are expanded so single-line env values work.
    pub fn from_parts(
        private_key: Option<String>,
        domain: Option<String>,
        selector: Option<String>,
    ) -> Option<Self> {
        let private_key = private_key.filter(|k| !k.trim().is_empty())?;
        let non_empty = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
        Some(Self {
            private_key: private_key.replace("\\n", "\n"),
            domain: non_empty(domain).unwrap_or_else(|| DEFAULT_DKIM_DOMAIN.to_string()),
            selector: non_empty(selector).unwrap_or_else(|| DEFAULT_DKIM_SELECTOR.to_string()),
        })
    }
}

impl std::fmt::Debug for DkimSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DkimSettings")
            .field("private_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("selector", &self.selector)
            .finish()
    }
}

/// Studio service configuration
#[derive(Clone, Debug)]
pub struct StudioConfig {
    pub base: BaseConfig,
    pub uploads_dir: PathBuf,
    /// Absolute base used to build links to stored uploads (no trailing slash)
    pub public_base_url: String,
    pub smtp: SmtpSettings,
    pub admin_email: String,
    /// Donations never reach a payment processor; when this is off the
    /// donation endpoint refuses requests instead of pretending to charge.
    pub donation_sandbox_mode: bool,
    pub intake_read_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<StudioConfig>);

impl Config {
    fn inner(&self) -> &StudioConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = StudioConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.inner().base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.inner().base.request_timeout_secs
    }

    pub fn uploads_dir(&self) -> &PathBuf {
        &self.inner().uploads_dir
    }

    pub fn public_base_url(&self) -> &str {
        &self.inner().public_base_url
    }

    pub fn smtp(&self) -> &SmtpSettings {
        &self.inner().smtp
    }

    pub fn admin_email(&self) -> &str {
        &self.inner().admin_email
    }

    pub fn donation_sandbox_mode(&self) -> bool {
        self.inner().donation_sandbox_mode
    }

    pub fn intake_read_timeout_secs(&self) -> u64 {
        self.inner().intake_read_timeout_secs
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

impl StudioConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let base = BaseConfig {
            server_port,
            cors_origins,
            environment,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        };

        let smtp = SmtpSettings {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: env::var("SMTP_USER")
                .or_else(|_| env::var("MAILJET_API_KEY"))
                .ok(),
            password: env::var("SMTP_PASSWORD")
                .or_else(|_| env::var("MAILJET_SECRET_KEY"))
                .ok(),
            tls: env_flag("SMTP_TLS", true),
            from: env::var("EMAIL_FROM").unwrap_or_else(|_| DEFAULT_EMAIL_FROM.to_string()),
            dkim: DkimSettings::from_parts(
                env::var("DKIM_PRIVATE_KEY").ok(),
                env::var("DKIM_DOMAIN").ok(),
                env::var("DKIM_KEY_SELECTOR").ok(),
            ),
        };

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port))
            .trim_end_matches('/')
            .to_string();

        let config = StudioConfig {
            base,
            uploads_dir: PathBuf::from(
                env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
            ),
            public_base_url,
            smtp,
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            donation_sandbox_mode: env_flag("DONATION_SANDBOX_MODE", true),
            intake_read_timeout_secs: env::var("INTAKE_READ_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(INTAKE_READ_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if is_production_name(&self.base.environment)
            && self.base.cors_origins.iter().any(|o| o == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.public_base_url.starts_with("http://") && !self.public_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PUBLIC_BASE_URL must be an absolute http(s) URL"
            ));
        }

        if self.smtp.host.trim().is_empty() {
            return Err(anyhow::anyhow!("SMTP_HOST must not be empty"));
        }

        if self.smtp.user.is_some() != self.smtp.password.is_some() {
            return Err(anyhow::anyhow!(
                "SMTP_USER and SMTP_PASSWORD must be set together"
            ));
        }

        if let Some(dkim) = &self.smtp.dkim {
            if !dkim.private_key.contains("PRIVATE KEY") {
                return Err(anyhow::anyhow!(
                    "DKIM_PRIVATE_KEY must be a PEM-encoded private key"
                ));
            }
        }

        if !crate::validation::is_valid_email(&self.admin_email) {
            return Err(anyhow::anyhow!("ADMIN_EMAIL must be a valid email address"));
        }

        if self.intake_read_timeout_secs == 0 || self.base.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "INTAKE_READ_TIMEOUT_SECS and REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }
}
