use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_address: String,
}

impl EmailConfig {
    pub fn init() -> Result<Self> {
        let smtp_server =
            std::env::var("SMTP_HOST").context("Missing environment variable: SMTP_HOST")?;
        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .context("SMTP_PORT must be a valid u16 integer")?;
        let smtp_user =
            std::env::var("SMTP_USERNAME").context("Missing environment variable: SMTP_USERNAME")?;
        let smtp_pass =
            std::env::var("SMTP_PASSWORD").context("Missing environment variable: SMTP_PASSWORD")?;
        let from_address =
            std::env::var("SMTP_FROM").context("Missing environment variable: SMTP_FROM")?;

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_user,
            smtp_pass,
            from_address,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PushConfig {
    pub gateway_url: String,
    pub recipient: String,
}

impl PushConfig {
    pub fn init() -> Result<Self> {
        let gateway_url = std::env::var("PUSH_GATEWAY_URL")
            .unwrap_or_else(|_| "https://exp.host/--/api/v2/push/send".to_string());
        let recipient = std::env::var("PUSH_RECIPIENT")
            .context("Missing environment variable: PUSH_RECIPIENT")?;

        Ok(Self {
            gateway_url,
            recipient,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl AiConfig {
    pub fn init() -> Result<Self> {
        let api_url = std::env::var("GROQ_API_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1/chat/completions".to_string());
        let api_key =
            std::env::var("GROQ_API_KEY").context("Missing environment variable: GROQ_API_KEY")?;
        let model = std::env::var("GROQ_MODEL")
            .unwrap_or_else(|_| "llama-3.1-8b-instant".to_string());

        Ok(Self {
            api_url,
            api_key,
            model,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub base_url: String,
    pub client_url: String,
    pub upload_dir: String,
    pub email_config: EmailConfig,
    pub push_config: PushConfig,
    pub ai_config: AiConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
        let client_url =
            std::env::var("CLIENT_URL").context("Missing environment variable: CLIENT_URL")?;
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());

        let email_config = EmailConfig::init().context("failed email config")?;
        let push_config = PushConfig::init().context("failed push config")?;
        let ai_config = AiConfig::init().context("failed ai config")?;

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            base_url,
            client_url,
            upload_dir,
            email_config,
            push_config,
            ai_config,
        })
    }
}
