use askama::{Error, Template};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct EmailTemplateData {
    pub title: String,
    pub message: String,
    pub button: String,
    pub link: String,
}

#[derive(Template, Debug)]
#[template(path = "email.html")]
pub struct EmailTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub button: &'a str,
    pub link: &'a str,
}

pub fn render_email(data: &EmailTemplateData) -> Result<String, Error> {
    let template = EmailTemplate {
        title: &data.title,
        message: &data.message,
        button: &data.button,
        link: &data.link,
    };

    match template.render() {
        Ok(result) => {
            info!("✅ Rendered email template: {}", data.title);
            Ok(result)
        }
        Err(e) => {
            error!("❌ Failed to render email template: {e}");
            Err(e)
        }
    }
}
