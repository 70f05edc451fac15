use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use shared::{
    abstract_trait::{AnalysisServiceTrait, DynProductRepository},
    config::AiConfig,
    domain::responses::{AnalysisResponse, ApiResponse, ProductResponse},
    errors::ServiceError,
    model::Product,
};
use tracing::info;

pub struct AnalysisService {
    repository: DynProductRepository,
    http: Client,
    config: AiConfig,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl AnalysisService {
    pub fn new(repository: DynProductRepository, config: AiConfig, base_url: String) -> Self {
        Self {
            repository,
            http: Client::new(),
            config,
            base_url,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.3,
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("AI request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ServiceError::Upstream(format!(
                "AI gateway returned {}",
                response.status()
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Malformed AI response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::Upstream("AI response contained no choices".to_string()))
    }
}

fn build_prompt(product: &Product) -> String {
    format!(
        "You are a professional food scientist and nutrition expert.\n\n\
         PRODUCT DATA:\n\
         - Name: {}\n\
         - Description: {}\n\
         - Ingredients: {}\n\
         - Expire Date: {}\n\n\
         TASK:\n\
         1. Determine if the ingredients are healthy/unhealthy.\n\
         2. Check risk related to expiry date.\n\
         3. Provide a simple explanation.\n\
         4. Generate a HEALTH SCORE between 0 and 100.\n\n\
         STRICT FORMAT:\n\
         Health Score: <number>\n\
         Analysis: <your explanation>",
        product.name,
        product.description.as_deref().unwrap_or("Not provided"),
        product.ingredients.as_deref().unwrap_or("Not provided"),
        product
            .expire_date
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| "Not provided".to_string()),
    )
}

/// Pulls the number out of a `Health Score: <number>` line. Returns
/// `None` when the reply broke the requested format.
fn extract_health_score(reply: &str) -> Option<i32> {
    let lowered = reply.to_ascii_lowercase();
    let start = lowered.find("health score:")? + "health score:".len();

    let digits: String = reply[start..]
        .chars()
        .skip_while(|c| c.is_whitespace())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

#[async_trait]
impl AnalysisServiceTrait for AnalysisService {
    async fn analyze_product(
        &self,
        product_id: i32,
    ) -> Result<ApiResponse<AnalysisResponse>, ServiceError> {
        let product = self
            .repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        let prompt = build_prompt(&product);
        let ai_analysis = self.complete(&prompt).await?;
        let health_score = extract_health_score(&ai_analysis);

        info!(
            "✅ Product analyzed: {} (score: {health_score:?})",
            product.code
        );

        Ok(ApiResponse::success(
            "Product analyzed successfully",
            AnalysisResponse {
                product: ProductResponse::from(product).resolve_image(&self.base_url),
                health_score,
                ai_analysis,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_score_from_formatted_reply() {
        let reply = "Health Score: 72\nAnalysis: Mostly fine, high sugar.";
        assert_eq!(extract_health_score(reply), Some(72));
    }

    #[test]
    fn extraction_is_case_insensitive_and_skips_whitespace() {
        assert_eq!(extract_health_score("HEALTH SCORE:   88"), Some(88));
        assert_eq!(
            extract_health_score("preamble\nhealth score:5\nrest"),
            Some(5)
        );
    }

    #[test]
    fn missing_or_malformed_score_yields_none() {
        assert_eq!(extract_health_score("Analysis: no score given"), None);
        assert_eq!(extract_health_score("Health Score: high"), None);
    }

    #[test]
    fn prompt_includes_fallbacks_for_missing_fields() {
        let product = Product {
            product_id: 1,
            code: "P1".to_string(),
            name: "Milk".to_string(),
            description: None,
            ingredients: None,
            price: 4999,
            discount_price: 3999,
            image: None,
            expire_date: None,
            created_at: None,
        };

        let prompt = build_prompt(&product);

        assert!(prompt.contains("- Name: Milk"));
        assert!(prompt.contains("- Ingredients: Not provided"));
        assert!(prompt.contains("STRICT FORMAT:"));
    }
}
