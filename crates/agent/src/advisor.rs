use chrono::{DateTime, Utc};
use fitfinder_core::domain::product::CatalogEntry;
use fitfinder_core::{
    extract_size, resolve_size, ExtractedSize, RecommendationRequest, SizePrecedence, SizeSource,
    SizeToken,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm::LlmClient;
use crate::prompt::completion_for;

pub const UNAVAILABLE_PREFIX: &str = "AI explanation unavailable. Error:";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub correlation_id: String,
    pub generated_at: DateTime<Utc>,
    pub customer: String,
    pub brand: String,
    pub product: CatalogEntry,
    pub usual_brand: String,
    pub usual_size: String,
    /// Deterministic proposal from the brand's sizing bias.
    pub resolver_size: SizeToken,
    /// Size parsed out of the explanation text.
    pub stated_size: ExtractedSize,
    /// What gets displayed, after `precedence` is applied.
    pub size: ExtractedSize,
    pub size_source: SizeSource,
    pub precedence: SizePrecedence,
    pub explanation: String,
    /// Set when the explanation is the unavailable placeholder.
    pub degraded: bool,
}

pub struct SizeAdvisor<L> {
    llm: L,
    temperature: f32,
    precedence: SizePrecedence,
}

impl<L> SizeAdvisor<L>
where
    L: LlmClient,
{
    pub fn new(llm: L, temperature: f32, precedence: SizePrecedence) -> Self {
        Self { llm, temperature, precedence }
    }

    pub async fn recommend(&self, request: &RecommendationRequest) -> Recommendation {
        let correlation_id = Uuid::new_v4().to_string();
        info!(
            event_name = "advisor.recommendation.started",
            correlation_id = %correlation_id,
            customer = %request.customer_name(),
            brand = %request.brand.name,
            product = %request.product.name,
            "size recommendation started"
        );

        let resolver_size = resolve_size(&request.brand, &request.usual_brand, &request.usual_size);
        info!(
            event_name = "advisor.resolver.proposed",
            correlation_id = %correlation_id,
            bias = request.brand.bias.as_str(),
            usual_size = %request.usual_size,
            proposed = resolver_size.as_str(),
            "resolver proposed size"
        );

        let completion = completion_for(request, self.temperature);
        let (explanation, degraded) = match self.llm.complete(&completion).await {
            Ok(reply) => (reply, false),
            Err(error) => {
                warn!(
                    event_name = "advisor.llm.request_failed",
                    correlation_id = %correlation_id,
                    error = %format!("{error:#}"),
                    "stylist explanation unavailable, continuing without it"
                );
                (format!("{UNAVAILABLE_PREFIX} {error:#}"), true)
            }
        };

        let stated_size = extract_size(&explanation);
        let (size, size_source) = self.precedence.decide(resolver_size, stated_size);

        info!(
            event_name = "advisor.recommendation.completed",
            correlation_id = %correlation_id,
            resolver_size = resolver_size.as_str(),
            stated_size = stated_size.as_str(),
            size = size.as_str(),
            degraded,
            "size recommendation completed"
        );

        Recommendation {
            correlation_id,
            generated_at: Utc::now(),
            customer: request.customer_name().to_string(),
            brand: request.brand.name.clone(),
            product: request.product.clone(),
            usual_brand: request.usual_brand.clone(),
            usual_size: request.usual_size.clone(),
            resolver_size,
            stated_size,
            size,
            size_source,
            precedence: self.precedence,
            explanation,
            degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use fitfinder_core::{
        Dataset, ExtractedSize, FormInput, RecommendationRequest, SizePrecedence, SizeSource,
        SizeToken,
    };

    use crate::llm::{ChatCompletion, LlmClient};

    use super::SizeAdvisor;

    struct ScriptedLlm {
        reply: Result<String, String>,
        seen: Mutex<Vec<ChatCompletion>>,
    }

    impl ScriptedLlm {
        fn replying(text: &str) -> Self {
            Self { reply: Ok(text.to_string()), seen: Mutex::new(Vec::new()) }
        }

        fn failing(error: &str) -> Self {
            Self { reply: Err(error.to_string()), seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, request: &ChatCompletion) -> Result<String> {
            self.seen.lock().expect("seen lock").push(request.clone());
            self.reply.clone().map_err(|error| anyhow!(error))
        }
    }

    fn request(profile: &str, brand: &str, product: &str) -> RecommendationRequest {
        let dataset = Dataset::embedded().expect("embedded dataset");
        FormInput {
            profile: profile.to_string(),
            brand: brand.to_string(),
            product: product.to_string(),
            ..FormInput::default()
        }
        .resolve(&dataset)
        .expect("valid selection")
    }

    fn jason_banana_republic() -> RecommendationRequest {
        request("Jason", "Banana Republic", "Heritage Oxford Shirt")
    }

    #[tokio::test]
    async fn stated_size_supersedes_resolver_proposal() {
        let advisor = SizeAdvisor::new(
            ScriptedLlm::replying("Recommended size is L because the oxford runs long."),
            0.7,
            SizePrecedence::Model,
        );

        let recommendation = advisor.recommend(&jason_banana_republic()).await;

        assert_eq!(recommendation.resolver_size, SizeToken::Xl);
        assert_eq!(recommendation.stated_size, ExtractedSize::Stated(SizeToken::L));
        assert_eq!(recommendation.size, ExtractedSize::Stated(SizeToken::L));
        assert_eq!(recommendation.size_source, SizeSource::Model);
        assert!(!recommendation.degraded);
        assert_eq!(recommendation.product.name, "Heritage Oxford Shirt");
    }

    #[tokio::test]
    async fn failed_call_degrades_to_placeholder_and_sentinel() {
        let advisor = SizeAdvisor::new(
            ScriptedLlm::failing("connection refused"),
            0.7,
            SizePrecedence::Model,
        );

        let recommendation = advisor.recommend(&jason_banana_republic()).await;

        assert_eq!(recommendation.resolver_size, SizeToken::Xl);
        assert!(recommendation.degraded);
        assert_eq!(
            recommendation.explanation,
            "AI explanation unavailable. Error: connection refused"
        );
        assert_eq!(recommendation.size, ExtractedSize::NotSpecified);
        assert_eq!(recommendation.size.to_string(), "Not specified");
        assert_eq!(recommendation.size_source, SizeSource::Unspecified);
    }

    #[tokio::test]
    async fn resolver_fallback_fills_in_when_reply_has_no_size() {
        let advisor = SizeAdvisor::new(
            ScriptedLlm::replying("I'd go with whatever feels comfortable."),
            0.7,
            SizePrecedence::ResolverFallback,
        );

        let recommendation = advisor.recommend(&jason_banana_republic()).await;

        assert_eq!(recommendation.stated_size, ExtractedSize::NotSpecified);
        assert_eq!(recommendation.size, ExtractedSize::Stated(SizeToken::Xl));
        assert_eq!(recommendation.size_source, SizeSource::Resolver);
        assert!(!recommendation.degraded);
    }

    #[tokio::test]
    async fn llm_receives_assembled_prompt_and_temperature() {
        let llm = ScriptedLlm::replying("Recommended size is M.");
        let advisor = SizeAdvisor::new(llm, 0.2, SizePrecedence::Model);

        let recommendation =
            advisor.recommend(&request("Emily", "Athleta", "Ultimate Yoga Leggings")).await;
        assert_eq!(recommendation.resolver_size, SizeToken::M);

        let seen = advisor.llm.seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system, "You are a helpful AI stylist.");
        assert!(seen[0].user.contains("- Name: Emily"));
        assert!((seen[0].temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn each_recommendation_gets_its_own_correlation_id() {
        let advisor = SizeAdvisor::new(
            ScriptedLlm::replying("Recommended size is S."),
            0.7,
            SizePrecedence::Model,
        );
        let request = request("Emily", "Old Navy", "Everyday Joggers");

        let first = advisor.recommend(&request).await;
        let second = advisor.recommend(&request).await;

        assert_eq!(first.resolver_size, SizeToken::S);
        assert_ne!(first.correlation_id, second.correlation_id);
    }
}
