use clap::Args;
use fitfinder_agent::{OpenAiCompatibleClient, Recommendation, SizeAdvisor};
use fitfinder_core::config::LoadOptions;
use fitfinder_core::{ApplicationError, FormInput};

use crate::commands::{load_context, CommandResult};

#[derive(Debug, Clone, Default, Args)]
pub struct RecommendArgs {
    #[arg(long, help = "Customer profile to sign in as")]
    pub profile: String,
    #[arg(long, help = "Brand you are shopping")]
    pub brand: String,
    #[arg(long, help = "Product to size, must be sold by --brand")]
    pub product: String,
    #[arg(long, help = "Your height (feet/inches or cm), defaults to the profile's")]
    pub height: Option<String>,
    #[arg(long, help = "Your weight (lbs or kg), defaults to the profile's")]
    pub weight: Option<String>,
    #[arg(long, help = "A brand you usually shop, defaults to the profile's")]
    pub usual_brand: Option<String>,
    #[arg(long, help = "Size you usually wear in that brand (S|M|L|XL)")]
    pub usual_size: Option<String>,
    #[arg(long, help = "Emit the full recommendation as JSON")]
    pub json: bool,
}

impl RecommendArgs {
    fn form_input(&self) -> FormInput {
        FormInput {
            profile: self.profile.clone(),
            brand: self.brand.clone(),
            product: self.product.clone(),
            height: self.height.clone(),
            weight: self.weight.clone(),
            usual_brand: self.usual_brand.clone(),
            usual_size: self.usual_size.clone(),
        }
    }
}

pub fn run(args: &RecommendArgs, options: &LoadOptions) -> CommandResult {
    let (config, dataset) = match load_context("recommend", options) {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    let request = match args.form_input().resolve(&dataset) {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::from_error("recommend", &ApplicationError::from(error));
        }
    };

    let client = match OpenAiCompatibleClient::from_config(&config.llm) {
        Ok(client) => client,
        Err(error) => {
            let error = ApplicationError::Integration(format!("{error:#}"));
            return CommandResult::from_error("recommend", &error);
        }
    };
    let advisor =
        SizeAdvisor::new(client, config.llm.temperature, config.recommendation.precedence);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let recommendation = runtime.block_on(advisor.recommend(&request));

    if args.json {
        return CommandResult::json("recommend", &recommendation);
    }
    CommandResult { exit_code: 0, output: render_human(&recommendation) }
}

pub fn render_human(recommendation: &Recommendation) -> String {
    let product = &recommendation.product;
    [
        format!("Recommended size in {}: {}", recommendation.brand, recommendation.size),
        format!("Why? {}", recommendation.explanation),
        "---".to_string(),
        "Product details".to_string(),
        product.name.clone(),
        format!("Category: {}", product.category),
        format!("Fit: {}", product.fit),
        format!("Price: {}", product.display_price()),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use fitfinder_agent::Recommendation;
    use fitfinder_core::{CatalogEntry, ExtractedSize, SizePrecedence, SizeSource, SizeToken};
    use rust_decimal::Decimal;

    use super::render_human;

    #[test]
    fn human_output_lists_size_explanation_and_product() {
        let recommendation = Recommendation {
            correlation_id: "test".to_string(),
            generated_at: Utc::now(),
            customer: "Jason".to_string(),
            brand: "Banana Republic".to_string(),
            product: CatalogEntry {
                brand: "Banana Republic".to_string(),
                name: "Heritage Oxford Shirt".to_string(),
                category: "Shirt".to_string(),
                fit: "Tailored".to_string(),
                price: Decimal::new(8950, 2),
            },
            usual_brand: "GAP".to_string(),
            usual_size: "L".to_string(),
            resolver_size: SizeToken::Xl,
            stated_size: ExtractedSize::Stated(SizeToken::Xl),
            size: ExtractedSize::Stated(SizeToken::Xl),
            size_source: SizeSource::Model,
            precedence: SizePrecedence::Model,
            explanation: "Recommended size is XL. The shirt is cut close.".to_string(),
            degraded: false,
        };

        assert_eq!(
            render_human(&recommendation),
            "Recommended size in Banana Republic: XL\n\
             Why? Recommended size is XL. The shirt is cut close.\n\
             ---\n\
             Product details\n\
             Heritage Oxford Shirt\n\
             Category: Shirt\n\
             Fit: Tailored\n\
             Price: $89.50"
        );
    }
}
