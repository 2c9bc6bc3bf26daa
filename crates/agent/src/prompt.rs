//! Stylist prompt assembly.

use fitfinder_core::domain::size::SizeToken;
use fitfinder_core::RecommendationRequest;

use crate::llm::ChatCompletion;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI stylist.";

pub fn build_prompt(request: &RecommendationRequest) -> String {
    let profile = &request.profile;
    let size_choices =
        SizeToken::ALL.iter().map(SizeToken::as_str).collect::<Vec<_>>().join(",");

    let lines = [
        format!(
            "You are a friendly virtual stylist for {}. Based on the customer's information:",
            request.retailer
        ),
        format!("- Name: {}", profile.name),
        format!("- Style: {}", profile.style),
        format!("- Preferred fit: {}", profile.preferred_fit),
        format!("- Brand: {}", request.brand.name),
        format!("- Product: {}", request.product.name),
        format!("- Height: {}", request.height),
        format!("- Weight: {}", request.weight),
        format!("- Usual brand: {}", request.usual_brand),
        format!("- Usual size: {}", request.usual_size),
        format!("- Purchase history: {}", request.history_summary()),
        String::new(),
        format!(
            "Suggest the best fit in {brand} for this product and explain why. \
             Pick a value for <SIZE> from {size_choices}. Please begin your response with: \
             'Recommended size is <SIZE>' followed by a short explanation.",
            brand = request.brand.name
        ),
    ];

    lines.join("\n")
}

pub fn completion_for(request: &RecommendationRequest, temperature: f32) -> ChatCompletion {
    ChatCompletion {
        system: SYSTEM_INSTRUCTION.to_string(),
        user: build_prompt(request),
        temperature,
    }
}

#[cfg(test)]
mod tests {
    use fitfinder_core::{Dataset, FormInput};

    use super::{build_prompt, completion_for, SYSTEM_INSTRUCTION};

    fn jason_request() -> fitfinder_core::RecommendationRequest {
        let dataset = Dataset::embedded().expect("embedded dataset");
        FormInput {
            profile: "Jason".to_string(),
            brand: "Banana Republic".to_string(),
            product: "Heritage Oxford Shirt".to_string(),
            ..FormInput::default()
        }
        .resolve(&dataset)
        .expect("valid selection")
    }

    #[test]
    fn prompt_embeds_every_customer_field() {
        let prompt = build_prompt(&jason_request());

        for expected in [
            "virtual stylist for GAP Inc.",
            "- Name: Jason",
            "- Style: classic + smart casual",
            "- Preferred fit: regular",
            "- Brand: Banana Republic",
            "- Product: Heritage Oxford Shirt",
            "- Height: 6'0\"",
            "- Weight: 180 lbs",
            "- Usual brand: GAP",
            "- Usual size: L",
        ] {
            assert!(prompt.contains(expected), "prompt should contain `{expected}`:\n{prompt}");
        }
    }

    #[test]
    fn prompt_flattens_history_in_order() {
        let prompt = build_prompt(&jason_request());

        assert!(prompt.contains(
            "- Purchase history: Banana Republic Heritage Oxford Shirt (Size L, Feedback: Too tight), \
             Old Navy Everyday Joggers (Size L, Feedback: Good fit)"
        ));
    }

    #[test]
    fn prompt_asks_for_the_parseable_opening() {
        let prompt = build_prompt(&jason_request());

        assert!(prompt.contains("from XS,S,M,L,XL,XXL"));
        assert!(prompt.contains("begin your response with: 'Recommended size is <SIZE>'"));
        assert!(prompt.contains("best fit in Banana Republic"));
    }

    #[test]
    fn completion_uses_fixed_system_instruction() {
        let completion = completion_for(&jason_request(), 0.7);

        assert_eq!(completion.system, SYSTEM_INSTRUCTION);
        assert_eq!(completion.system, "You are a helpful AI stylist.");
        assert!((completion.temperature - 0.7).abs() < f32::EPSILON);
    }
}
