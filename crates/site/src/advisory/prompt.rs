//! Prompt construction and product matching for the plant advisory.

use verdant_core::Product;

/// Canned reply when the advisory cannot answer (API failure, missing
/// config, empty completion). Returned with a 200 so the chat widget shows
/// it like any other reply.
pub const CHAT_FALLBACK: &str = "I'm having trouble reaching our plant experts right now. \
    In the meantime, feel free to browse our catalog or send us a message \
    through the contact form - we're happy to help with any gardening question.";

/// Canned reply for the research endpoint.
pub const RESEARCH_FALLBACK: &str = "Fresh market insights aren't available at the moment. \
    Please try again in a little while.";

/// Longest message/query accepted from the client.
pub const MAX_INPUT_CHARS: usize = 4096;

/// How many matched products accompany a chat reply.
const MAX_MATCHED_PRODUCTS: usize = 5;

/// Build the system prompt for the plant advisory, grounding the model in
/// the live catalog.
#[must_use]
pub fn advisory_system_prompt(products: &[Product]) -> String {
    let mut prompt = String::from(
        "You are the gardening advisor for Verdant Garden Supply, a retailer of \
         plants, seeds, tools, and soil care products. Answer questions about plant \
         selection, care, watering, soil, and seasonal gardening. Be concise and \
         practical. When one of our products genuinely fits the question, you may \
         mention it by name; never invent products we do not carry. If a question \
         is not about gardening, politely steer back to gardening.\n\nOur current catalog:\n",
    );

    for product in products {
        prompt.push_str("- ");
        prompt.push_str(&product.name);
        if product.is_premium {
            prompt.push_str(" (premium)");
        }
        if !product.tags.is_empty() {
            prompt.push_str(" [");
            prompt.push_str(&product.tags.join(", "));
            prompt.push(']');
        }
        prompt.push('\n');
    }

    prompt
}

/// Build the system prompt for the web-research endpoint.
#[must_use]
pub fn research_system_prompt() -> String {
    "You are a horticultural market researcher for Verdant Garden Supply. \
     Given a topic, summarize current consumer trends, seasonal demand, and \
     growing practices relevant to a garden retailer, in a short set of \
     bullet-point insights. Stick to well-established knowledge; do not \
     fabricate statistics."
        .to_string()
}

/// Pick catalog products relevant to a chat exchange.
///
/// Scores each product by how many of its name words and tags occur in the
/// combined user message + reply (case-insensitive, whole-word). Returns at
/// most [`MAX_MATCHED_PRODUCTS`] products, best match first; input order
/// breaks ties.
#[must_use]
pub fn match_products(products: &[Product], exchange: &str) -> Vec<Product> {
    let haystack: Vec<String> = exchange
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(str::to_lowercase)
        .collect();

    let mut scored: Vec<(usize, &Product)> = products
        .iter()
        .filter_map(|product| {
            let score = product_score(product, &haystack);
            (score > 0).then_some((score, product))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_MATCHED_PRODUCTS)
        .map(|(_, p)| p.clone())
        .collect()
}

fn product_score(product: &Product, haystack: &[String]) -> usize {
    let name_hits = product
        .name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .filter(|w| haystack.iter().any(|h| h == &w.to_lowercase()))
        .count();

    let tag_hits = product
        .tags
        .iter()
        .filter(|tag| haystack.iter().any(|h| h == &tag.to_lowercase()))
        .count();

    // Tag matches are deliberate curation; weight them above name collisions
    name_hits + tag_hits * 2
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use verdant_core::{ProductId, Slug};

    use super::*;

    fn product(id: i32, name: &str, tags: &[&str]) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            slug: Slug::generate(name, &[]),
            description: String::new(),
            category_id: None,
            images: vec![],
            is_active: true,
            is_premium: false,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_system_prompt_lists_products() {
        let products = vec![product(1, "Tomato Seeds", &["tomato", "seeds"])];
        let prompt = advisory_system_prompt(&products);
        assert!(prompt.contains("- Tomato Seeds [tomato, seeds]"));
    }

    #[test]
    fn test_match_products_by_name_word() {
        let products = vec![
            product(1, "Tomato Seeds", &[]),
            product(2, "Watering Can", &[]),
        ];
        let matched = match_products(&products, "How often should I water my tomato plants?");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched.first().unwrap().name, "Tomato Seeds");
    }

    #[test]
    fn test_match_products_tags_outrank_names() {
        let products = vec![
            product(1, "Rose Food", &[]),
            product(2, "All-Purpose Fertilizer", &["rose"]),
        ];
        let matched = match_products(&products, "What should I feed my rose bushes?");
        assert_eq!(matched.first().unwrap().name, "All-Purpose Fertilizer");
    }

    #[test]
    fn test_match_products_caps_results() {
        let products: Vec<Product> = (0..10)
            .map(|i| product(i, &format!("Tomato Kit {i}"), &[]))
            .collect();
        let matched = match_products(&products, "tomato");
        assert_eq!(matched.len(), 5);
    }

    #[test]
    fn test_match_products_no_match() {
        let products = vec![product(1, "Watering Can", &[])];
        assert!(match_products(&products, "Do you sell gift cards?").is_empty());
    }

    #[test]
    fn test_match_ignores_short_words() {
        // "can" matches, "a"/"of" never counted
        let products = vec![product(1, "Watering Can", &[])];
        let matched = match_products(&products, "I need a can of something for watering");
        assert_eq!(matched.len(), 1);
    }
}
