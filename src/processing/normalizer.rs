//! Text normalization: lemmatized, lowercased, alphabetic non-stopword tokens

use crate::processing::linguistics::{EnglishModel, LinguisticModel};
use log::debug;
use std::sync::Arc;

pub struct TextNormalizer {
    model: Arc<dyn LinguisticModel>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(EnglishModel::new()))
    }
}

impl TextNormalizer {
    pub fn new(model: Arc<dyn LinguisticModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Space-joined lemmas of every alphabetic, non-stopword token, in order.
    /// Empty text gives an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lemmas: Vec<String> = self
            .model
            .analyze(text)
            .into_iter()
            .filter(|token| token.is_alpha && !token.is_stop)
            .map(|token| token.lemma.to_lowercase())
            .collect();

        debug!("Normalized {} chars into {} tokens", text.len(), lemmas.len());
        lemmas.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::linguistics::Token;

    #[test]
    fn test_normalize_resume_sentence() {
        let normalizer = TextNormalizer::default();
        let normalized = normalizer.normalize("Python developing, with strong teams.");
        assert_eq!(normalized, "python develop strong team");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(TextNormalizer::default().normalize(""), "");
    }

    #[test]
    fn test_drops_numbers_and_stopwords() {
        let normalized = TextNormalizer::default().normalize("The 5 years of Rust and C3PO");
        assert_eq!(normalized, "year rust");
    }

    #[test]
    fn test_possessive_keeps_the_word() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("Python's team"), "python team");
        assert_eq!(normalizer.normalize("Python\u{2019}s team"), "python team");
        assert_eq!(normalizer.normalize("the company's Bachelor's program"), "company bachelor program");
    }

    #[test]
    fn test_deterministic() {
        let normalizer = TextNormalizer::default();
        let text = "Managed cloud deployments across regions";
        assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
    }

    struct UppercaseModel;

    impl LinguisticModel for UppercaseModel {
        fn name(&self) -> &str {
            "upper"
        }

        fn analyze(&self, text: &str) -> Vec<Token> {
            text.split_whitespace()
                .map(|w| Token {
                    text: w.to_string(),
                    lemma: w.to_uppercase(),
                    is_alpha: true,
                    is_stop: w == "skip",
                })
                .collect()
        }
    }

    #[test]
    fn test_injected_model_is_used_and_lowercased() {
        let normalizer = TextNormalizer::new(Arc::new(UppercaseModel));
        assert_eq!(normalizer.model_name(), "upper");
        assert_eq!(normalizer.normalize("Rust skip Go"), "rust go");
    }
}
