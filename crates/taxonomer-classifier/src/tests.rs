//! Integration tests for the Classifier

#[cfg(test)]
mod tests {
    use crate::{Classification, Classifier, ClassifierConfig, ClassifierError, Taxonomy, TaxonomySpec};
    use serde_json::{json, Value};
    use std::io::Write;
    use taxonomer_domain::{ChatCompletion, CompletionRequest};
    use taxonomer_llm::MockBackend;

    fn villa_config() -> ClassifierConfig {
        ClassifierConfig::from_json(
            r#"{
                "IAB_categories": true,
                "Gender": true,
                "Topics": true,
                "struct": {
                    "IAB_categories": ["IAB1", "IAB2", "IAB3"],
                    "Age_groups": ["Adult", "Teen"],
                    "Topics": ["Topic1", "Topic2"],
                    "Gender": ["Male"]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_full_classification_flow() {
        let backend = MockBackend::new(
            r#"{"IAB_categories": ["IAB1", "IAB10", "IAB20", "IAB21"], "Gender": ["Female", "Male"], "Topics": ["villas", "travel", "luxury"]}"#,
        );
        let classifier = Classifier::new(backend.clone(), villa_config()).unwrap();

        let outcome = classifier
            .classify("Villa living embodies a unique blend of luxury, comfort, and tranquility")
            .unwrap();

        let labels = outcome.labels().unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels["Topics"], json!(["villas", "travel", "luxury"]));

        let request = backend.last_request().unwrap();
        let properties: Vec<&String> = request.response_format.schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        // Age_groups has an example but no flag
        assert_eq!(properties, vec!["Gender", "IAB_categories", "Topics"]);
        assert!(request.messages[1].content.contains("luxury, comfort, and tranquility."));
    }

    #[test]
    fn test_iab_gender_scenario() {
        let config = ClassifierConfig::default()
            .enable("IAB_categories")
            .enable("Gender")
            .with_example("IAB_categories", json!(["IAB1"]))
            .with_example("Gender", json!(["Male"]));
        let backend = MockBackend::default();
        let classifier = Classifier::new(backend.clone(), config).unwrap();

        classifier.classify("test").unwrap();
        let request = backend.last_request().unwrap();
        let prompt = &request.messages[1].content;

        let base = prompt.find("Webpage to classify is as follows: test.").unwrap();
        let iab = prompt.find(Taxonomy::IabCategories.instruction()).unwrap();
        let gender = prompt.find(Taxonomy::Gender.instruction()).unwrap();
        let closing = prompt.find("Return response in complete json format.").unwrap();
        assert!(base < iab && iab < gender && gender < closing);
        assert!(!prompt.contains(Taxonomy::Topics.instruction()));

        let schema = &request.response_format.schema;
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["properties"].as_object().unwrap().len(), 2);
        assert!(schema["properties"].get("IAB_categories").is_some());
        assert!(schema["properties"].get("Gender").is_some());
    }

    #[test]
    fn test_backend_failure_is_unavailable() {
        let mut backend = MockBackend::default();
        backend.add_error("outage");
        let classifier = Classifier::new(backend, villa_config()).unwrap();

        let outcome = classifier.classify("news about the outage").unwrap();
        assert!(!outcome.is_available());
        assert_eq!(outcome.to_json(), json!({"message": "Unknown error!"}));
    }

    #[test]
    fn test_empty_choices_is_unavailable() {
        let backend = |_: &CompletionRequest| Ok::<_, String>(ChatCompletion::default());
        let classifier = Classifier::new(
            taxonomer_llm::LocalBackend::new(backend, taxonomer_llm::LocalModelOptions::new("m.gguf")),
            villa_config(),
        )
        .unwrap();

        let outcome = classifier.classify("anything").unwrap();
        assert!(matches!(outcome, Classification::Unavailable { .. }));
    }

    #[test]
    fn test_round_trip_content() {
        let content = r#"{"IAB_categories": ["IAB1"], "Gender": "Other", "Nested": {"score": 0.5, "tags": [1, 2]}}"#;
        let classifier = Classifier::new(MockBackend::new(content), villa_config()).unwrap();

        let outcome = classifier.classify("x").unwrap();
        let expected: Value = serde_json::from_str(content).unwrap();
        assert_eq!(outcome.to_json(), expected);
    }

    #[test]
    fn test_malformed_output_propagates() {
        let classifier = Classifier::new(MockBackend::new("IAB1, IAB2"), villa_config()).unwrap();
        let result = classifier.classify("x");
        assert!(matches!(result, Err(ClassifierError::MalformedOutput(_))));
    }

    #[test]
    fn test_no_state_leaks_between_calls() {
        let backend = MockBackend::default();
        let classifier = Classifier::new(backend.clone(), villa_config()).unwrap();

        classifier.classify("first").unwrap();
        let first = backend.last_request().unwrap();
        classifier.classify("first").unwrap();
        let second = backend.last_request().unwrap();

        assert_eq!(first, second);
        assert_eq!(backend.call_count(), 2);
    }

    #[test]
    fn test_custom_taxonomy_end_to_end() {
        let config = ClassifierConfig::default()
            .with_taxonomy(TaxonomySpec::new("Sentiment", "Also, return the overall sentiment."))
            .enable("Sentiment")
            .with_example("Sentiment", json!("positive"));
        let backend = MockBackend::new(r#"{"Sentiment": "positive"}"#);
        let classifier = Classifier::new(backend.clone(), config).unwrap();

        let outcome = classifier.classify("great").unwrap();
        assert_eq!(outcome.labels().unwrap()["Sentiment"], json!("positive"));

        let request = backend.last_request().unwrap();
        assert!(request.messages[1].content.contains("Also, return the overall sentiment."));
        assert_eq!(
            request.response_format.schema["properties"]["Sentiment"],
            json!({"type": "string"})
        );
    }

    #[test]
    fn test_local_classifier_from_config() {
        let mut weights = tempfile::NamedTempFile::new().unwrap();
        weights.write_all(b"GGUF").unwrap();
        let config = villa_config().with_model_path(weights.path());

        let classifier = Classifier::local(config, |options| {
            assert_eq!(options.chat_format, "chatml");
            Ok::<_, String>(|request: &CompletionRequest| {
                assert_eq!(request.response_format.kind, "json_object");
                Ok::<_, String>(ChatCompletion::from_content(r#"{"Gender": ["Male"]}"#))
            })
        })
        .unwrap();

        let outcome = classifier.classify("x").unwrap();
        assert_eq!(outcome.labels().unwrap()["Gender"], json!(["Male"]));
    }

    #[test]
    fn test_local_classifier_ignores_remote_settings() {
        let weights = tempfile::NamedTempFile::new().unwrap();
        let mut config = villa_config()
            .with_host("localhost:8000")
            .with_model_path(weights.path());
        config.timeout_secs = 0;

        let classifier = Classifier::local(config, |_| {
            Ok::<_, String>(|_: &CompletionRequest| {
                Ok::<_, String>(ChatCompletion::from_content(r#"{"Topics": ["villas"]}"#))
            })
        })
        .unwrap();

        let outcome = classifier.classify("x").unwrap();
        assert_eq!(outcome.labels().unwrap()["Topics"], json!(["villas"]));
    }

    #[test]
    fn test_local_classifier_without_model_path() {
        let result = Classifier::local(villa_config(), |_| {
            Ok::<_, String>(|_: &CompletionRequest| Ok::<_, String>(ChatCompletion::default()))
        });
        assert!(matches!(result, Err(ClassifierError::Backend(_))));
    }
}
