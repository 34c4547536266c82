//! Integration tests for the pipeline

#[cfg(test)]
mod tests {
    use crate::{prompt, ExtractionConfig, ExtractionError, Phase, ReceiptPipeline};
    use chrono::Datelike;
    use wwallet_domain::traits::SearchHit;
    use wwallet_llm::MockCompletions;
    use wwallet_ocr::{MockRecognizer, OcrError};
    use wwallet_search::MockSearch;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    const RECEIPT_LINES: &[&str] = &["ACME HARDWARE", "Cordless Drill", "$89.99", "03-07-2024"];

    const RECEIPT_JSON: &str = r#"{"itemName":"Cordless Drill","storeName":"ACME Hardware","storeUrl":null,"price":89.99,"purchaseDate":"03-07-2024"}"#;

    fn pipeline(
        completions: MockCompletions,
        recognizer: MockRecognizer,
    ) -> ReceiptPipeline<MockCompletions, MockRecognizer> {
        ReceiptPipeline::new(completions, recognizer, ExtractionConfig::default())
    }

    #[tokio::test]
    async fn test_full_receipt_extraction_flow() {
        let llm = MockCompletions::new(RECEIPT_JSON);
        let pipeline = pipeline(llm, MockRecognizer::new(RECEIPT_LINES));

        let receipt = pipeline.extract_receipt(PNG_HEADER).await.unwrap();

        assert_eq!(receipt.item_name.as_deref(), Some("Cordless Drill"));
        assert_eq!(receipt.store_name.as_deref(), Some("ACME Hardware"));
        assert_eq!(receipt.price, Some(89.99));
        assert_eq!(receipt.formatted_price(), "89.99");

        let date = receipt.parsed_date().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 7, 3));
    }

    #[tokio::test]
    async fn test_receipt_prompt_carries_ocr_text() {
        // Key the canned response to the exact prompt the pipeline should
        // build; a default-response fallback would not prove the wiring.
        let ocr_text = RECEIPT_LINES.join("\n");
        let mut llm = MockCompletions::new("{}");
        llm.add_response(prompt::receipt_extraction_prompt(&ocr_text), RECEIPT_JSON);

        let pipeline = pipeline(llm, MockRecognizer::new(RECEIPT_LINES));
        let receipt = pipeline.extract_receipt(PNG_HEADER).await.unwrap();
        assert_eq!(receipt.item_name.as_deref(), Some("Cordless Drill"));
    }

    #[tokio::test]
    async fn test_invalid_image_propagates() {
        let pipeline = pipeline(
            MockCompletions::new(RECEIPT_JSON),
            MockRecognizer::new(RECEIPT_LINES),
        );

        let result = pipeline.extract_receipt(b"not an image").await;
        assert!(matches!(
            result,
            Err(ExtractionError::Ocr(OcrError::InvalidImage))
        ));
    }

    #[tokio::test]
    async fn test_no_text_found_propagates() {
        let pipeline = pipeline(MockCompletions::new(RECEIPT_JSON), MockRecognizer::empty());

        let result = pipeline.extract_receipt(PNG_HEADER).await;
        assert!(matches!(
            result,
            Err(ExtractionError::Ocr(OcrError::NoTextFound))
        ));
    }

    #[tokio::test]
    async fn test_malformed_model_output_is_not_defaulted() {
        let pipeline = pipeline(
            MockCompletions::new("This is not JSON"),
            MockRecognizer::new(RECEIPT_LINES),
        );

        let result = pipeline.extract_receipt(PNG_HEADER).await;
        assert!(matches!(result, Err(ExtractionError::Decode(_))));
    }

    #[tokio::test]
    async fn test_clean_text_flow() {
        let ocr_text = "ACME HARDWRE\nCordless Dril";
        let mut llm = MockCompletions::new("{}");
        llm.add_response(
            prompt::text_cleanup_prompt(ocr_text),
            r#"{"text":"ACME HARDWARE\nCordless Drill"}"#,
        );

        let pipeline = pipeline(llm, MockRecognizer::new(&["ACME HARDWRE", "Cordless Dril"]));

        let cleaned = pipeline.extract_clean_text(PNG_HEADER).await.unwrap();
        assert_eq!(cleaned, "ACME HARDWARE\nCordless Drill");
    }

    #[tokio::test]
    async fn test_two_phase_warranty_lookup() {
        let config = ExtractionConfig::default();
        let summary = "ACME covers drills for 24 months with proof of purchase. \
                       Source: https://acme.example/warranty";

        let mut llm = MockCompletions::new("{}");
        llm.add_response(
            prompt::warranty_search_prompt("Cordless Drill", Some("ACME Hardware"), &config.jurisdiction),
            summary,
        );
        llm.add_response(
            prompt::warranty_extraction_prompt(summary),
            r#"{"warrantyMonths":24,"conditions":"Proof of purchase required","evidenceUrl":"https://acme.example/warranty"}"#,
        );

        let pipeline = ReceiptPipeline::new(llm.clone(), MockRecognizer::empty(), config);

        let info = pipeline
            .lookup_warranty("Cordless Drill", Some("ACME Hardware"))
            .await
            .unwrap();

        assert_eq!(info.warranty_months, Some(24));
        assert_eq!(
            info.evidence_url.as_deref(),
            Some("https://acme.example/warranty")
        );
        // Exactly one grounding call and one structuring call
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_phase_one_failure_skips_phase_two() {
        let config = ExtractionConfig::default();

        let mut llm = MockCompletions::new("{}");
        llm.add_error(prompt::warranty_search_prompt(
            "Cordless Drill",
            Some("ACME Hardware"),
            &config.jurisdiction,
        ));

        let pipeline = ReceiptPipeline::new(llm.clone(), MockRecognizer::empty(), config);

        let result = pipeline
            .lookup_warranty("Cordless Drill", Some("ACME Hardware"))
            .await;

        match result {
            Err(ExtractionError::Completion { phase, .. }) => {
                assert_eq!(phase, Phase::Searching)
            }
            other => panic!("Expected Searching-phase failure, got {:?}", other),
        }
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_phase_two_decode_failure_propagates() {
        let config = ExtractionConfig::default();
        let summary = "No findable policy.";

        let mut llm = MockCompletions::new("{}");
        llm.add_response(
            prompt::warranty_search_prompt("Widget", None, &config.jurisdiction),
            summary,
        );
        llm.add_response(
            prompt::warranty_extraction_prompt(summary),
            "I could not determine the warranty.",
        );

        let pipeline = ReceiptPipeline::new(llm, MockRecognizer::empty(), config);

        let result = pipeline.lookup_warranty("Widget", None).await;
        assert!(matches!(result, Err(ExtractionError::Decode(_))));
    }

    #[tokio::test]
    async fn test_lookup_policies_sub_flows_are_independent() {
        let config = ExtractionConfig::default();
        let return_summary = "30 day change of mind returns at ACME.";

        let mut llm = MockCompletions::new("{}");
        // Warranty grounding fails...
        llm.add_error(prompt::warranty_search_prompt(
            "Cordless Drill",
            Some("ACME Hardware"),
            &config.jurisdiction,
        ));
        // ...while the return-policy sub-flow completes both phases.
        llm.add_response(
            prompt::return_policy_search_prompt(
                "ACME Hardware",
                Some("Cordless Drill"),
                &config.jurisdiction,
            ),
            return_summary,
        );
        llm.add_response(
            prompt::return_policy_extraction_prompt(return_summary),
            r#"{"returnDays":30,"conditions":"Change of mind, receipt required","evidenceUrl":null}"#,
        );

        let pipeline = ReceiptPipeline::new(llm, MockRecognizer::empty(), config);

        let (warranty, return_policy) =
            pipeline.lookup_policies("Cordless Drill", "ACME Hardware").await;

        assert!(matches!(
            warranty,
            Err(ExtractionError::Completion { phase: Phase::Searching, .. })
        ));
        let return_policy = return_policy.unwrap();
        assert_eq!(return_policy.return_days, Some(30));
    }

    #[tokio::test]
    async fn test_empty_item_name_searches_by_store() {
        let config = ExtractionConfig::default();
        let summary = "ACME sells everything with a 12 month store warranty.";

        let mut llm = MockCompletions::new("{}");
        llm.add_response(
            prompt::warranty_search_prompt("", Some("ACME Hardware"), &config.jurisdiction),
            summary,
        );
        llm.add_response(
            prompt::warranty_extraction_prompt(summary),
            r#"{"warrantyMonths":12,"conditions":"Store warranty","evidenceUrl":null}"#,
        );

        let pipeline = ReceiptPipeline::new(llm, MockRecognizer::empty(), config);

        let info = pipeline
            .lookup_warranty("", Some("ACME Hardware"))
            .await
            .unwrap();
        assert_eq!(info.warranty_months, Some(12));
    }

    #[tokio::test]
    async fn test_empty_item_and_store_rejected_before_any_call() {
        let llm = MockCompletions::new("{}");
        let pipeline = ReceiptPipeline::new(
            llm.clone(),
            MockRecognizer::empty(),
            ExtractionConfig::default(),
        );

        let result = pipeline.lookup_warranty("", None).await;
        assert!(matches!(result, Err(ExtractionError::InvalidInput(_))));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_grounded_warranty_lookup() {
        let config = ExtractionConfig::default();
        let hits = vec![
            SearchHit {
                title: "ACME warranty".to_string(),
                url: "https://acme.example/warranty".to_string(),
                snippet: "All power tools carry a 24 month warranty.".to_string(),
            },
            SearchHit {
                title: "Forum thread".to_string(),
                url: "https://forum.example/t/1".to_string(),
                snippet: "Mine was repaired under warranty.".to_string(),
            },
        ];
        let summary = prompt::search_summary(&hits);

        let mut llm = MockCompletions::new("{}");
        llm.add_response(
            prompt::warranty_extraction_prompt(&summary),
            r#"{"warrantyMonths":24,"conditions":"Power tools only","evidenceUrl":"https://acme.example/warranty"}"#,
        );

        let pipeline = ReceiptPipeline::new(llm.clone(), MockRecognizer::empty(), config);

        let info = pipeline
            .lookup_warranty_with(&MockSearch::new(hits), "Cordless Drill", Some("ACME"))
            .await
            .unwrap();

        assert_eq!(info.warranty_months, Some(24));
        // Only the structuring phase hits the completion provider
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_search_grounded_lookup_with_no_results() {
        let pipeline = ReceiptPipeline::new(
            MockCompletions::new("{}"),
            MockRecognizer::empty(),
            ExtractionConfig::default(),
        );

        let result = pipeline
            .lookup_return_policy_with(&MockSearch::empty(), "ACME Hardware")
            .await;

        match result {
            Err(ExtractionError::Search(message)) => {
                assert!(message.contains("no search results"))
            }
            other => panic!("Expected Search error, got {:?}", other),
        }
    }
}
