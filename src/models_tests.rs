//! Unit tests for data models
//!
//! Tests filter semantics, document construction, and serialization.

#[cfg(test)]
mod tests {
    use crate::models::*;

    fn record(id: &str, price: u64, bedrooms: u32) -> PropertyRecord {
        PropertyRecord {
            id: id.to_string(),
            price,
            bedrooms,
            bathrooms: 2.0,
            sq_ft: 1200,
            description: "Bright condo with ocean views".to_string(),
        }
    }

    // ====== Document Construction Tests ======

    #[test]
    fn test_document_content_includes_feature_summary() {
        let doc = record("P1", 450_000, 3).to_document();
        assert_eq!(
            doc.content,
            "Bright condo with ocean views | Features: 3 Bed, 2 Bath, 1200 sqft."
        );
        assert_eq!(doc.id(), "P1");
        assert_eq!(doc.metadata.price, 450_000);
    }

    #[test]
    fn test_metadata_serializes_flat() {
        let meta = record("P7", 300_000, 2).metadata();
        let value = serde_json::to_value(&meta).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert_eq!(object["id"], "P7");
        assert_eq!(object["price"], 300_000);
        assert_eq!(object["bedrooms"], 2);
        assert!(object.values().all(|v| !v.is_object()));
    }

    // ====== Filter Tests ======

    #[test]
    fn test_unbounded_filters_admit_everything() {
        let filters = SearchFilters::default();
        assert!(filters.is_unbounded());
        assert!(filters.admits(&record("A", 9_999_999, 0).metadata()));
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let filters = SearchFilters::new(500_000, 0);
        assert!(filters.admits(&record("A", 500_000, 1).metadata()));
        assert!(!filters.admits(&record("B", 500_001, 1).metadata()));
    }

    #[test]
    fn test_min_bedrooms_is_inclusive() {
        let filters = SearchFilters::new(0, 2);
        assert!(filters.admits(&record("A", 1, 2).metadata()));
        assert!(!filters.admits(&record("B", 1, 1).metadata()));
    }

    #[test]
    fn test_unparsed_price_passes_budget() {
        // Price 0 means the corpus price was unreadable; it never exceeds a budget
        let filters = SearchFilters::new(100_000, 0);
        assert!(filters.admits(&record("A", 0, 1).metadata()));
    }

    // ====== Request / Response Tests ======

    #[test]
    fn test_request_from_preferences() {
        let request =
            MatchRequest::from_preferences("$500k", 2, "modern apartment near the beach");
        assert_eq!(
            request.user_input,
            "I have a strict budget of $500k. I need minimum 2 bedrooms. My preferences are: modern apartment near the beach"
        );
    }

    #[test]
    fn test_details_from_document() {
        let doc = record("P3", 275_000, 1).to_document();
        let details = PropertyDetails::from(&doc);
        assert_eq!(details.id, "P3");
        assert_eq!(details.price, 275_000);
        assert_eq!(details.content, doc.content);
    }

    #[test]
    fn test_response_serializes_final_response_key() {
        let response = MatchResponse {
            optimized_query: "beach".to_string(),
            filters: SearchFilters::new(1, 1),
            final_response: Vec::new(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value["final_response"].as_array().unwrap().is_empty());
        assert_eq!(value["filters"]["max_price"], 1);
    }
}
