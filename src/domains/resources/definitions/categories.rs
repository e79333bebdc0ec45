//! Default expense categories resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Category labels suggested to clients, in display order.
///
/// Expenses are not restricted to these; `category` is free text.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Business",
    "Other",
];

/// Default categories resource (static JSON).
pub struct ExpenseCategoriesResource;

impl ResourceDefinition for ExpenseCategoriesResource {
    const URI: &'static str = "expense:///categories";
    const NAME: &'static str = "Expense Categories";
    const DESCRIPTION: &'static str = "The list of default expense categories";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let document = serde_json::json!({ "categories": DEFAULT_CATEGORIES });
        // A json! value of plain strings always serializes
        let text = serde_json::to_string_pretty(&document).unwrap_or_else(|_| document.to_string());
        ResourceContent::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_metadata() {
        assert_eq!(ExpenseCategoriesResource::URI, "expense:///categories");
        assert_eq!(ExpenseCategoriesResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_categories_content() {
        match ExpenseCategoriesResource::content() {
            ResourceContent::Text(text) => {
                let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
                let labels: Vec<_> = parsed["categories"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|v| v.as_str().unwrap())
                    .collect();
                assert_eq!(labels, DEFAULT_CATEGORIES);
                assert_eq!(labels.len(), 10);
                assert_eq!(labels[0], "Food & Dining");
                assert_eq!(labels[9], "Other");
            }
            _ => panic!("Expected Text content"),
        }
    }
}
