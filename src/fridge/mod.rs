//! Fridge photo analysis
//!
//! Turns a photo of a fridge interior into a list of visible food item names
//! via the Gemini vision API. Model replies arrive as JSON arrays, often
//! wrapped in markdown code fences that have to be stripped first.

use tracing::debug;

use crate::core::{Result, SousChefError};
use crate::llm::GeminiClient;

const FRIDGE_PROMPT: &str = "You are given a photo of the inside of a fridge. \
    Analyze the image carefully and list all the visible food and beverage \
    items you can identify. Output format: a JSON array of product names, \
    e.g. [\"milk\", \"cheese\", \"eggs\"]. Output the array only.";

/// Extracts visible food items from fridge photos
#[derive(Clone)]
pub struct FridgeAnalyzer {
    client: GeminiClient,
}

impl FridgeAnalyzer {
    /// Create a new analyzer
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Analyze a photo and return the detected item names.
    ///
    /// Fails with `MalformedAnalysis` when the captioning reply cannot be
    /// parsed as a list of item names.
    pub async fn analyze(&self, mime_type: &str, image: &[u8]) -> Result<Vec<String>> {
        let response = self
            .client
            .generate_with_image(FRIDGE_PROMPT, mime_type, image)
            .await?;

        let items = parse_item_list(&response)?;
        debug!(?items, "detected items in fridge photo");
        Ok(items)
    }
}

/// Parse a model reply into a list of item names
fn parse_item_list(response: &str) -> Result<Vec<String>> {
    let cleaned = clean_model_output(response);
    serde_json::from_str::<Vec<String>>(&cleaned).map_err(|e| {
        SousChefError::MalformedAnalysis(format!(
            "captioning reply is not a JSON item list ({}): {}",
            e, response
        ))
    })
}

/// Strip markdown code fences and control characters from a model reply
fn clean_model_output(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);

    trimmed.chars().filter(|c| !c.is_control()).collect()
}
