//! Gemini client implementation
//!
//! Async HTTP client for the Gemini generateContent API with forced function
//! calling for tool selection, plus plain text and image generation used by
//! the tool bodies and the fridge analyzer.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

use crate::agent::{History, Scratchpad, ScratchpadEntry};
use crate::core::{Config, Result, SousChefError, ToolCall, ToolDefinition};
use crate::llm::traits::ToolSelector;

/// System prompt used for tool selection unless overridden in config
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful cooking assistant. \
    Answer the user's question by first calling one of the provided tools. \
    Tool results appear in the scratchpad below. Once the scratchpad contains \
    an answer, call final_answer instead of using any more tools.";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    system_prompt: String,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.gemini.api_key.is_empty() {
            return Err(SousChefError::config("GEMINI_API_KEY not set"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.gemini.timeout_secs))
            .build()
            .map_err(|e| SousChefError::gemini(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.gemini.base_url.trim_end_matches('/').to_string(),
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            system_prompt: config
                .agent
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        })
    }

    /// Generate plain text with a one-off system prompt (used by tool bodies)
    pub async fn generate(&self, system_prompt: &str, input: &str) -> Result<String> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "role": "user", "parts": [{ "text": input }] }],
        });

        let response = self.generate_content(&body).await?;
        extract_text(&response)
    }

    /// Generate text from an image (used by the fridge analyzer)
    pub async fn generate_with_image(
        &self,
        system_prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{
                "role": "user",
                "parts": [{
                    "inlineData": {
                        "mimeType": mime_type,
                        "data": BASE64.encode(image),
                    }
                }],
            }],
        });

        let response = self.generate_content(&body).await?;
        extract_text(&response)
    }

    /// Build the tool-selection request body.
    ///
    /// History turns replay as alternating user/model text, oldest first,
    /// followed by the current utterance and then the scratchpad as paired
    /// functionCall/functionResponse parts in production order.
    fn build_select_request(
        &self,
        input: &str,
        history: &History,
        scratchpad: &Scratchpad,
        tools: &[ToolDefinition],
    ) -> Value {
        let mut contents = Vec::new();

        for turn in history.turns() {
            contents.push(json!({ "role": "user", "parts": [{ "text": turn.input }] }));
            contents.push(json!({ "role": "model", "parts": [{ "text": turn.answer }] }));
        }

        contents.push(json!({ "role": "user", "parts": [{ "text": input }] }));

        for entry in scratchpad.entries() {
            match entry {
                ScratchpadEntry::ProposedCall(call) => contents.push(json!({
                    "role": "model",
                    "parts": [{ "functionCall": { "name": call.name, "args": call.arguments } }],
                })),
                ScratchpadEntry::ToolResult { call_id, payload } => {
                    // The alternation invariant guarantees a matching call
                    let name = scratchpad.call_name(call_id).unwrap_or_default();
                    contents.push(json!({
                        "role": "user",
                        "parts": [{ "functionResponse": { "name": name, "response": payload } }],
                    }));
                }
            }
        }

        let declarations: Vec<Value> = tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                })
            })
            .collect();

        json!({
            "systemInstruction": { "parts": [{ "text": self.system_prompt }] },
            "contents": contents,
            "tools": [{ "functionDeclarations": declarations }],
            "toolConfig": { "functionCallingConfig": { "mode": "ANY" } },
            "generationConfig": { "temperature": 0.0 },
        })
    }

    /// POST a generateContent request and return the response body
    async fn generate_content(&self, body: &Value) -> Result<Value> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    SousChefError::gemini(format!("Cannot reach Gemini API at {}", self.base_url))
                } else {
                    SousChefError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SousChefError::gemini(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ToolSelector for GeminiClient {
    async fn select_tool(
        &self,
        input: &str,
        history: &History,
        scratchpad: &Scratchpad,
        tools: &[ToolDefinition],
    ) -> Result<ToolCall> {
        let body = self.build_select_request(input, history, scratchpad, tools);
        let response = self.generate_content(&body).await?;
        parse_tool_call(&response)
    }
}

/// Extract the single proposed tool call from a generateContent response.
///
/// The request forces tool selection, so a reply without a function call is
/// a gateway contract violation. The Gemini API carries no call identifiers;
/// one is generated here so results can be paired with calls.
fn parse_tool_call(body: &Value) -> Result<ToolCall> {
    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| SousChefError::contract("response has no candidate parts"))?;

    let function_call = parts
        .iter()
        .find_map(|part| part.get("functionCall"))
        .ok_or_else(|| SousChefError::contract("model returned no tool call"))?;

    let name = function_call
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| SousChefError::contract("tool call has no name"))?;

    let arguments = function_call
        .get("args")
        .cloned()
        .unwrap_or_else(|| json!({}));

    if !arguments.is_object() {
        return Err(SousChefError::contract(
            "tool call arguments are not a mapping",
        ));
    }

    Ok(ToolCall::new(
        Uuid::new_v4().to_string(),
        name,
        arguments,
    ))
}

/// Pull the first text part out of a generateContent response
fn extract_text(body: &Value) -> Result<String> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| SousChefError::gemini("response has no text content"))
}
