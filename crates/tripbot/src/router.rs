//! Query Router: free text in, display text out.
//!
//! Sends the user's query plus the tool schema to the completion
//! endpoint, inspects the reply for a selected tool call, and either
//! dispatches it or falls back to the model's direct text. Every
//! transport and parse error is converted to an apologetic sentence
//! embedding the error text — the caller never sees a structured error.

use tracing::{debug, warn};

use crate::data::Datasets;
use crate::tools::{ToolOp, dispatch, tool_definitions};
use crate::{ChatRequest, Message, OpenRouterClient};

/// System instruction sent with every query.
pub const SYSTEM_PROMPT: &str = "You are a travel and food assistant. You answer questions about \
     travel destinations, accommodation options, restaurant menu items, \
     and trip budgets. When a question can be answered from the travel or \
     food data, call the matching function instead of answering directly.";

/// Reply when the model returns neither text nor a tool selection.
const FALLBACK_REPLY: &str =
    "I'm not sure how to help with that. Try asking about destinations, \
     accommodations, food, or trip budgets.";

/// Generation parameters for the routing call.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            model: crate::DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
            temperature: 0.3,
        }
    }
}

fn apologize(error: &str) -> String {
    format!("I'm sorry, I ran into a problem answering that: {error}")
}

/// Route a single free-text query through the model and back.
///
/// Single-shot: no conversation memory, no retries. Any failure along
/// the way degrades to an apologetic string.
pub async fn route_query(
    client: &OpenRouterClient,
    datasets: &Datasets,
    config: &RouterConfig,
    user_text: &str,
) -> String {
    let body = ChatRequest {
        model: Some(config.model.clone()),
        messages: vec![Message::system(SYSTEM_PROMPT), Message::user(user_text)],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        tools: Some(tool_definitions()),
    };

    let completion = match client.chat(&body).await {
        Ok(c) => c,
        Err(e) => {
            warn!("routing failed: {e}");
            return apologize(&e);
        }
    };

    if let Some(call) = completion.tool_calls.first() {
        debug!(
            "model selected tool '{}' with args {}",
            call.function.name, call.function.arguments
        );
        return match ToolOp::resolve(&call.function.name) {
            Ok(op) => dispatch(op, &call.function.arguments, datasets),
            Err(e) => {
                warn!("model selected an unknown tool: {e}");
                apologize(&e.to_string())
            }
        };
    }

    match completion.content {
        Some(text) if !text.trim().is_empty() => text,
        _ => FALLBACK_REPLY.to_string(),
    }
}
