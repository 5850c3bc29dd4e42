// Cover letter generation: one shared rule set, one prompt template, one
// outbound call per validated request. All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;
