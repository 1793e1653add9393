// The diagnosis request/response cycle: prompt construction, the single
// inference call, defensive schema parsing, and derived dashboard metrics.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod handlers;
pub mod metrics;
pub mod models;
pub mod prompts;
pub mod provider;
