// Assessment generation pipeline.
// Implements: typed parameters, prompt rendering, generation orchestration,
// prompt/assessment HTTP handlers. All generation calls go through
// llm_client; nothing here talks to the endpoint directly.

pub mod handlers;
pub mod params;
pub mod prompts;
pub mod renderer;
pub mod service;
