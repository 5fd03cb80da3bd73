// Résumé ingestion: upload → PDF text → prompt → model → JSON → row.
// All model calls go through llm_client::CandidateChain.

pub mod handlers;
pub mod mapping;
pub mod prompts;
pub mod repository;
pub mod storage;
