/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// High score lookups and submissions.
pub mod score_service;
