// Module layout (Clean Architecture style)
// - bootstrap: configuration and the application context
// - infrastructure: PostgreSQL adapters and embedded migrations
// - presentation: HTTP handlers and routing
// - application: access policy, order assignment, use cases
// - domain: courses, modules, content items, ordering primitives

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
