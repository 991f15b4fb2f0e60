// Module layout (Clean Architecture style)
// - bootstrap: configuration, wiring and the application router
// - infrastructure: Postgres and in-memory store adapters
// - presentation: HTTP handlers and error mapping
// - application: ports, use cases and the ownership gate
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
