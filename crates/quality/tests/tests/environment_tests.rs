#[path = "e2e/environment.rs"]
mod environment;
