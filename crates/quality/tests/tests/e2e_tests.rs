#[path = "e2e/scenarios.rs"]
mod scenarios;

#[path = "e2e/causality.rs"]
mod causality;

#[path = "e2e/degenerate_data.rs"]
mod degenerate_data;

#[path = "e2e/configuration.rs"]
mod configuration;
