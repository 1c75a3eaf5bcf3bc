//! Integration tests for the spotlight library.

mod campaign_flow;
mod estimator_properties;
mod graph_client;
