//! Scenario-based tests for ns-bundle

mod end_to_end;
mod failure_handling;
mod snapshot;
mod version_gating;
