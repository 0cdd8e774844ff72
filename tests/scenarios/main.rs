//! Scenario-based tests for runner

mod helpers;

mod execution_order;
mod output_modes;
mod validation;
mod variable_substitution;
