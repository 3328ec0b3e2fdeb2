//! Application services - workflows composed from ports

pub mod tenancy;

pub use tenancy::{run_for_each_tenant, switch_to_slug};
