//! Test modules for the priority queue
//!
//! Tests are organized by functional area for better maintainability.

mod core_functionality;
