// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "welcome/mod.rs"]
pub mod welcome;
