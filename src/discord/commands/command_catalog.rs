// Discord commands module.
// Prefix commands are parsed by the welcome service; this only holds the
// lifecycle helpers.

// Add a new module for bot presence management
pub mod presence;
