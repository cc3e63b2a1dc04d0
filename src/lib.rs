// Zone model and registry
pub mod zone;

// Alert settings and the transient alert notifier
pub mod alert;

// Tracked child status sample data
pub mod child;

// Session state and dashboard update events
pub mod session;

// HTTP and WebSocket APIs
pub mod api;

// Configuration
pub mod config;
