/*!
 * Per-user conversational session state and the store that holds it.
 *
 * This module handles:
 * - The `Session` data carried for each user (level, exercise, pending answers)
 * - The in-memory `SessionStore` with per-user serialization
 * - Idle-session eviction
 */

pub mod models;
pub mod store;

// Re-export main types
pub use models::{Level, Session};
pub use store::SessionStore;
