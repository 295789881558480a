/*!
 * Conversation core: input classification and the state machine.
 *
 * This module contains:
 * - `input`: inbound event shapes and the single regex classifier
 * - `machine`: the table-driven state machine deciding each transition
 * - `replies`: canned outbound texts and markup descriptors
 *
 * Everything here is pure and transport-agnostic; the controller wires the
 * decided steps to the session store and the generation service.
 */

pub mod input;
pub mod machine;
pub mod replies;

// Re-export main types
pub use input::{ClassifiedInput, InboundEvent, Payload, classify};
pub use machine::{ConversationState, Rejection, Step, advance};
pub use replies::{Markup, Outgoing};
