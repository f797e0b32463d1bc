// Report result resolution.
// Implements: the precedence walk, share-link codec, storage slots, session state.
// The resolution itself is a pure function; the session wrapper and the HTTP
// handlers do the slot I/O around it.

pub mod handlers;
pub mod resolve;
pub mod session;
pub mod share;
pub mod store;
