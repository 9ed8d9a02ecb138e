//! Session store: login, logout, resume and the password flows.

mod state;
mod store;

pub use state::SessionState;
pub use store::SessionStore;
