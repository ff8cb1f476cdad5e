mod client;
mod errors;
mod flow;
mod state;

pub use client::PasskeyClient;
pub use errors::FlowError;
pub use flow::{AuthenticationFlow, RegistrationFlow};
pub use state::{FlowState, FlowTracker};
