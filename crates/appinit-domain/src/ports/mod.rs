//! Port traits
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | [`DispatcherAdapter`] | transport adapters (`TcpDispatcher`) and test doubles |
//! | [`UnaryHandler`] | user handlers exposed as procedures |
//! | [`Outbound`] | transport-specific outbound routes behind a `ClientConfig` |

pub mod dispatcher;
pub mod handler;
pub mod outbound;

pub use dispatcher::DispatcherAdapter;
pub use handler::UnaryHandler;
pub use outbound::Outbound;
