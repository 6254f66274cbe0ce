pub mod config;
pub mod hero;
pub mod logging;
pub mod messages;
pub mod search;
pub mod service;
pub mod transport;

pub use hero::{Ack, Hero, NewHero};
pub use messages::MessageLog;
pub use search::{HeroSearch, ResultStream, DEFAULT_DEBOUNCE};
pub use service::HeroService;
pub use transport::{CurlTransport, Method, Request, Transport, TransportError};
