pub mod controller;
pub mod state;

pub use controller::{FeedController, FetchMode, FetchOutcome, FetchTicket};
pub use state::FeedState;
