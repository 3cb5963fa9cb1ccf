mod endpoint;
mod synchronizer;
mod view_state;


pub use endpoint::Endpoint;
pub use synchronizer::{
    PollingSynchronizer, SyncConfig, SyncHandle, DEFAULT_REQUEST_TIMEOUT, MIN_POLL_INTERVAL,
};
pub use view_state::ViewState;
