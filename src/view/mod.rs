//! Presentation collaborators: time text and the transport view model.

mod format;
mod transport;

pub use format::format_time;
pub use transport::{LOADING_LABEL, ToggleIcon, TransportView};
