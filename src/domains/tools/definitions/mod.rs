//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod item;
pub mod playback;
pub mod playlist;
pub mod queue;
pub mod search;

pub use item::{ItemInfoParams, ItemInfoTool};
pub use playback::{PlaybackParams, PlaybackTool};
pub use playlist::{PlaylistParams, PlaylistTool};
pub use queue::{QueueParams, QueueTool};
pub use search::{SearchParams, SearchTool};
