//! Blocking, sequential playback through the default output device.

mod player;
mod sink;

pub use player::Player;

#[cfg(test)]
mod tests;
