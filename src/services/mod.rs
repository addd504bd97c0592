//! Platform implementations shipped with the crate.

pub mod bandcamp;

pub use bandcamp::BandcampService;
