//! Image buffers and I/O helpers.
//!
//! Color images are handled with the `image` crate's `RgbImage`/`GrayImage`;
//! gradient work runs on the float buffer [`ImageF32`].

pub mod f32;
pub mod io;

pub use self::f32::ImageF32;
