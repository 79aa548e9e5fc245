#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod board;
#[cfg(feature = "std")]
mod combat;
mod common;
mod config;
pub mod domain;
mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod memory;
mod placement;
#[cfg(feature = "std")]
mod service;
mod ship;
#[cfg(feature = "std")]
pub mod store;
#[cfg(feature = "std")]
pub mod ui;
pub mod win;

pub use bitboard::{BitBoard, BitBoardError, Occupancy};
pub use board::*;
#[cfg(feature = "std")]
pub use combat::*;
pub use common::*;
pub use config::*;
pub use domain::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use memory::MemoryStore;
pub use placement::*;
#[cfg(feature = "std")]
pub use service::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use store::Store;
