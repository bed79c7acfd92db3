//! Conecta Rua: citizens report street problems in Ponta Grossa with photos
//! and a map position, browse them by category and discuss them in comments.
//!
//! The HTTP surface lives in each feature's `routes`. The page-level state
//! types (`features::board::Board`, `features::comments::thread::CommentThread`,
//! `features::reports::selection::ImageSelection`, `features::map::MapView`)
//! drive the same services from a client.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
