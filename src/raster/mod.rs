pub mod draw;
pub mod io;

pub use self::draw::{dash_lengths, rasterize, Rasterizer};
