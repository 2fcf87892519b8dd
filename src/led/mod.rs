pub mod aw20216;

pub use aw20216::Aw20216;
