//! Infrastructure layer - sheet persistence and symbol decoding

pub mod decoder;
pub mod persistence;
