pub mod rip_reader;
pub use rip_reader::*;
pub mod rip_writer;
pub use rip_writer::RipWriter;

pub mod dot_writer;
pub use dot_writer::DotWriter;
