pub mod layout;
mod host;
mod reader;

#[cfg(test)]
pub mod mock;

pub use host::HostMemory;
pub use reader::{ReadMemory, WriteMemory};

#[cfg(test)]
pub use mock::{MockMemory, MockMemoryBuilder};
