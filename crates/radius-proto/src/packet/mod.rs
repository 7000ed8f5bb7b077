mod code;
#[allow(clippy::module_inception)]
mod packet;
mod wire;

pub use code::Code;
pub use packet::{Packet, PacketError};
pub use wire::{PacketParser, decode, decode_strict};
