//! A cycle-counting emulator for the MOS 6502 microprocessor.
//!
//! The crate is split into the same three components the hardware itself
//! splits into: a flat-memory [`bus::Bus`], the [`cpu::Cpu`] core (register
//! file, addressing modes, legal and illegal opcodes, interrupts), and a
//! passive [`cpu::disassemble::disassemble`] view over a bus.

pub mod bus;
pub mod cpu;

pub use bus::Bus;
pub use cpu::Cpu;
