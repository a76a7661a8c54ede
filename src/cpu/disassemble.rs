//! A passive disassembler.
//!
//! Reads a bus purely as data — it never touches CPU registers and never
//! triggers a read side effect, since every `Bus::read` call here passes
//! `readonly = true`.

use crate::bus::Bus;
use crate::cpu::addressing::AddrMode;
use crate::cpu::lookup::LOOKUP_TABLE;
use std::collections::BTreeMap;

fn hex(value: u32, digits: usize) -> String {
    format!("${:0width$X}", value, width = digits)
}

/// Disassembles every instruction starting in `[start, end)`, returning a
/// map from the address of each opcode byte to its rendered value: the
/// mnemonic, one space, then the operand (nothing for implied addressing).
/// Lines shorter than 8 characters get a trailing tab, matching the column
/// alignment of the reference disassembler. `end` is exclusive — it is
/// never itself decoded as the start of a new instruction.
pub fn disassemble(bus: &Bus, start: u16, end: u16) -> BTreeMap<u16, String> {
    let mut lines = BTreeMap::new();
    let mut addr = start as u32;

    while addr < end as u32 {
        let line_addr = addr as u16;
        let opcode = bus.read(line_addr, true);
        addr += 1;

        let instr = LOOKUP_TABLE[opcode as usize];
        let mut line = instr.mnemonic.to_string();

        match instr.addr_mode_kind {
            AddrMode::Imp => {}
            AddrMode::Acc => {
                line.push_str(" A");
            }
            AddrMode::Imm => {
                let value = bus.read(addr as u16, true);
                addr += 1;
                line.push_str(&format!(" #{}", hex(value as u32, 2)));
            }
            AddrMode::Zp0 => {
                let lo = bus.read(addr as u16, true);
                addr += 1;
                line.push_str(&format!(" {}", hex(lo as u32, 2)));
            }
            AddrMode::Zpx => {
                let lo = bus.read(addr as u16, true);
                addr += 1;
                line.push_str(&format!(" {},X", hex(lo as u32, 2)));
            }
            AddrMode::Zpy => {
                let lo = bus.read(addr as u16, true);
                addr += 1;
                line.push_str(&format!(" {},Y", hex(lo as u32, 2)));
            }
            AddrMode::Rel => {
                let offset = bus.read(addr as u16, true);
                addr += 1;
                let target = (addr as u16).wrapping_add(if offset & 0x80 != 0 {
                    (offset as u16) | 0xFF00
                } else {
                    offset as u16
                });
                line.push_str(&format!(" {}", hex(target as u32, 4)));
            }
            AddrMode::Abs => {
                let lo = bus.read(addr as u16, true) as u32;
                addr += 1;
                let hi = bus.read(addr as u16, true) as u32;
                addr += 1;
                line.push_str(&format!(" {}", hex((hi << 8) | lo, 4)));
            }
            AddrMode::Abx => {
                let lo = bus.read(addr as u16, true) as u32;
                addr += 1;
                let hi = bus.read(addr as u16, true) as u32;
                addr += 1;
                line.push_str(&format!(" {},X", hex((hi << 8) | lo, 4)));
            }
            AddrMode::Aby => {
                let lo = bus.read(addr as u16, true) as u32;
                addr += 1;
                let hi = bus.read(addr as u16, true) as u32;
                addr += 1;
                line.push_str(&format!(" {},Y", hex((hi << 8) | lo, 4)));
            }
            AddrMode::Ind => {
                let lo = bus.read(addr as u16, true) as u32;
                addr += 1;
                let hi = bus.read(addr as u16, true) as u32;
                addr += 1;
                line.push_str(&format!(" ({})", hex((hi << 8) | lo, 4)));
            }
            AddrMode::Ixd => {
                let zp = bus.read(addr as u16, true);
                addr += 1;
                line.push_str(&format!(" ({},X)", hex(zp as u32, 2)));
            }
            AddrMode::Iyd => {
                let zp = bus.read(addr as u16, true);
                addr += 1;
                line.push_str(&format!(" ({}),Y", hex(zp as u32, 2)));
            }
        }

        if line.len() < 8 {
            line.push('\t');
        }

        lines.insert(line_addr, line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disassembles_lda_immediate() {
        let mut bus = Bus::new();
        bus.write(0x8000, 0xA9);
        bus.write(0x8001, 0x2A);

        let lines = disassemble(&bus, 0x8000, 0x8002);
        assert_eq!(lines[&0x8000], "LDA #$2A");
    }

    #[test]
    fn disassembles_indirect_jmp() {
        let mut bus = Bus::new();
        bus.write(0x8000, 0x6C);
        bus.write(0x8001, 0x00);
        bus.write(0x8002, 0x30);

        let lines = disassemble(&bus, 0x8000, 0x8003);
        assert_eq!(lines[&0x8000], "JMP ($3000)");
    }

    #[test]
    fn disassembles_relative_branch_with_resolved_target() {
        let mut bus = Bus::new();
        bus.write(0x8000, 0xF0); // BEQ
        bus.write(0x8001, 0x05);

        let lines = disassemble(&bus, 0x8000, 0x8002);
        assert_eq!(lines[&0x8000], "BEQ $8007");
    }

    #[test]
    fn indexed_operands_have_no_space_before_the_register() {
        let mut bus = Bus::new();
        bus.write(0x8000, 0xB5); // LDA zpx
        bus.write(0x8001, 0x10);

        let lines = disassemble(&bus, 0x8000, 0x8002);
        assert_eq!(lines[&0x8000], "LDA $10,X");
    }

    #[test]
    fn end_address_is_exclusive() {
        let mut bus = Bus::new();
        bus.write(0x8000, 0xA9); // LDA #imm
        bus.write(0x8001, 0x00);
        bus.write(0x8002, 0xEA); // NOP

        let lines = disassemble(&bus, 0x8000, 0x8002);
        assert!(lines.contains_key(&0x8000));
        assert!(!lines.contains_key(&0x8001));
        assert!(!lines.contains_key(&0x8002));
    }
}
