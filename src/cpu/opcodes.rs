//! The legal instruction set.
//!
//! Every function has the same shape as an addressing mode: it reads
//! `cpu.fetched`/`cpu.abs_address` (set up by the addressing mode that ran
//! just before it), mutates registers/flags/memory, and returns the
//! operation's own page-cross hint.

use crate::bus::Bus;
use crate::cpu::addressing::AddrMode;
use crate::cpu::lookup::LOOKUP_TABLE;
use crate::cpu::{Cpu, StatusFlag};

fn store_shift_result(cpu: &mut Cpu, bus: &mut Bus, value: u8) {
    if LOOKUP_TABLE[cpu.opcode as usize].addr_mode_kind == AddrMode::Acc {
        cpu.a = value;
    } else {
        bus.write(cpu.abs_address, value);
    }
}

/// Add fetched + carry to `A`, in binary or BCD depending on the `D` flag.
///
/// The source's decimal-mode overflow check compares an unsigned `temp`
/// against signed `i8` bounds, which does not translate into meaningful
/// Rust and is widely considered a bug even in the original C++; this
/// reproduces the commonly-emulated convention instead — the same
/// signed-overflow formula as binary mode, applied to the undecimalized sum.
pub fn adc(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    if !cpu.get_flag(StatusFlag::D) {
        let old_a = cpu.a;
        let result: u16 = old_a as u16 + cpu.fetched as u16 + cpu.get_flag(StatusFlag::C) as u16;
        cpu.a = (result & 0x00FF) as u8;

        cpu.set_flag(StatusFlag::C, result > 0xFF);
        cpu.set_flag(StatusFlag::Z, (result & 0xFF) == 0);
        cpu.set_flag(
            StatusFlag::V,
            ((!(old_a as u16 ^ cpu.fetched as u16)) & (old_a as u16 ^ result)) & 0x80 != 0,
        );
        cpu.set_flag(StatusFlag::N, result & 0x80 != 0);
    } else {
        let old_a = cpu.a;
        let carry = cpu.get_flag(StatusFlag::C) as u16;

        let mut al = (old_a as u16 & 0x0F) + (cpu.fetched as u16 & 0x0F) + carry;
        if al >= 0x0A {
            al = ((al + 0x06) & 0x0F) + 0x10;
        }

        let mut temp = (old_a as u16 & 0xF0) + (cpu.fetched as u16 & 0xF0) + al;
        if temp >= 0xA0 {
            temp += 0x60;
        }
        cpu.a = (temp & 0xFF) as u8;

        let bin_result: u16 = old_a as u16 + cpu.fetched as u16 + carry;

        cpu.set_flag(StatusFlag::C, temp >= 0x100);
        cpu.set_flag(StatusFlag::Z, (bin_result & 0xFF) == 0);
        cpu.set_flag(StatusFlag::N, temp & 0x80 != 0);
        cpu.set_flag(
            StatusFlag::V,
            ((!(old_a as u16 ^ cpu.fetched as u16)) & (old_a as u16 ^ bin_result)) & 0x80 != 0,
        );
    }
    true
}

/// Subtract fetched (with borrow) from `A`, in binary or BCD.
pub fn sbc(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    if !cpu.get_flag(StatusFlag::D) {
        let old_a = cpu.a;
        let inverted = cpu.fetched as u16 ^ 0x00FF;
        let result: u16 = old_a as u16 + inverted + cpu.get_flag(StatusFlag::C) as u16;
        cpu.a = (result & 0x00FF) as u8;

        cpu.set_flag(StatusFlag::C, result & 0xFF00 != 0);
        cpu.set_flag(StatusFlag::Z, (result & 0xFF) == 0);
        cpu.set_flag(StatusFlag::N, result & 0x80 != 0);
        cpu.set_flag(
            StatusFlag::V,
            ((!(old_a as u16 ^ inverted)) & (old_a as u16 ^ result)) & 0x80 != 0,
        );
    } else {
        let old_a = cpu.a as i32;
        let fetched = cpu.fetched as i32;
        let carry = cpu.get_flag(StatusFlag::C) as i32;

        let mut temp = old_a - fetched + carry - 1;
        if old_a + carry < fetched + 1 {
            temp -= 0x60;
        }
        if (old_a & 0x0F) + carry < (fetched & 0x0F) + 1 {
            temp -= 0x06;
        }
        cpu.a = (temp & 0xFF) as u8;

        let inverted = cpu.fetched as u16 ^ 0x00FF;
        let bin_result: u16 = old_a as u16 + inverted + carry as u16;

        cpu.set_flag(StatusFlag::C, bin_result & 0xFF00 != 0);
        cpu.set_flag(StatusFlag::Z, (bin_result & 0xFF) == 0);
        cpu.set_flag(StatusFlag::N, bin_result & 0x80 != 0);
        cpu.set_flag(
            StatusFlag::V,
            ((!(old_a as u16 ^ inverted)) & (old_a as u16 ^ bin_result)) & 0x80 != 0,
        );
    }
    true
}

pub fn and(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.a &= cpu.fetched;
    cpu.set_flag(StatusFlag::Z, cpu.a == 0);
    cpu.set_flag(StatusFlag::N, cpu.a & 0x80 != 0);
    true
}

pub fn ora(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.a |= cpu.fetched;
    cpu.set_flag(StatusFlag::Z, cpu.a == 0);
    cpu.set_flag(StatusFlag::N, cpu.a & 0x80 != 0);
    true
}

pub fn eor(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.a ^= cpu.fetched;
    cpu.set_flag(StatusFlag::Z, cpu.a == 0);
    cpu.set_flag(StatusFlag::N, cpu.a & 0x80 != 0);
    true
}

pub fn asl(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    let old = cpu.fetched;
    let result = old << 1;
    cpu.set_flag(StatusFlag::C, old & 0x80 != 0);
    cpu.set_flag(StatusFlag::Z, result == 0);
    cpu.set_flag(StatusFlag::N, result & 0x80 != 0);
    store_shift_result(cpu, bus, result);
    false
}

pub fn lsr(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    let old = cpu.fetched;
    let result = old >> 1;
    cpu.set_flag(StatusFlag::C, old & 0x01 != 0);
    cpu.set_flag(StatusFlag::Z, result == 0);
    cpu.set_flag(StatusFlag::N, result & 0x80 != 0);
    store_shift_result(cpu, bus, result);
    false
}

pub fn rol(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    let old = cpu.fetched;
    let mut result = old << 1;
    result |= cpu.get_flag(StatusFlag::C) as u8;
    cpu.set_flag(StatusFlag::C, old & 0x80 != 0);
    cpu.set_flag(StatusFlag::Z, result == 0);
    cpu.set_flag(StatusFlag::N, result & 0x80 != 0);
    store_shift_result(cpu, bus, result);
    false
}

pub fn ror(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    let old = cpu.fetched;
    let mut result = old >> 1;
    if cpu.get_flag(StatusFlag::C) {
        result |= 0x80;
    }
    cpu.set_flag(StatusFlag::C, old & 0x01 != 0);
    cpu.set_flag(StatusFlag::Z, result == 0);
    cpu.set_flag(StatusFlag::N, result & 0x80 != 0);
    store_shift_result(cpu, bus, result);
    false
}

/// `Z := (A & fetched) == 0`; `V`/`N` come from `fetched`'s own bits 6/7,
/// not from the AND result.
pub fn bit(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let temp = cpu.a & cpu.fetched;
    cpu.set_flag(StatusFlag::Z, temp == 0);
    cpu.set_flag(StatusFlag::V, cpu.fetched & 0x40 != 0);
    cpu.set_flag(StatusFlag::N, cpu.fetched & 0x80 != 0);
    false
}

fn compare(cpu: &mut Cpu, reg: u8) {
    cpu.set_flag(StatusFlag::C, reg >= cpu.fetched);
    cpu.set_flag(StatusFlag::Z, reg == cpu.fetched);
    cpu.set_flag(StatusFlag::N, reg.wrapping_sub(cpu.fetched) & 0x80 != 0);
}

pub fn cmp(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    compare(cpu, cpu.a);
    true
}

pub fn cpx(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    compare(cpu, cpu.x);
    false
}

pub fn cpy(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    compare(cpu, cpu.y);
    false
}

pub fn dec(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.fetched = cpu.fetched.wrapping_sub(1);
    cpu.set_flag(StatusFlag::Z, cpu.fetched == 0);
    cpu.set_flag(StatusFlag::N, cpu.fetched & 0x80 != 0);
    bus.write(cpu.abs_address, cpu.fetched);
    false
}

pub fn dex(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_flag(StatusFlag::Z, cpu.x == 0);
    cpu.set_flag(StatusFlag::N, cpu.x & 0x80 != 0);
    false
}

pub fn dey(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_flag(StatusFlag::Z, cpu.y == 0);
    cpu.set_flag(StatusFlag::N, cpu.y & 0x80 != 0);
    false
}

pub fn inc(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.fetched = cpu.fetched.wrapping_add(1);
    cpu.set_flag(StatusFlag::Z, cpu.fetched == 0);
    cpu.set_flag(StatusFlag::N, cpu.fetched & 0x80 != 0);
    bus.write(cpu.abs_address, cpu.fetched);
    false
}

pub fn inx(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_flag(StatusFlag::Z, cpu.x == 0);
    cpu.set_flag(StatusFlag::N, cpu.x & 0x80 != 0);
    false
}

pub fn iny(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_flag(StatusFlag::Z, cpu.y == 0);
    cpu.set_flag(StatusFlag::N, cpu.y & 0x80 != 0);
    false
}

pub fn jmp(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.pc = cpu.abs_address;
    false
}

/// Pushes `PC - 1` (high then low), then jumps.
pub fn jsr(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.pc = cpu.pc.wrapping_sub(1);
    cpu.push16(bus, cpu.pc);
    cpu.pc = cpu.abs_address;
    false
}

/// Pulls `PC` (low then high), then `PC += 1`.
pub fn rts(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.pc = cpu.pull16(bus);
    cpu.pc = cpu.pc.wrapping_add(1);
    false
}

pub fn lda(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.a = cpu.fetched;
    cpu.set_flag(StatusFlag::Z, cpu.a == 0);
    cpu.set_flag(StatusFlag::N, cpu.a & 0x80 != 0);
    true
}

pub fn ldx(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.x = cpu.fetched;
    cpu.set_flag(StatusFlag::Z, cpu.x == 0);
    cpu.set_flag(StatusFlag::N, cpu.x & 0x80 != 0);
    true
}

pub fn ldy(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.y = cpu.fetched;
    cpu.set_flag(StatusFlag::Z, cpu.y == 0);
    cpu.set_flag(StatusFlag::N, cpu.y & 0x80 != 0);
    true
}

pub fn sta(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    bus.write(cpu.abs_address, cpu.a);
    false
}

pub fn stx(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    bus.write(cpu.abs_address, cpu.x);
    false
}

pub fn sty(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    bus.write(cpu.abs_address, cpu.y);
    false
}

pub fn tax(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.x = cpu.a;
    cpu.set_flag(StatusFlag::Z, cpu.x == 0);
    cpu.set_flag(StatusFlag::N, cpu.x & 0x80 != 0);
    false
}

pub fn tay(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.y = cpu.a;
    cpu.set_flag(StatusFlag::Z, cpu.y == 0);
    cpu.set_flag(StatusFlag::N, cpu.y & 0x80 != 0);
    false
}

pub fn tsx(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.x = cpu.sp;
    cpu.set_flag(StatusFlag::Z, cpu.x == 0);
    cpu.set_flag(StatusFlag::N, cpu.x & 0x80 != 0);
    false
}

pub fn txa(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.a = cpu.x;
    cpu.set_flag(StatusFlag::Z, cpu.a == 0);
    cpu.set_flag(StatusFlag::N, cpu.a & 0x80 != 0);
    false
}

pub fn txs(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.sp = cpu.x;
    false
}

pub fn tya(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.a = cpu.y;
    cpu.set_flag(StatusFlag::Z, cpu.a == 0);
    cpu.set_flag(StatusFlag::N, cpu.a & 0x80 != 0);
    false
}

pub fn clc(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.set_flag(StatusFlag::C, false);
    false
}

pub fn cld(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.set_flag(StatusFlag::D, false);
    false
}

pub fn cli(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.set_flag(StatusFlag::I, false);
    false
}

pub fn clv(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.set_flag(StatusFlag::V, false);
    false
}

pub fn sec(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.set_flag(StatusFlag::C, true);
    false
}

pub fn sed(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.set_flag(StatusFlag::D, true);
    false
}

pub fn sei(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    cpu.set_flag(StatusFlag::I, true);
    false
}

pub fn pha(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.push8(bus, cpu.a);
    false
}

/// Pushes `P` with `B` and `U` forced to 1, then clears `B` in the live
/// register (the pushed copy and the live copy diverge by design).
pub fn php(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    let pushed = cpu.status | StatusFlag::B as u8 | StatusFlag::U as u8;
    cpu.push8(bus, pushed);
    cpu.set_flag(StatusFlag::B, false);
    false
}

pub fn pla(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.a = cpu.pull8(bus);
    cpu.set_flag(StatusFlag::Z, cpu.a == 0);
    cpu.set_flag(StatusFlag::N, cpu.a & 0x80 != 0);
    false
}

pub fn plp(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.status = cpu.pull8(bus);
    cpu.set_flag(StatusFlag::B, false);
    cpu.set_flag(StatusFlag::U, true);
    false
}

fn branch_if(cpu: &mut Cpu, condition: bool) -> bool {
    if condition {
        cpu.cycles += 1;
        cpu.abs_address = cpu.pc.wrapping_add(cpu.rel_address);

        if (cpu.pc & 0xFF00) != (cpu.abs_address & 0xFF00) {
            cpu.cycles += 1;
        }
        cpu.pc = cpu.abs_address;
    }
    false
}

pub fn bcc(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = !cpu.get_flag(StatusFlag::C);
    branch_if(cpu, take)
}

pub fn bcs(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = cpu.get_flag(StatusFlag::C);
    branch_if(cpu, take)
}

pub fn beq(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = cpu.get_flag(StatusFlag::Z);
    branch_if(cpu, take)
}

pub fn bne(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = !cpu.get_flag(StatusFlag::Z);
    branch_if(cpu, take)
}

pub fn bmi(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = cpu.get_flag(StatusFlag::N);
    branch_if(cpu, take)
}

pub fn bpl(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = !cpu.get_flag(StatusFlag::N);
    branch_if(cpu, take)
}

pub fn bvc(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = !cpu.get_flag(StatusFlag::V);
    branch_if(cpu, take)
}

pub fn bvs(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    let take = cpu.get_flag(StatusFlag::V);
    branch_if(cpu, take)
}

/// `PC++`; push `PC` (high, low), push `P | B | U`; set `I`, clear `B`;
/// load `PC` from the IRQ/BRK vector.
pub fn brk(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.push16(bus, cpu.pc);

    let pushed = cpu.status | StatusFlag::B as u8 | StatusFlag::U as u8;
    cpu.push8(bus, pushed);

    cpu.set_flag(StatusFlag::I, true);
    cpu.set_flag(StatusFlag::B, false);

    cpu.pc = cpu.read16(bus, 0xFFFE);
    false
}

/// Pull `P` (clearing `B`, setting `U`), then pull `PC` (no `+1`).
pub fn rti(cpu: &mut Cpu, bus: &mut Bus) -> bool {
    cpu.status = cpu.pull8(bus);
    cpu.set_flag(StatusFlag::B, false);
    cpu.set_flag(StatusFlag::U, true);

    cpu.pc = cpu.pull16(bus);
    false
}

/// The six absolute-indexed unofficial `NOP`s hint a page-cross cycle; the
/// rest are true no-ops.
pub fn nop(cpu: &mut Cpu, _bus: &mut Bus) -> bool {
    matches!(cpu.opcode, 0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Cpu;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bus() -> Bus {
        Bus::new()
    }

    #[fixture]
    fn cpu() -> Cpu {
        Cpu::new()
    }

    #[rstest]
    fn adc_binary_overflow(mut cpu: Cpu, mut bus: Bus) {
        cpu.a = 0x50;
        cpu.fetched = 0x50;
        adc(&mut cpu, &mut bus);
        assert_eq!(cpu.a, 0xA0);
        assert!(!cpu.get_flag(StatusFlag::C));
        assert!(cpu.get_flag(StatusFlag::V));
        assert!(cpu.get_flag(StatusFlag::N));
        assert!(!cpu.get_flag(StatusFlag::Z));
    }

    #[rstest]
    fn adc_decimal_mode(mut cpu: Cpu, mut bus: Bus) {
        cpu.set_flag(StatusFlag::D, true);
        cpu.a = 0x15;
        cpu.fetched = 0x27;
        adc(&mut cpu, &mut bus);
        assert_eq!(cpu.a, 0x42);
        assert!(!cpu.get_flag(StatusFlag::C));
    }

    #[rstest]
    fn adc_then_sbc_round_trips_in_binary_mode(mut cpu: Cpu, mut bus: Bus) {
        cpu.a = 0x10;
        cpu.set_flag(StatusFlag::C, true);
        cpu.fetched = 0x20;
        adc(&mut cpu, &mut bus);
        let carry_after_adc = cpu.get_flag(StatusFlag::C);
        cpu.set_flag(StatusFlag::C, carry_after_adc);
        cpu.fetched = 0x20;
        sbc(&mut cpu, &mut bus);
        assert_eq!(cpu.a, 0x10);
    }

    #[rstest]
    fn branch_taken_with_page_cross_costs_two_extra_cycles(mut cpu: Cpu, mut bus: Bus) {
        cpu.pc = 0x80FF;
        cpu.rel_address = 0x0005;
        cpu.cycles = 2;
        cpu.set_flag(StatusFlag::C, false);
        bcc(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8104);
        assert_eq!(cpu.cycles, 4);
    }

    #[rstest]
    fn jsr_then_rts_restores_stack_pointer(mut cpu: Cpu, mut bus: Bus) {
        cpu.sp = 0xFD;
        cpu.pc = 0x8003;
        cpu.abs_address = 0x8010;
        let sp_before = cpu.sp;

        jsr(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8010);

        rts(&mut cpu, &mut bus);
        assert_eq!(cpu.pc, 0x8003);
        assert_eq!(cpu.sp, sp_before);
    }

    #[rstest]
    fn pha_pla_round_trips(mut cpu: Cpu, mut bus: Bus) {
        cpu.sp = 0xFD;
        cpu.a = 0x42;
        pha(&mut cpu, &mut bus);
        cpu.a = 0x00;
        pla(&mut cpu, &mut bus);
        assert_eq!(cpu.a, 0x42);
    }

    #[rstest]
    fn compare_sets_carry_and_zero(mut cpu: Cpu, mut bus: Bus) {
        cpu.a = 0x40;
        cpu.fetched = 0x40;
        cmp(&mut cpu, &mut bus);
        assert!(cpu.get_flag(StatusFlag::C));
        assert!(cpu.get_flag(StatusFlag::Z));
    }
}
