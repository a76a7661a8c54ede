//! End-to-end scenarios exercised at the clock-tick granularity, each
//! chosen for a specific piece of cycle-accurate behavior.

use mos6502::{Bus, Cpu};
use rstest::{fixture, rstest};

#[fixture]
fn bus() -> Bus {
    Bus::new()
}

fn run_to_completion(cpu: &mut Cpu, bus: &mut Bus) {
    while !cpu.clock(bus) {}
}

/// Scenario 1: `LDA #$00` clears `A` and sets `Z`, leaves `N` clear, and
/// takes exactly 2 cycles.
#[rstest]
fn lda_immediate_sets_flags(mut bus: Bus) {
    bus.write(0xFFFC, 0x00);
    bus.write(0xFFFD, 0x80);
    bus.write(0x8000, 0xA9);
    bus.write(0x8001, 0x00);

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    run_to_completion(&mut cpu, &mut bus);

    let clock_before = cpu.clock_count;
    run_to_completion(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x00);
    assert!(cpu.get_flag(mos6502::cpu::StatusFlag::Z));
    assert!(!cpu.get_flag(mos6502::cpu::StatusFlag::N));
    assert_eq!(cpu.clock_count - clock_before, 2);
}

/// Scenario 2: `$50 + $50` in binary mode overflows into a negative result
/// and sets `V`, without setting `C`.
#[rstest]
fn adc_binary_signed_overflow(mut bus: Bus) {
    bus.write(0xFFFC, 0x00);
    bus.write(0xFFFD, 0x80);
    bus.write(0x8000, 0xA9); // LDA #$50
    bus.write(0x8001, 0x50);
    bus.write(0x8002, 0x69); // ADC #$50
    bus.write(0x8003, 0x50);

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    run_to_completion(&mut cpu, &mut bus);
    run_to_completion(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xA0);
    assert!(cpu.get_flag(mos6502::cpu::StatusFlag::V));
    assert!(cpu.get_flag(mos6502::cpu::StatusFlag::N));
    assert!(!cpu.get_flag(mos6502::cpu::StatusFlag::C));
}

/// Scenario 3: decimal-mode `$15 + $27` yields BCD `$42`.
#[rstest]
fn adc_decimal_mode_bcd_addition(mut bus: Bus) {
    bus.write(0xFFFC, 0x00);
    bus.write(0xFFFD, 0x80);
    bus.write(0x8000, 0xF8); // SED
    bus.write(0x8001, 0xA9); // LDA #$15
    bus.write(0x8002, 0x15);
    bus.write(0x8003, 0x69); // ADC #$27
    bus.write(0x8004, 0x27);

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    run_to_completion(&mut cpu, &mut bus);
    run_to_completion(&mut cpu, &mut bus);
    run_to_completion(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x42);
}

/// Scenario 4: `JMP ($30FF)` reproduces the indirect-addressing page-
/// boundary bug — the high byte wraps within the same page instead of
/// spilling into the next one.
#[rstest]
fn jmp_indirect_page_boundary_bug(mut bus: Bus) {
    bus.write(0xFFFC, 0x00);
    bus.write(0xFFFD, 0x80);
    bus.write(0x8000, 0x6C); // JMP (ind)
    bus.write(0x8001, 0xFF);
    bus.write(0x8002, 0x30);
    bus.write(0x30FF, 0x40);
    bus.write(0x3000, 0x80); // would be read if the bug were absent

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    run_to_completion(&mut cpu, &mut bus);

    assert_eq!(cpu.pc, 0x8040);
}

/// Scenario 5: a taken branch that also crosses a page boundary costs two
/// extra cycles beyond the base two.
#[rstest]
fn branch_taken_across_page_boundary_costs_four_cycles(mut bus: Bus) {
    bus.write(0xFFFC, 0xFD);
    bus.write(0xFFFD, 0x80);
    bus.write(0x80FD, 0x90); // BCC
    bus.write(0x80FE, 0x05); // +5

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);

    let clock_before = cpu.clock_count;
    run_to_completion(&mut cpu, &mut bus);
    let elapsed = cpu.clock_count - clock_before;

    assert_eq!(cpu.pc, 0x8104);
    assert_eq!(elapsed, 4);
}

/// Scenario 6: `JSR` then `RTS` returns to the instruction after the call
/// and leaves the stack pointer exactly where it started.
#[rstest]
fn jsr_rts_preserves_stack_pointer(mut bus: Bus) {
    bus.write(0xFFFC, 0x00);
    bus.write(0xFFFD, 0x80);
    bus.write(0x8000, 0x20); // JSR $9000
    bus.write(0x8001, 0x00);
    bus.write(0x8002, 0x90);
    bus.write(0x8003, 0xEA); // NOP (return lands here)
    bus.write(0x9000, 0x60); // RTS

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    let sp_before = cpu.sp;

    run_to_completion(&mut cpu, &mut bus); // JSR
    assert_eq!(cpu.pc, 0x9000);

    run_to_completion(&mut cpu, &mut bus); // RTS
    assert_eq!(cpu.pc, 0x8003);
    assert_eq!(cpu.sp, sp_before);
}
