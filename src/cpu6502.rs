use log::warn;
use phf::phf_map;

use crate::memory::Memory;

#[derive(Debug)]
pub struct CPU<'a> {
    // More info about the 6502 registers can be found here:
    // https://www.nesdev.org/obelisk-6502-guide/registers.html

    // The program counter is a 16 bit register that holds the memory address of
    // the next byte to fetch. Jumps, branches, subroutine calls and interrupts
    // write it directly; every other instruction advances it past its operands.
    pub program_counter: u16,

    // The stack pointer is an 8 bit register holding the low 8 bits of the next
    // free location on the stack. The stack lives in page 0x01
    // (memory space [0x0100 .. 0x01FF]) and grows downwards.
    pub stack_pointer: u8,

    // The accumulator is an 8 bit register used for arithmetic and logical operations.
    pub accumulator: u8,

    // The 8 bit X index register, most commonly used to hold counters or offsets
    // for accessing memory.
    pub x_register: u8,

    // The Y register is similar to the X register in that it is available for
    // holding counters or offsets for memory access.
    pub y_register: u8,

    // As instructions are executed a set of processor flags are set or cleared to
    // record the results of the operation.
    // Each bit in the status register represents a different flag:
    // Bit 7: Negative Flag (N)
    // Bit 6: Overflow Flag (V)
    // Bit 5: Unused (U) (always set to 1)
    // Bit 4: Break Command (B)
    // Bit 3: Decimal Mode Flag (D)
    // Bit 2: Interrupt Disable (I)
    // Bit 1: Zero Flag (Z)
    // Bit 0: Carry Flag (C)
    pub status_register: u8,

    // Clock ticks still owed for the instruction currently in flight. A new
    // opcode is only fetched once this has counted down to zero, which is what
    // stretches each instruction over its documented number of bus cycles.
    pub cycles_remaining: u32,

    // The memory bus. The driver owns it; the CPU borrows it for its lifetime.
    memory: &'a mut Memory,
}

// Each flag corresponds to a bit in the status register
// Values are the bit positions
#[derive(Debug, Clone, Copy)]
pub enum StatusFlag {
    Carry = 0,
    Zero = 1,
    InterruptDisable = 2,
    DecimalMode = 3,
    BreakCommand = 4,
    Unused = 5,
    Overflow = 6,
    Negative = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Absolute,    // e.g. LDA $1234
    AbsoluteX,   // e.g. LDA $1234,X
    AbsoluteY,   // e.g. LDA $1234,Y
    Accumulator, // e.g. ASL A
    Immediate,   // e.g. LDA #$10
    Implicit,    // e.g. CLC, INX (no operand)
    Indirect,    // e.g. JMP ($1234)
    IndirectX,   // e.g. LDA ($10,X)
    IndirectY,   // e.g. LDA ($10),Y
    Relative,    // e.g. BEQ +5
    ZeroPage,    // e.g. LDA $10
    ZeroPageX,   // e.g. LDA $10,X
    ZeroPageY,   // e.g. LDX $10,Y
}

// The 56 documented mnemonics. The dispatch table tags each opcode with one of
// these and `CPU::execute` routes it to the matching handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub(crate) enum Instruction {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC,
    CLD, CLI, CLV, CMP, CPX, CPY, DEC, DEX, DEY, EOR, INC, INX, INY, JMP,
    JSR, LDA, LDX, LDY, LSR, NOP, ORA, PHA, PHP, PLA, PLP, ROL, ROR, RTI,
    RTS, SBC, SEC, SED, SEI, STA, STX, STY, TAX, TAY, TSX, TXA, TXS, TYA,
}

pub fn new_cpu(memory: &mut Memory) -> CPU<'_> {
    CPU {
        program_counter: 0x0000,
        stack_pointer: CPU::STACK_POINTER_AFTER_RESET,
        accumulator: 0x00,
        x_register: 0x00,
        y_register: 0x00,
        status_register: CPU::STATUS_AFTER_RESET,
        cycles_remaining: 0,
        memory,
    }
}

#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct Operand {
    opcode: u8,
    name: &'static str,
    instruction: Instruction,
    addressing_mode: AddressingMode,
    cycles: u8,
    // Indexed read-style instructions take one extra cycle when the effective
    // address lands on a different page than its base. Stores and
    // read-modify-write instructions are priced at the worst case instead.
    page_cross_cycle: bool,
}

impl CPU<'_> {
    pub const STACK_BASE_ADDRESS: u16 = 0x0100;
    pub const STACK_POINTER_AFTER_RESET: u8 = 0xFD;
    pub const STATUS_AFTER_RESET: u8 = 0b0010_0100;
    pub const RESET_CYCLES: u32 = 7;
    pub const NMI_VECTOR_ADDRESS: u16 = 0xFFFA;
    pub const RESET_VECTOR_ADDRESS: u16 = 0xFFFC;
    pub const IRQ_VECTOR_ADDRESS: u16 = 0xFFFE;

    // List of all documented opcodes and their corresponding Operand definitions.
    const OPERAND_MAP: phf::Map<u8, Operand> = phf_map! {
        // ADC Instructions
        0x69 => Operand { opcode: 0x69, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0x65 => Operand { opcode: 0x65, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x75 => Operand { opcode: 0x75, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0x6D => Operand { opcode: 0x6D, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0x7D => Operand { opcode: 0x7D, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },
        0x79 => Operand { opcode: 0x79, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },
        0x61 => Operand { opcode: 0x61, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0x71 => Operand { opcode: 0x71, name: "ADC", instruction: Instruction::ADC, addressing_mode: AddressingMode::IndirectY, cycles: 5, page_cross_cycle: true },

        // AND Instructions
        0x29 => Operand { opcode: 0x29, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0x25 => Operand { opcode: 0x25, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x35 => Operand { opcode: 0x35, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0x2D => Operand { opcode: 0x2D, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0x3D => Operand { opcode: 0x3D, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },
        0x39 => Operand { opcode: 0x39, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },
        0x21 => Operand { opcode: 0x21, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0x31 => Operand { opcode: 0x31, name: "AND", instruction: Instruction::AND, addressing_mode: AddressingMode::IndirectY, cycles: 5, page_cross_cycle: true },

        // ASL Instructions
        0x0A => Operand { opcode: 0x0A, name: "ASL", instruction: Instruction::ASL, addressing_mode: AddressingMode::Accumulator, cycles: 2, page_cross_cycle: false },
        0x06 => Operand { opcode: 0x06, name: "ASL", instruction: Instruction::ASL, addressing_mode: AddressingMode::ZeroPage, cycles: 5, page_cross_cycle: false },
        0x16 => Operand { opcode: 0x16, name: "ASL", instruction: Instruction::ASL, addressing_mode: AddressingMode::ZeroPageX, cycles: 6, page_cross_cycle: false },
        0x0E => Operand { opcode: 0x0E, name: "ASL", instruction: Instruction::ASL, addressing_mode: AddressingMode::Absolute, cycles: 6, page_cross_cycle: false },
        0x1E => Operand { opcode: 0x1E, name: "ASL", instruction: Instruction::ASL, addressing_mode: AddressingMode::AbsoluteX, cycles: 7, page_cross_cycle: false },

        // Branch Instructions
        // Extra cycles for a taken branch are priced by the branch helper, not here.
        0x90 => Operand { opcode: 0x90, name: "BCC", instruction: Instruction::BCC, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },
        0xB0 => Operand { opcode: 0xB0, name: "BCS", instruction: Instruction::BCS, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },
        0xF0 => Operand { opcode: 0xF0, name: "BEQ", instruction: Instruction::BEQ, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },
        0x30 => Operand { opcode: 0x30, name: "BMI", instruction: Instruction::BMI, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },
        0xD0 => Operand { opcode: 0xD0, name: "BNE", instruction: Instruction::BNE, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },
        0x10 => Operand { opcode: 0x10, name: "BPL", instruction: Instruction::BPL, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },
        0x50 => Operand { opcode: 0x50, name: "BVC", instruction: Instruction::BVC, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },
        0x70 => Operand { opcode: 0x70, name: "BVS", instruction: Instruction::BVS, addressing_mode: AddressingMode::Relative, cycles: 2, page_cross_cycle: false },

        // BIT Instructions
        0x24 => Operand { opcode: 0x24, name: "BIT", instruction: Instruction::BIT, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x2C => Operand { opcode: 0x2C, name: "BIT", instruction: Instruction::BIT, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },

        // BRK Instructions
        0x00 => Operand { opcode: 0x00, name: "BRK", instruction: Instruction::BRK, addressing_mode: AddressingMode::Implicit, cycles: 7, page_cross_cycle: false },

        // Flag Clear Instructions
        0x18 => Operand { opcode: 0x18, name: "CLC", instruction: Instruction::CLC, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0xD8 => Operand { opcode: 0xD8, name: "CLD", instruction: Instruction::CLD, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0x58 => Operand { opcode: 0x58, name: "CLI", instruction: Instruction::CLI, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0xB8 => Operand { opcode: 0xB8, name: "CLV", instruction: Instruction::CLV, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },

        // CMP Instructions
        0xC9 => Operand { opcode: 0xC9, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0xC5 => Operand { opcode: 0xC5, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0xD5 => Operand { opcode: 0xD5, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0xCD => Operand { opcode: 0xCD, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0xDD => Operand { opcode: 0xDD, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },
        0xD9 => Operand { opcode: 0xD9, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },
        0xC1 => Operand { opcode: 0xC1, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0xD1 => Operand { opcode: 0xD1, name: "CMP", instruction: Instruction::CMP, addressing_mode: AddressingMode::IndirectY, cycles: 5, page_cross_cycle: true },

        // CPX Instructions
        0xE0 => Operand { opcode: 0xE0, name: "CPX", instruction: Instruction::CPX, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0xE4 => Operand { opcode: 0xE4, name: "CPX", instruction: Instruction::CPX, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0xEC => Operand { opcode: 0xEC, name: "CPX", instruction: Instruction::CPX, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },

        // CPY Instructions
        0xC0 => Operand { opcode: 0xC0, name: "CPY", instruction: Instruction::CPY, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0xC4 => Operand { opcode: 0xC4, name: "CPY", instruction: Instruction::CPY, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0xCC => Operand { opcode: 0xCC, name: "CPY", instruction: Instruction::CPY, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },

        // DEC Instructions
        0xC6 => Operand { opcode: 0xC6, name: "DEC", instruction: Instruction::DEC, addressing_mode: AddressingMode::ZeroPage, cycles: 5, page_cross_cycle: false },
        0xD6 => Operand { opcode: 0xD6, name: "DEC", instruction: Instruction::DEC, addressing_mode: AddressingMode::ZeroPageX, cycles: 6, page_cross_cycle: false },
        0xCE => Operand { opcode: 0xCE, name: "DEC", instruction: Instruction::DEC, addressing_mode: AddressingMode::Absolute, cycles: 6, page_cross_cycle: false },
        0xDE => Operand { opcode: 0xDE, name: "DEC", instruction: Instruction::DEC, addressing_mode: AddressingMode::AbsoluteX, cycles: 7, page_cross_cycle: false },

        // DEX / DEY Instructions
        0xCA => Operand { opcode: 0xCA, name: "DEX", instruction: Instruction::DEX, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0x88 => Operand { opcode: 0x88, name: "DEY", instruction: Instruction::DEY, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },

        // EOR Instructions
        0x49 => Operand { opcode: 0x49, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0x45 => Operand { opcode: 0x45, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x55 => Operand { opcode: 0x55, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0x4D => Operand { opcode: 0x4D, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0x5D => Operand { opcode: 0x5D, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },
        0x59 => Operand { opcode: 0x59, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },
        0x41 => Operand { opcode: 0x41, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0x51 => Operand { opcode: 0x51, name: "EOR", instruction: Instruction::EOR, addressing_mode: AddressingMode::IndirectY, cycles: 5, page_cross_cycle: true },

        // INC Instructions
        0xE6 => Operand { opcode: 0xE6, name: "INC", instruction: Instruction::INC, addressing_mode: AddressingMode::ZeroPage, cycles: 5, page_cross_cycle: false },
        0xF6 => Operand { opcode: 0xF6, name: "INC", instruction: Instruction::INC, addressing_mode: AddressingMode::ZeroPageX, cycles: 6, page_cross_cycle: false },
        0xEE => Operand { opcode: 0xEE, name: "INC", instruction: Instruction::INC, addressing_mode: AddressingMode::Absolute, cycles: 6, page_cross_cycle: false },
        0xFE => Operand { opcode: 0xFE, name: "INC", instruction: Instruction::INC, addressing_mode: AddressingMode::AbsoluteX, cycles: 7, page_cross_cycle: false },

        // INX / INY Instructions
        0xE8 => Operand { opcode: 0xE8, name: "INX", instruction: Instruction::INX, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0xC8 => Operand { opcode: 0xC8, name: "INY", instruction: Instruction::INY, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },

        // JMP Instructions
        0x4C => Operand { opcode: 0x4C, name: "JMP", instruction: Instruction::JMP, addressing_mode: AddressingMode::Absolute, cycles: 3, page_cross_cycle: false },
        0x6C => Operand { opcode: 0x6C, name: "JMP", instruction: Instruction::JMP, addressing_mode: AddressingMode::Indirect, cycles: 5, page_cross_cycle: false },

        // JSR Instructions
        0x20 => Operand { opcode: 0x20, name: "JSR", instruction: Instruction::JSR, addressing_mode: AddressingMode::Absolute, cycles: 6, page_cross_cycle: false },

        // LDA Instructions
        0xA9 => Operand { opcode: 0xA9, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0xA5 => Operand { opcode: 0xA5, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0xB5 => Operand { opcode: 0xB5, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0xAD => Operand { opcode: 0xAD, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0xBD => Operand { opcode: 0xBD, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },
        0xB9 => Operand { opcode: 0xB9, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },
        0xA1 => Operand { opcode: 0xA1, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0xB1 => Operand { opcode: 0xB1, name: "LDA", instruction: Instruction::LDA, addressing_mode: AddressingMode::IndirectY, cycles: 5, page_cross_cycle: true },

        // LDX Instructions
        0xA2 => Operand { opcode: 0xA2, name: "LDX", instruction: Instruction::LDX, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0xA6 => Operand { opcode: 0xA6, name: "LDX", instruction: Instruction::LDX, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0xB6 => Operand { opcode: 0xB6, name: "LDX", instruction: Instruction::LDX, addressing_mode: AddressingMode::ZeroPageY, cycles: 4, page_cross_cycle: false },
        0xAE => Operand { opcode: 0xAE, name: "LDX", instruction: Instruction::LDX, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0xBE => Operand { opcode: 0xBE, name: "LDX", instruction: Instruction::LDX, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },

        // LDY Instructions
        0xA0 => Operand { opcode: 0xA0, name: "LDY", instruction: Instruction::LDY, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0xA4 => Operand { opcode: 0xA4, name: "LDY", instruction: Instruction::LDY, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0xB4 => Operand { opcode: 0xB4, name: "LDY", instruction: Instruction::LDY, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0xAC => Operand { opcode: 0xAC, name: "LDY", instruction: Instruction::LDY, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0xBC => Operand { opcode: 0xBC, name: "LDY", instruction: Instruction::LDY, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },

        // LSR Instructions
        0x4A => Operand { opcode: 0x4A, name: "LSR", instruction: Instruction::LSR, addressing_mode: AddressingMode::Accumulator, cycles: 2, page_cross_cycle: false },
        0x46 => Operand { opcode: 0x46, name: "LSR", instruction: Instruction::LSR, addressing_mode: AddressingMode::ZeroPage, cycles: 5, page_cross_cycle: false },
        0x56 => Operand { opcode: 0x56, name: "LSR", instruction: Instruction::LSR, addressing_mode: AddressingMode::ZeroPageX, cycles: 6, page_cross_cycle: false },
        0x4E => Operand { opcode: 0x4E, name: "LSR", instruction: Instruction::LSR, addressing_mode: AddressingMode::Absolute, cycles: 6, page_cross_cycle: false },
        0x5E => Operand { opcode: 0x5E, name: "LSR", instruction: Instruction::LSR, addressing_mode: AddressingMode::AbsoluteX, cycles: 7, page_cross_cycle: false },

        // NOP Instructions
        0xEA => Operand { opcode: 0xEA, name: "NOP", instruction: Instruction::NOP, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },

        // ORA Instructions
        0x09 => Operand { opcode: 0x09, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0x05 => Operand { opcode: 0x05, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x15 => Operand { opcode: 0x15, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0x0D => Operand { opcode: 0x0D, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0x1D => Operand { opcode: 0x1D, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },
        0x19 => Operand { opcode: 0x19, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },
        0x01 => Operand { opcode: 0x01, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0x11 => Operand { opcode: 0x11, name: "ORA", instruction: Instruction::ORA, addressing_mode: AddressingMode::IndirectY, cycles: 5, page_cross_cycle: true },

        // Stack Instructions
        0x48 => Operand { opcode: 0x48, name: "PHA", instruction: Instruction::PHA, addressing_mode: AddressingMode::Implicit, cycles: 3, page_cross_cycle: false },
        0x08 => Operand { opcode: 0x08, name: "PHP", instruction: Instruction::PHP, addressing_mode: AddressingMode::Implicit, cycles: 3, page_cross_cycle: false },
        0x68 => Operand { opcode: 0x68, name: "PLA", instruction: Instruction::PLA, addressing_mode: AddressingMode::Implicit, cycles: 4, page_cross_cycle: false },
        0x28 => Operand { opcode: 0x28, name: "PLP", instruction: Instruction::PLP, addressing_mode: AddressingMode::Implicit, cycles: 4, page_cross_cycle: false },

        // ROL Instructions
        0x2A => Operand { opcode: 0x2A, name: "ROL", instruction: Instruction::ROL, addressing_mode: AddressingMode::Accumulator, cycles: 2, page_cross_cycle: false },
        0x26 => Operand { opcode: 0x26, name: "ROL", instruction: Instruction::ROL, addressing_mode: AddressingMode::ZeroPage, cycles: 5, page_cross_cycle: false },
        0x36 => Operand { opcode: 0x36, name: "ROL", instruction: Instruction::ROL, addressing_mode: AddressingMode::ZeroPageX, cycles: 6, page_cross_cycle: false },
        0x2E => Operand { opcode: 0x2E, name: "ROL", instruction: Instruction::ROL, addressing_mode: AddressingMode::Absolute, cycles: 6, page_cross_cycle: false },
        0x3E => Operand { opcode: 0x3E, name: "ROL", instruction: Instruction::ROL, addressing_mode: AddressingMode::AbsoluteX, cycles: 7, page_cross_cycle: false },

        // ROR Instructions
        0x6A => Operand { opcode: 0x6A, name: "ROR", instruction: Instruction::ROR, addressing_mode: AddressingMode::Accumulator, cycles: 2, page_cross_cycle: false },
        0x66 => Operand { opcode: 0x66, name: "ROR", instruction: Instruction::ROR, addressing_mode: AddressingMode::ZeroPage, cycles: 5, page_cross_cycle: false },
        0x76 => Operand { opcode: 0x76, name: "ROR", instruction: Instruction::ROR, addressing_mode: AddressingMode::ZeroPageX, cycles: 6, page_cross_cycle: false },
        0x6E => Operand { opcode: 0x6E, name: "ROR", instruction: Instruction::ROR, addressing_mode: AddressingMode::Absolute, cycles: 6, page_cross_cycle: false },
        0x7E => Operand { opcode: 0x7E, name: "ROR", instruction: Instruction::ROR, addressing_mode: AddressingMode::AbsoluteX, cycles: 7, page_cross_cycle: false },

        // RTI / RTS Instructions
        0x40 => Operand { opcode: 0x40, name: "RTI", instruction: Instruction::RTI, addressing_mode: AddressingMode::Implicit, cycles: 6, page_cross_cycle: false },
        0x60 => Operand { opcode: 0x60, name: "RTS", instruction: Instruction::RTS, addressing_mode: AddressingMode::Implicit, cycles: 6, page_cross_cycle: false },

        // SBC Instructions
        0xE9 => Operand { opcode: 0xE9, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::Immediate, cycles: 2, page_cross_cycle: false },
        0xE5 => Operand { opcode: 0xE5, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0xF5 => Operand { opcode: 0xF5, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0xED => Operand { opcode: 0xED, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0xFD => Operand { opcode: 0xFD, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::AbsoluteX, cycles: 4, page_cross_cycle: true },
        0xF9 => Operand { opcode: 0xF9, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::AbsoluteY, cycles: 4, page_cross_cycle: true },
        0xE1 => Operand { opcode: 0xE1, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0xF1 => Operand { opcode: 0xF1, name: "SBC", instruction: Instruction::SBC, addressing_mode: AddressingMode::IndirectY, cycles: 5, page_cross_cycle: true },

        // Flag Set Instructions
        0x38 => Operand { opcode: 0x38, name: "SEC", instruction: Instruction::SEC, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0xF8 => Operand { opcode: 0xF8, name: "SED", instruction: Instruction::SED, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0x78 => Operand { opcode: 0x78, name: "SEI", instruction: Instruction::SEI, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },

        // STA Instructions
        // Indexed stores always pay the worst case, so no page-cross cycle.
        0x85 => Operand { opcode: 0x85, name: "STA", instruction: Instruction::STA, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x95 => Operand { opcode: 0x95, name: "STA", instruction: Instruction::STA, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0x8D => Operand { opcode: 0x8D, name: "STA", instruction: Instruction::STA, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },
        0x9D => Operand { opcode: 0x9D, name: "STA", instruction: Instruction::STA, addressing_mode: AddressingMode::AbsoluteX, cycles: 5, page_cross_cycle: false },
        0x99 => Operand { opcode: 0x99, name: "STA", instruction: Instruction::STA, addressing_mode: AddressingMode::AbsoluteY, cycles: 5, page_cross_cycle: false },
        0x81 => Operand { opcode: 0x81, name: "STA", instruction: Instruction::STA, addressing_mode: AddressingMode::IndirectX, cycles: 6, page_cross_cycle: false },
        0x91 => Operand { opcode: 0x91, name: "STA", instruction: Instruction::STA, addressing_mode: AddressingMode::IndirectY, cycles: 6, page_cross_cycle: false },

        // STX Instructions
        0x86 => Operand { opcode: 0x86, name: "STX", instruction: Instruction::STX, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x96 => Operand { opcode: 0x96, name: "STX", instruction: Instruction::STX, addressing_mode: AddressingMode::ZeroPageY, cycles: 4, page_cross_cycle: false },
        0x8E => Operand { opcode: 0x8E, name: "STX", instruction: Instruction::STX, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },

        // STY Instructions
        0x84 => Operand { opcode: 0x84, name: "STY", instruction: Instruction::STY, addressing_mode: AddressingMode::ZeroPage, cycles: 3, page_cross_cycle: false },
        0x94 => Operand { opcode: 0x94, name: "STY", instruction: Instruction::STY, addressing_mode: AddressingMode::ZeroPageX, cycles: 4, page_cross_cycle: false },
        0x8C => Operand { opcode: 0x8C, name: "STY", instruction: Instruction::STY, addressing_mode: AddressingMode::Absolute, cycles: 4, page_cross_cycle: false },

        // Transfer Instructions
        0xAA => Operand { opcode: 0xAA, name: "TAX", instruction: Instruction::TAX, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0xA8 => Operand { opcode: 0xA8, name: "TAY", instruction: Instruction::TAY, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0xBA => Operand { opcode: 0xBA, name: "TSX", instruction: Instruction::TSX, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0x8A => Operand { opcode: 0x8A, name: "TXA", instruction: Instruction::TXA, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0x9A => Operand { opcode: 0x9A, name: "TXS", instruction: Instruction::TXS, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
        0x98 => Operand { opcode: 0x98, name: "TYA", instruction: Instruction::TYA, addressing_mode: AddressingMode::Implicit, cycles: 2, page_cross_cycle: false },
    };

    pub fn read_u8(&self, addr: u16) -> u8 {
        self.memory.read_u8(addr)
    }

    pub fn write_u8(&mut self, addr: u16, value: u8) {
        self.memory.write_u8(addr, value);
    }

    pub fn read_u16(&self, addr: u16) -> u16 {
        // We use little-endian format: low byte at addr, high byte at addr + 1
        u16::from_le_bytes([self.read_u8(addr), self.read_u8(addr.wrapping_add(1))])
    }

    pub fn write_u16(&mut self, addr: u16, value: u16) {
        // We use little-endian format: low byte at addr, high byte at addr + 1
        let [low, high] = u16::to_le_bytes(value);

        self.write_u8(addr, low);
        self.write_u8(addr.wrapping_add(1), high);
    }

    /// Reads the byte at the program counter and advances past it.
    fn next_u8(&mut self) -> u8 {
        let value = self.read_u8(self.program_counter);
        self.program_counter = self.program_counter.wrapping_add(1);
        value
    }

    /// Reads the little-endian word at the program counter and advances past it.
    fn next_u16(&mut self) -> u16 {
        let value = self.read_u16(self.program_counter);
        self.program_counter = self.program_counter.wrapping_add(2);
        value
    }

    pub fn set_status_flag(&mut self, flag: StatusFlag, value: bool) {
        if value {
            self.status_register |= 1 << (flag as u8);
        } else {
            self.status_register &= !(1 << (flag as u8));
        }
    }

    pub fn get_status_flag(&self, flag: StatusFlag) -> bool {
        (self.status_register & (1 << (flag as u8))) != 0
    }

    /// The address the stack pointer currently designates inside page 0x01.
    pub fn stack_address(&self) -> u16 {
        Self::STACK_BASE_ADDRESS | self.stack_pointer as u16
    }

    /// Pushes a byte onto the stack.
    pub fn push_u8(&mut self, value: u8) {
        self.write_u8(self.stack_address(), value);
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
    }

    /// Pushes a 16-bit word onto the stack.
    /// The high byte is pushed first, then the low byte, so they are stored in
    /// little-endian format on the stack.
    pub fn push_u16(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        // Push high byte first, then low byte
        self.push_u8(high);
        self.push_u8(low);
    }

    /// Pops a byte from the stack.
    pub fn pop_u8(&mut self) -> u8 {
        self.stack_pointer = self.stack_pointer.wrapping_add(1);
        self.read_u8(self.stack_address())
    }

    /// Pops a 16-bit word from the stack.
    /// The low byte is popped first, then the high byte, as they are stored in
    /// little-endian format on the stack.
    pub fn pop_u16(&mut self) -> u16 {
        let low = self.pop_u8();
        let high = self.pop_u8();
        u16::from_le_bytes([low, high])
    }

    /// Puts the CPU into its documented post-reset state. The program counter
    /// is loaded from the reset vector, and the reset sequence itself takes
    /// seven cycles before the first instruction is fetched.
    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.x_register = 0;
        self.y_register = 0;
        self.stack_pointer = Self::STACK_POINTER_AFTER_RESET;
        self.status_register = Self::STATUS_AFTER_RESET;
        self.program_counter = self.read_u16(Self::RESET_VECTOR_ADDRESS);
        self.cycles_remaining = Self::RESET_CYCLES;
    }

    /// Requests a maskable interrupt. Ignored while the interrupt-disable flag
    /// is set; otherwise the current PC and status are stacked and the handler
    /// at the IRQ vector takes over.
    pub fn irq(&mut self) {
        if self.get_status_flag(StatusFlag::InterruptDisable) {
            return;
        }

        self.push_u16(self.program_counter);
        self.push_u8(self.status_register);
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        self.program_counter = self.read_u16(Self::IRQ_VECTOR_ADDRESS);
        self.cycles_remaining += 7;
    }

    /// Delivers a non-maskable interrupt. Unlike `irq`, this cannot be
    /// suppressed by the interrupt-disable flag.
    pub fn nmi(&mut self) {
        self.push_u16(self.program_counter);
        self.push_u8(self.status_register);
        self.program_counter = self.read_u16(Self::NMI_VECTOR_ADDRESS);
        self.cycles_remaining += 8;
    }

    /// Advances the CPU by one bus clock. When no instruction is in flight,
    /// this fetches and executes the opcode under the program counter and
    /// charges its full cycle cost; otherwise it only counts that cost down.
    pub fn tick(&mut self) {
        if self.cycles_remaining == 0 {
            let opcode = self.read_u8(self.program_counter);

            let Some(&operand_info) = Self::OPERAND_MAP.get(&opcode) else {
                // Nothing is mutated, so the next tick re-fetches the same
                // byte unless the driver intervenes.
                warn!(
                    "Unknown opcode {:#04X} at {:#06X}",
                    opcode, self.program_counter
                );
                return;
            };

            self.program_counter = self.program_counter.wrapping_add(1);

            // Fetch operand based on addressing mode
            let (operand_value, operand_address, page_crossed) =
                match operand_info.addressing_mode {
                    AddressingMode::Implicit => (None, None, false),
                    AddressingMode::Accumulator => (Some(self.accumulator), None, false),
                    mode => {
                        let (address, page_crossed) = self.resolve_operand_address(mode);
                        (Some(self.read_u8(address)), Some(address), page_crossed)
                    }
                };

            // Execute the instruction and collect any additional cycles the
            // handler reports (taken branches).
            let handler_extra =
                self.execute(operand_info.instruction, operand_value, operand_address);

            let mut cycles = operand_info.cycles as u32 + handler_extra as u32;
            if page_crossed && operand_info.page_cross_cycle {
                cycles += 1;
            }
            self.cycles_remaining = cycles;
        }

        if self.cycles_remaining > 0 {
            self.cycles_remaining -= 1;
        }
    }

    /// Invokes `tick` exactly `ticks` times. This is the only way the driver
    /// advances the CPU, so elapsed time is always measured in bus clocks.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Branch helper: centralizes branch behavior for relative branches.
    /// `condition` indicates whether the branch should be taken.
    /// `target_address` is the already resolved branch target.
    /// Returns additional cycles: 0 if not taken, +1 if taken, and +2 more if
    /// the target sits on a different page than the instruction that follows
    /// the branch.
    pub(crate) fn branch(&mut self, condition: bool, target_address: u16) -> u8 {
        let mut additional_cycles: u8 = 0;
        if condition {
            additional_cycles += 1; // branch taken
            if (self.program_counter & 0xFF00) != (target_address & 0xFF00) {
                additional_cycles += 2; // page crossed
            }
            self.program_counter = target_address;
        }
        additional_cycles
    }

    /// Compare helper shared by CMP, CPX and CPY: carry means the register is
    /// at least the operand, zero means equality, negative mirrors bit 7 of
    /// the difference. No register is modified.
    pub(crate) fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.set_status_flag(StatusFlag::Carry, register >= value);
        self.set_status_flag(StatusFlag::Zero, register == value);
        self.set_status_flag(StatusFlag::Negative, (result & 0x80) != 0);
    }

    // Helper to get the effective address based on addressing mode. Consumes
    // the operand bytes at the program counter and reports whether the
    // resolved address crossed a page relative to its base.
    pub(crate) fn resolve_operand_address(&mut self, mode: AddressingMode) -> (u16, bool) {
        match mode {
            AddressingMode::Absolute => (self.next_u16(), false),

            AddressingMode::AbsoluteX => {
                let base = self.next_u16();
                let address = base.wrapping_add(self.x_register as u16);
                (address, Self::crosses_page(base, address))
            }

            AddressingMode::AbsoluteY => {
                let base = self.next_u16();
                let address = base.wrapping_add(self.y_register as u16);
                (address, Self::crosses_page(base, address))
            }

            AddressingMode::Immediate => {
                let address = self.program_counter;
                self.program_counter = self.program_counter.wrapping_add(1);
                (address, false)
            }

            AddressingMode::Indirect => {
                let pointer = self.next_u16();
                // 6502 hardware bug: when the pointer sits at the end of a
                // page, the high byte is fetched from the start of that same
                // page instead of the next one.
                let low = self.read_u8(pointer);
                let high = if pointer & 0x00FF == 0x00FF {
                    self.read_u8(pointer & 0xFF00)
                } else {
                    self.read_u8(pointer + 1)
                };
                (u16::from_le_bytes([low, high]), false)
            }

            AddressingMode::IndirectX => {
                let pointer = self.next_u8().wrapping_add(self.x_register);
                let low = self.read_u8(pointer as u16);
                let high = self.read_u8(pointer.wrapping_add(1) as u16);
                (u16::from_le_bytes([low, high]), false)
            }

            AddressingMode::IndirectY => {
                let pointer = self.next_u8();
                let low = self.read_u8(pointer as u16);
                let high = self.read_u8(pointer.wrapping_add(1) as u16);
                let base = u16::from_le_bytes([low, high]);
                let address = base.wrapping_add(self.y_register as u16);
                (address, Self::crosses_page(base, address))
            }

            AddressingMode::Relative => {
                let offset = self.next_u8() as i8;
                // The offset is relative to the instruction after the branch.
                let target = self.program_counter.wrapping_add(offset as u16);
                (target, Self::crosses_page(self.program_counter, target))
            }

            AddressingMode::ZeroPage => (self.next_u8() as u16, false),

            AddressingMode::ZeroPageX => {
                // Zero page indexing wraps inside the zero page.
                ((self.next_u8().wrapping_add(self.x_register)) as u16, false)
            }

            AddressingMode::ZeroPageY => {
                ((self.next_u8().wrapping_add(self.y_register)) as u16, false)
            }

            // Accumulator and Implicit don't use memory addresses
            AddressingMode::Accumulator | AddressingMode::Implicit => {
                panic!("No effective address for {:?}", mode)
            }
        }
    }

    fn crosses_page(base: u16, address: u16) -> bool {
        (base & 0xFF00) != (address & 0xFF00)
    }

    // Routes a decoded instruction to its handler. The handlers live in
    // src/instructions/, one file per mnemonic.
    fn execute(&mut self, instruction: Instruction, value: Option<u8>, address: Option<u16>) -> u8 {
        match instruction {
            Instruction::ADC => self.handle_adc(value, address),
            Instruction::AND => self.handle_and(value, address),
            Instruction::ASL => self.handle_asl(value, address),
            Instruction::BCC => self.handle_bcc(value, address),
            Instruction::BCS => self.handle_bcs(value, address),
            Instruction::BEQ => self.handle_beq(value, address),
            Instruction::BIT => self.handle_bit(value, address),
            Instruction::BMI => self.handle_bmi(value, address),
            Instruction::BNE => self.handle_bne(value, address),
            Instruction::BPL => self.handle_bpl(value, address),
            Instruction::BRK => self.handle_brk(value, address),
            Instruction::BVC => self.handle_bvc(value, address),
            Instruction::BVS => self.handle_bvs(value, address),
            Instruction::CLC => self.handle_clc(value, address),
            Instruction::CLD => self.handle_cld(value, address),
            Instruction::CLI => self.handle_cli(value, address),
            Instruction::CLV => self.handle_clv(value, address),
            Instruction::CMP => self.handle_cmp(value, address),
            Instruction::CPX => self.handle_cpx(value, address),
            Instruction::CPY => self.handle_cpy(value, address),
            Instruction::DEC => self.handle_dec(value, address),
            Instruction::DEX => self.handle_dex(value, address),
            Instruction::DEY => self.handle_dey(value, address),
            Instruction::EOR => self.handle_eor(value, address),
            Instruction::INC => self.handle_inc(value, address),
            Instruction::INX => self.handle_inx(value, address),
            Instruction::INY => self.handle_iny(value, address),
            Instruction::JMP => self.handle_jmp(value, address),
            Instruction::JSR => self.handle_jsr(value, address),
            Instruction::LDA => self.handle_lda(value, address),
            Instruction::LDX => self.handle_ldx(value, address),
            Instruction::LDY => self.handle_ldy(value, address),
            Instruction::LSR => self.handle_lsr(value, address),
            Instruction::NOP => self.handle_nop(value, address),
            Instruction::ORA => self.handle_ora(value, address),
            Instruction::PHA => self.handle_pha(value, address),
            Instruction::PHP => self.handle_php(value, address),
            Instruction::PLA => self.handle_pla(value, address),
            Instruction::PLP => self.handle_plp(value, address),
            Instruction::ROL => self.handle_rol(value, address),
            Instruction::ROR => self.handle_ror(value, address),
            Instruction::RTI => self.handle_rti(value, address),
            Instruction::RTS => self.handle_rts(value, address),
            Instruction::SBC => self.handle_sbc(value, address),
            Instruction::SEC => self.handle_sec(value, address),
            Instruction::SED => self.handle_sed(value, address),
            Instruction::SEI => self.handle_sei(value, address),
            Instruction::STA => self.handle_sta(value, address),
            Instruction::STX => self.handle_stx(value, address),
            Instruction::STY => self.handle_sty(value, address),
            Instruction::TAX => self.handle_tax(value, address),
            Instruction::TAY => self.handle_tay(value, address),
            Instruction::TSX => self.handle_tsx(value, address),
            Instruction::TXA => self.handle_txa(value, address),
            Instruction::TXS => self.handle_txs(value, address),
            Instruction::TYA => self.handle_tya(value, address),
        }
    }
}
