use crate::cpu6502::{CPU, StatusFlag};

impl CPU<'_> {
    pub(crate) fn handle_brk(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        // The PC already points past the opcode; that is the address a later
        // RTI comes back to.
        self.push_u16(self.program_counter);

        // The status byte goes on the stack before B is raised, so the pulled
        // copy comes back with B clear.
        self.push_u8(self.status_register);
        self.set_status_flag(StatusFlag::BreakCommand, true);
        self.set_status_flag(StatusFlag::InterruptDisable, true);

        // BRK shares the IRQ vector.
        self.program_counter = self.read_u16(Self::IRQ_VECTOR_ADDRESS);

        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::Memory;

    #[test]
    fn test_brk_enters_interrupt_handler() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.program_counter = 0x8001; // as if the BRK opcode at 0x8000 was fetched
        cpu.write_u16(0xFFFE, 0x1234);
        let status_before = cpu.status_register;

        cpu.handle_brk(None, None);

        assert_eq!(cpu.program_counter, 0x1234, "PC should jump to the interrupt vector");
        assert!(cpu.get_status_flag(StatusFlag::BreakCommand));
        assert!(cpu.get_status_flag(StatusFlag::InterruptDisable));
        // Status was pushed last, so it's popped first, and without B.
        assert_eq!(cpu.pop_u8(), status_before);
        assert_eq!(cpu.pop_u16(), 0x8001, "the post-opcode PC should be pushed");
    }
}
