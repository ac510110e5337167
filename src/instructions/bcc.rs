use crate::cpu6502::{CPU, StatusFlag};

impl CPU<'_> {
    pub(crate) fn handle_bcc(&mut self, _opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let target = opt_address.expect("BUG: branch target of BCC should be present");
        self.branch(!self.get_status_flag(StatusFlag::Carry), target)
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::Memory;

    #[test]
    fn test_bcc_branch_taken_when_carry_clear() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.program_counter = 0x1000;
        cpu.set_status_flag(StatusFlag::Carry, false);
        let cycles = cpu.handle_bcc(None, Some(0x1010));
        assert_eq!(cpu.program_counter, 0x1010);
        assert_eq!(cycles, 1);
    }

    #[test]
    fn test_bcc_branch_not_taken_when_carry_set() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.program_counter = 0x1000;
        cpu.set_status_flag(StatusFlag::Carry, true);
        let cycles = cpu.handle_bcc(None, Some(0x1010));
        assert_eq!(cpu.program_counter, 0x1000);
        assert_eq!(cycles, 0);
    }
}
