use crate::cpu6502::{CPU, StatusFlag};

impl CPU<'_> {
    pub(crate) fn handle_sei(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::Memory;

    #[test]
    fn test_sei_sets_interrupt_disable_flag() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.set_status_flag(StatusFlag::InterruptDisable, false);
        cpu.handle_sei(None, None);
        assert!(cpu.get_status_flag(StatusFlag::InterruptDisable));
    }
}
