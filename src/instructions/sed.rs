use crate::cpu6502::{CPU, StatusFlag};

impl CPU<'_> {
    pub(crate) fn handle_sed(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        // The flag itself is tracked even though ADC/SBC ignore it.
        self.set_status_flag(StatusFlag::DecimalMode, true);
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::Memory;

    #[test]
    fn test_sed_sets_decimal_flag() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.handle_sed(None, None);
        assert!(cpu.get_status_flag(StatusFlag::DecimalMode));
    }
}
