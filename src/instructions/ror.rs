use crate::cpu6502::{CPU, StatusFlag};

impl CPU<'_> {
    pub(crate) fn handle_ror(&mut self, opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of ROR should be present");
        let carry_in = if self.get_status_flag(StatusFlag::Carry) { 0x80 } else { 0 };
        let result = (value >> 1) | carry_in;

        // The old bit 0 rotates out into the carry.
        self.set_status_flag(StatusFlag::Carry, (value & 0x01) != 0);
        self.set_status_flag(StatusFlag::Zero, result == 0);
        self.set_status_flag(StatusFlag::Negative, (result & 0x80) != 0);

        match opt_address {
            Some(address) => self.write_u8(address, result),
            None => self.accumulator = result,
        }
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::Memory;

    #[test]
    fn test_ror_rotates_carry_into_bit_seven() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.accumulator = 0x02;
        cpu.set_status_flag(StatusFlag::Carry, true);
        cpu.handle_ror(Some(0x02), None);
        assert_eq!(cpu.accumulator, 0x81);
        assert_eq!(cpu.get_status_flag(StatusFlag::Carry), false);
        assert_eq!(cpu.get_status_flag(StatusFlag::Negative), true);
    }

    #[test]
    fn test_ror_rotates_bit_zero_into_carry() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.accumulator = 0x01;
        cpu.handle_ror(Some(0x01), None);
        assert_eq!(cpu.accumulator, 0x00);
        assert_eq!(cpu.get_status_flag(StatusFlag::Carry), true);
        assert_eq!(cpu.get_status_flag(StatusFlag::Zero), true);
    }

    #[test]
    fn test_ror_writes_back_to_memory() {
        let mut memory = Memory::new();
        let mut cpu = new_cpu(&mut memory);
        cpu.write_u8(0x0200, 0x04);

        cpu.handle_ror(Some(0x04), Some(0x0200));

        assert_eq!(cpu.read_u8(0x0200), 0x02);
        assert_eq!(cpu.get_status_flag(StatusFlag::Carry), false);
    }
}
