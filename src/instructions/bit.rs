use crate::cpu6502::{CPU, StatusFlag};

impl CPU<'_> {
    pub(crate) fn handle_bit(&mut self, opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of BIT should be present");

        // Zero comes from the mask, V and N come straight from the operand's
        // bits 6 and 7. The accumulator itself is untouched.
        self.set_status_flag(StatusFlag::Zero, (self.accumulator & value) == 0);
        self.set_status_flag(StatusFlag::Overflow, (value & 0x40) != 0);
        self.set_status_flag(StatusFlag::Negative, (value & 0x80) != 0);

        return 0;
    }
}
