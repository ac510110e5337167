use crate::cpu6502::{CPU, StatusFlag};

impl CPU<'_> {
    pub(crate) fn handle_clv(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.set_status_flag(StatusFlag::Overflow, false);
        return 0;
    }
}
