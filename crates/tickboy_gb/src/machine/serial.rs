/// Serial port trace capture.
///
/// Software starts a transfer by writing 0x81 to SC; the byte in SB is
/// then taken here. Test ROMs use this to report results, so completed
/// lines are also logged.
#[derive(Default, Debug)]
pub(crate) struct Serial {
    output: Vec<u8>,
    line: String,
}

impl Serial {
    pub(crate) fn transfer(&mut self, byte: u8) {
        self.output.push(byte);
        if byte == b'\n' {
            log::info!("serial: {}", self.line);
            self.line.clear();
        } else {
            self.line.push(byte as char);
        }
    }

    #[inline]
    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }
}
