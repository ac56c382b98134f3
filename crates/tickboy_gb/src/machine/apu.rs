/// Audio unit placeholder.
///
/// It takes its scheduler slot like the other units but produces no
/// sound; it only counts the ticks it receives.
#[derive(Clone, Debug, Default)]
pub struct Apu {
    ticks: u64,
}

impl Apu {
    #[inline]
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
