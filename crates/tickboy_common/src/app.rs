use anyhow::Result;

/// A machine that a frontend can drive in bursts of master-clock ticks.
pub trait App {
    fn init(&mut self);
    /// Advance the machine by `ticks` master cycles and copy the latest
    /// RGB24 frame into `screen`.
    fn update(&mut self, ticks: u64, screen: &mut [u8]) -> Result<()>;
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn title(&self) -> String;
    /// Master clock frequency in Hz used to pace `update`.
    fn master_frequency(&self) -> u64;
    /// Master ticks between two finished frames.
    fn ticks_per_frame(&self) -> u64;
}
