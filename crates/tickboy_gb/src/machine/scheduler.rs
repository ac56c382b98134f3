use crate::error::{Error, Result};

/// The processing units the scheduler can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Cpu,
    Ppu,
    Apu,
}

#[derive(Clone, Copy, Debug)]
struct Unit {
    kind: UnitKind,
    divisor: u64,
}

/// Runs units at fixed ratios of a master clock.
///
/// A unit registered at frequency `f` runs on every master cycle that is a
/// multiple of `master / f`. Units due on the same cycle run in the order
/// they were registered.
#[derive(Clone, Debug)]
pub struct Scheduler {
    master_frequency: u64,
    units: Vec<Unit>,
    cycle: u64,
}

impl Scheduler {
    pub fn new(master_frequency: u64) -> Result<Self> {
        if master_frequency == 0 {
            return Err(Error::InvalidConfig(
                "master frequency must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            master_frequency,
            units: Vec::new(),
            cycle: 0,
        })
    }

    pub fn register(&mut self, kind: UnitKind, frequency: u64) -> Result<()> {
        if frequency == 0 || frequency > self.master_frequency {
            return Err(Error::InvalidConfig(format!(
                "{:?} frequency {} Hz is outside 1..={} Hz",
                kind, frequency, self.master_frequency
            )));
        }
        if self.master_frequency % frequency != 0 {
            return Err(Error::InvalidConfig(format!(
                "{:?} frequency {} Hz does not divide the master frequency {} Hz",
                kind, frequency, self.master_frequency
            )));
        }

        let divisor = self.master_frequency / frequency;
        log::debug!("scheduler: {:?} at {} Hz (every {} ticks)", kind, frequency, divisor);
        self.units.push(Unit { kind, divisor });
        Ok(())
    }

    /// Units due on the current master cycle, in registration order.
    pub fn due(&self) -> impl Iterator<Item = UnitKind> + '_ {
        let cycle = self.cycle;
        self.units
            .iter()
            .filter(move |unit| cycle % unit.divisor == 0)
            .map(|unit| unit.kind)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
    }

    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    #[inline]
    pub fn master_frequency(&self) -> u64 {
        self.master_frequency
    }
}
