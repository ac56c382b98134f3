use crate::error::{Error, Result};

/// Cartridge header window; unmapped accesses here mean no cartridge.
const HEADER_WINDOW: std::ops::RangeInclusive<u16> = 0x0100..=0x014F;
/// Work RAM range mirrored by echo RAM.
const ECHO_SOURCE: std::ops::RangeInclusive<u16> = 0xC000..=0xDDFF;
const ECHO_MIRROR: std::ops::RangeInclusive<u16> = 0xE000..=0xFDFF;
const ECHO_OFFSET: u16 = 0x2000;

/// Named memory regions of the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    BootRom1,
    CartridgeHeader,
    BootRom2,
    CartridgeRom0,
    CartridgeRomN,
    VideoRam,
    CartridgeRam,
    WorkRam0,
    WorkRamN,
    EchoRam,
    Oam,
    NotUsable,
    Io,
    HighRam,
    InterruptEnable,
}

impl Region {
    /// Inclusive address range the region normally occupies.
    pub const fn range(self) -> (u16, u16) {
        match self {
            Region::BootRom1 => (0x0000, 0x00FF),
            Region::CartridgeHeader => (0x0100, 0x014F),
            Region::BootRom2 => (0x0200, 0x08FF),
            Region::CartridgeRom0 => (0x0000, 0x3FFF),
            Region::CartridgeRomN => (0x4000, 0x7FFF),
            Region::VideoRam => (0x8000, 0x9FFF),
            Region::CartridgeRam => (0xA000, 0xBFFF),
            Region::WorkRam0 => (0xC000, 0xCFFF),
            Region::WorkRamN => (0xD000, 0xDFFF),
            Region::EchoRam => (0xE000, 0xFDFF),
            Region::Oam => (0xFE00, 0xFE9F),
            Region::NotUsable => (0xFEA0, 0xFEFF),
            Region::Io => (0xFF00, 0xFF7F),
            Region::HighRam => (0xFF80, 0xFFFE),
            Region::InterruptEnable => (0xFFFF, 0xFFFF),
        }
    }
}

/// A contiguous, optionally banked byte store.
#[derive(Clone, Debug)]
pub struct MemoryRegion {
    name: Region,
    start: u16,
    end: u16,
    banks: Vec<Vec<u8>>,
    active: usize,
}

impl MemoryRegion {
    fn new(name: Region, start: u16, end: u16, bank_count: usize) -> Self {
        let len = usize::from(end - start) + 1;
        Self {
            name,
            start,
            end,
            banks: vec![vec![0; len]; bank_count],
            active: 0,
        }
    }

    #[inline]
    pub fn name(&self) -> Region {
        self.name
    }

    #[inline]
    pub fn start(&self) -> u16 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u16 {
        self.end
    }

    #[inline]
    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }

    #[inline]
    pub fn active_bank(&self) -> usize {
        self.active
    }

    #[inline]
    fn contains(&self, addr: u16) -> bool {
        (self.start..=self.end).contains(&addr)
    }

    #[inline]
    fn overlaps(&self, start: u16, end: u16) -> bool {
        start <= self.end && self.start <= end
    }

    #[inline]
    fn offset(&self, addr: u16) -> usize {
        usize::from(addr - self.start)
    }
}

/// The 16-bit address space as an ordered set of non-overlapping regions.
///
/// This is a plain store: reads have no side effects and bank selection
/// is driven from outside through [`AddressSpace::select_bank`].
#[derive(Clone, Debug, Default)]
pub struct AddressSpace {
    regions: Vec<MemoryRegion>,
}

impl AddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `name` over `start..=end` with `bank_count` banks of equal size.
    pub fn add_region(
        &mut self,
        name: Region,
        start: u16,
        end: u16,
        bank_count: usize,
    ) -> Result<()> {
        if start > end || bank_count == 0 {
            return Err(Error::InvalidRegion {
                name,
                start,
                end,
                banks: bank_count,
            });
        }
        if let Some(existing) = self
            .regions
            .iter()
            .find(|r| r.name == name || r.overlaps(start, end))
        {
            return Err(Error::RegionOverlap {
                name,
                start,
                end,
                existing: existing.name,
            });
        }

        log::debug!(
            "map {:?} 0x{:04X}-0x{:04X} x{} bank(s)",
            name,
            start,
            end,
            bank_count
        );
        let index = self.regions.partition_point(|r| r.start < start);
        self.regions
            .insert(index, MemoryRegion::new(name, start, end, bank_count));
        Ok(())
    }

    /// Map `name` at its usual address range.
    pub fn add_default_region(&mut self, name: Region, bank_count: usize) -> Result<()> {
        let (start, end) = name.range();
        self.add_region(name, start, end, bank_count)
    }

    pub fn remove_region(&mut self, name: Region) -> Result<MemoryRegion> {
        let index = self.index_of(name)?;
        log::debug!("unmap {:?}", name);
        Ok(self.regions.remove(index))
    }

    #[inline]
    pub fn is_mapped(&self, name: Region) -> bool {
        self.regions.iter().any(|r| r.name == name)
    }

    pub fn region(&self, name: Region) -> Option<&MemoryRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn regions(&self) -> impl Iterator<Item = &MemoryRegion> {
        self.regions.iter()
    }

    /// Make `bank` the bank seen by reads and writes of `name`.
    pub fn select_bank(&mut self, name: Region, bank: usize) -> Result<()> {
        let index = self.index_of(name)?;
        let region = &mut self.regions[index];
        if bank >= region.banks.len() {
            return Err(Error::InvalidBank {
                name,
                bank,
                banks: region.banks.len(),
            });
        }
        if region.active != bank {
            log::debug!("{:?} bank {} -> {}", name, region.active, bank);
            region.active = bank;
        }
        Ok(())
    }

    /// Copy `bytes` into `bank` of `name`, starting at the region's first
    /// byte. Bytes past the end of the bank are dropped.
    pub fn load(&mut self, name: Region, bank: usize, bytes: &[u8]) -> Result<()> {
        let index = self.index_of(name)?;
        let region = &mut self.regions[index];
        let banks = region.banks.len();
        let target = region
            .banks
            .get_mut(bank)
            .ok_or(Error::InvalidBank { name, bank, banks })?;
        let len = target.len().min(bytes.len());
        target[..len].copy_from_slice(&bytes[..len]);
        Ok(())
    }

    /// Set every byte of every bank of `name` to `value`.
    pub fn fill(&mut self, name: Region, value: u8) -> Result<()> {
        let index = self.index_of(name)?;
        for bank in &mut self.regions[index].banks {
            bank.fill(value);
        }
        Ok(())
    }

    /// Region owning `addr`, or the error an access to it would raise.
    pub fn owner(&self, addr: u16) -> Result<Region> {
        self.find(addr).map(|r| r.name)
    }

    pub fn read(&self, addr: u16) -> Result<u8> {
        let region = self.find(addr)?;
        Ok(region.banks[region.active][region.offset(addr)])
    }

    /// Read `addr` from a specific bank, ignoring the active selection.
    pub fn peek_bank(&self, addr: u16, bank: usize) -> Result<u8> {
        let region = self.find(addr)?;
        let data = region.banks.get(bank).ok_or(Error::InvalidBank {
            name: region.name,
            bank,
            banks: region.banks.len(),
        })?;
        Ok(data[region.offset(addr)])
    }

    /// Store `value`, keeping work RAM and echo RAM in step.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        self.store(addr, value)?;

        let mirror = if ECHO_SOURCE.contains(&addr) {
            Some(addr + ECHO_OFFSET)
        } else if ECHO_MIRROR.contains(&addr) {
            Some(addr - ECHO_OFFSET)
        } else {
            None
        };
        if let Some(mirror) = mirror {
            if self.find(mirror).is_ok() {
                self.store(mirror, value)?;
            }
        }
        Ok(())
    }

    fn store(&mut self, addr: u16, value: u8) -> Result<()> {
        let index = self.find_index(addr)?;
        let region = &mut self.regions[index];
        let offset = region.offset(addr);
        region.banks[region.active][offset] = value;
        Ok(())
    }

    fn index_of(&self, name: Region) -> Result<usize> {
        self.regions
            .iter()
            .position(|r| r.name == name)
            .ok_or(Error::UnknownRegion { name })
    }

    fn find(&self, addr: u16) -> Result<&MemoryRegion> {
        let index = self.find_index(addr)?;
        Ok(&self.regions[index])
    }

    fn find_index(&self, addr: u16) -> Result<usize> {
        self.regions
            .iter()
            .position(|r| r.contains(addr))
            .ok_or_else(|| unmapped(addr))
    }
}

fn unmapped(address: u16) -> Error {
    if HEADER_WINDOW.contains(&address) {
        Error::NoCartridge { address }
    } else {
        Error::UnmappedAddress { address }
    }
}
