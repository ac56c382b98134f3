use super::*;

/// Records the ticks it is driven with and asks to stop after `limit`.
struct CountingApp {
    ticks: u64,
    updates: u32,
    limit: u64,
}

impl CountingApp {
    fn new(limit: u64) -> Self {
        Self {
            ticks: 0,
            updates: 0,
            limit,
        }
    }
}

impl App for CountingApp {
    fn init(&mut self) {}

    fn update(&mut self, ticks: u64, screen: &mut [u8]) -> Result<()> {
        self.ticks += ticks;
        self.updates += 1;
        screen[0] = self.updates as u8;
        Ok(())
    }

    fn should_exit(&self) -> bool {
        self.ticks >= self.limit
    }

    fn exit(&mut self) {}

    fn width(&self) -> u32 {
        1
    }

    fn height(&self) -> u32 {
        1
    }

    fn title(&self) -> String {
        "counting".to_string()
    }

    fn master_frequency(&self) -> u64 {
        1_000_000
    }

    fn ticks_per_frame(&self) -> u64 {
        100
    }
}

fn looping_rom() -> Vec<u8> {
    let mut rom = vec![0x00; 0x8000];
    rom[0x0100..0x0102].copy_from_slice(&[0x18, 0xFE]);
    rom
}

#[test]
fn run_frames_drives_one_frame_per_update() {
    let mut app = CountingApp::new(u64::MAX);
    let mut screen = [0u8; 3];
    run_frames(&mut app, 5, &mut screen).unwrap();
    assert_eq!(app.updates, 5);
    assert_eq!(app.ticks, 500);
    assert_eq!(screen[0], 5);
}

#[test]
fn run_paced_stops_when_app_exits() {
    let mut app = CountingApp::new(2_000);
    let mut screen = [0u8; 3];
    run_paced(&mut app, &mut screen).unwrap();
    assert!(app.ticks >= 2_000);
    assert!(app.updates >= 1);
}

#[test]
fn headless_run_dumps_framebuffer() {
    let path = std::env::temp_dir().join(format!("tickboy-dump-{}.rgb", std::process::id()));
    let options = RunOptions::builder()
        .rom(Some(looping_rom()))
        .frames(Some(2))
        .dump(Some(path.clone()))
        .build();
    run(options).unwrap();

    let dump = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(dump.len(), 160 * 144 * 3);
    // Blank VRAM through BGP 0xFC renders white.
    assert!(dump.iter().all(|&b| b == 0xFF));
}

#[test]
fn run_without_cartridge_fails() {
    let options = RunOptions::builder().frames(Some(1)).build();
    let err = run(options).unwrap_err();
    assert!(format!("{:#}", err).contains("no cartridge"));
}

#[test]
fn invalid_clock_configuration_is_reported() {
    let config = MachineConfig::builder().apu_frequency(3).build();
    let options = RunOptions::builder().config(config).frames(Some(1)).build();
    let err = run(options).unwrap_err();
    assert!(err.to_string().contains("invalid machine configuration"));
}

#[test]
fn paced_run_dumps_framebuffer_before_reporting_failure() {
    let path = std::env::temp_dir().join(format!("tickboy-paced-{}.rgb", std::process::id()));
    let options = RunOptions::builder().dump(Some(path.clone())).build();

    let err = run(options).unwrap_err();
    assert!(format!("{:#}", err).contains("no cartridge"));

    let dump = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(dump.len(), 160 * 144 * 3);
}
