use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;
use std::time::Duration;

use clap::Parser;
use instant::Instant;
use log::{error, info};
use serde::Serialize;

use neon_heart::keyboard::HostKey;
use neon_heart::render::{DrawCommand, RecordingRenderer, Renderer};
use neon_heart::units::{BeatsPerMinute, Milliseconds};
use neon_heart::{ParticleTiming, SimulationConfig, SimulationState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pacing rate in beats per minute
    #[arg(long, default_value_t = 60.0)]
    bpm: f32,

    /// Delay from atrial to ventricular pacing, in milliseconds
    #[arg(long, default_value_t = 160.0)]
    av_delay: f64,

    /// Number of flow particles in the great vessels
    #[arg(long, default_value_t = 80)]
    particles: usize,

    /// Seed for the generated geometry; random when absent
    #[arg(long)]
    seed: Option<u64>,

    /// How many frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// Pace frames against the wall clock instead of simulated time
    #[arg(long)]
    realtime: bool,

    /// Hide the blocked native rhythm spark
    #[arg(long)]
    hide_native: bool,

    /// Scale particle motion by elapsed time instead of one step per frame
    #[arg(long)]
    real_time_particles: bool,

    /// Start in fullscreen, as if F1 had been pressed
    #[arg(long)]
    fullscreen: bool,

    /// Print every frame's draw commands as a JSON line
    #[arg(long)]
    json: bool,
}

impl Args {
    fn frame_interval(&self) -> Result<Duration, String> {
        if self.frame_ms.is_finite() && self.frame_ms > 0.0 {
            Ok(Duration::from_secs_f64(self.frame_ms / 1000.0))
        } else {
            Err(format!(
                "Frame interval must be a positive number of milliseconds, got {}",
                self.frame_ms
            ))
        }
    }

    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            bpm: BeatsPerMinute(self.bpm),
            av_delay: Milliseconds(self.av_delay),
            particle_count: self.particles,
            particle_timing: if self.real_time_particles {
                ParticleTiming::RealTime
            } else {
                ParticleTiming::FrameLocked
            },
            reference_fps: 1000.0 / self.frame_ms,
            show_native_rhythm: !self.hide_native,
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct FrameStats<'a> {
    frame: u64,
    elapsed_in_cycle: f64,
    phase: f64,
    atrial_paced: bool,
    ventricular_paced: bool,
    sparks: usize,
    commands: &'a [DrawCommand],
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        console_log::init_with_level(log::Level::Info).expect("Couldn't initialize logger");
    }
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();
    if let Err(error) = run(&args) {
        error!("{error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let frame_interval = args.frame_interval()?;
    let mut state = SimulationState::new(args.config(), Milliseconds(0.0))?;
    let mut renderer = RecordingRenderer::default();
    if args.fullscreen {
        state.key_pressed(HostKey::F1, &mut renderer);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let start = Instant::now();
    let mut atrial_frames = 0;
    let mut ventricular_frames = 0;
    let mut totals: BTreeMap<&'static str, usize> = BTreeMap::new();

    for frame_number in 0..args.frames {
        let now = if args.realtime {
            Milliseconds::from_seconds(start.elapsed().as_secs_f64())
        } else {
            Milliseconds(frame_number as f64 * args.frame_ms)
        };
        let frame = state.render(now, &mut renderer);
        atrial_frames += usize::from(frame.pacing.atrial);
        ventricular_frames += usize::from(frame.pacing.ventricular);
        for (kind, count) in renderer.count_by_kind() {
            *totals.entry(kind).or_default() += count;
        }
        let commands = renderer.take_frame();
        if args.json {
            let stats = FrameStats {
                frame: frame_number,
                elapsed_in_cycle: *frame.snapshot.elapsed_in_cycle,
                phase: frame.snapshot.phase,
                atrial_paced: frame.pacing.atrial,
                ventricular_paced: frame.pacing.ventricular,
                sparks: frame.sparks.len(),
                commands: &commands,
            };
            writeln!(out, "{}", serde_json::to_string(&stats)?)?;
        }
        if args.realtime {
            std::thread::sleep(frame_interval);
        }
    }

    info!(
        "{} frames at {}: atrial paced in {}, ventricular paced in {}, fullscreen {}",
        state.frames(),
        state.clock().bpm(),
        atrial_frames,
        ventricular_frames,
        renderer.is_fullscreen()
    );
    info!("Draw commands: {totals:?}");
    Ok(())
}
