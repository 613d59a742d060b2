//! Headless driver for the helix engine.
//!
//! Runs a scripted session (wheel, drag, hover, flights, blur) at 60 Hz
//! against synthetic timestamps and logs what the renderer would receive.
//! With `--gpu` it also evaluates the orbit on the device and reports the
//! largest host/device difference.
//!
//! ```text
//! dna-helix [options.toml] [--gpu] [--schema out.json]
//! ```

use std::path::Path;
use std::time::Duration;

use dna_helix::engine::{EngineCommand, HelixEngine};
use dna_helix::gpu::{GpuContext, OrbitKernel, ShaderComposer};
use dna_helix::input::InputEvent;
use dna_helix::options::Options;
use dna_helix::HelixError;
use web_time::Instant;

const FRAME: Duration = Duration::from_micros(16_667);
const FRAMES: u32 = 900;
const VIEWPORT_HEIGHT: f32 = 900.0;

/// Input scheduled for a given frame.
fn scripted_events(frame: u32) -> Vec<InputEvent> {
    match frame {
        30 => vec![InputEvent::Wheel { delta_y: 120.0 }],
        90 => vec![
            InputEvent::PointerButton { pressed: true },
            InputEvent::PointerMoved {
                y: 700.0,
                viewport_height: VIEWPORT_HEIGHT,
            },
        ],
        150 => vec![InputEvent::PointerButton { pressed: false }],
        200 => vec![InputEvent::LinkHover {
            link: 2,
            entered: true,
        }],
        260 => vec![InputEvent::LinkHover {
            link: 2,
            entered: false,
        }],
        400 => vec![InputEvent::Focus { focused: false }],
        460 => vec![InputEvent::Focus { focused: true }],
        _ => Vec::new(),
    }
}

fn run_session(engine: &mut HelixEngine) -> Result<(), HelixError> {
    let start = Instant::now();
    let mut completed = 0;
    let mut dirty_frames = 0;

    for frame in 0..FRAMES {
        let now = start + FRAME * frame;
        for event in scripted_events(frame) {
            engine.handle_event(event, now);
        }
        match frame {
            10 => engine.execute(EngineCommand::FlyTo { link: 3 })?,
            300 => engine.execute(EngineCommand::Tour)?,
            _ => {}
        }

        let output = engine.tick(now);
        completed += output.completed.len();
        if output.colors_dirty {
            dirty_frames += 1;
        }
        if frame % 60 == 0 {
            let visible = output.tour_markers.iter().flatten().count();
            log::info!(
                "frame {frame:>3}: angle {:+.3} rate {:.2} {:?} t={:.2} markers {visible}",
                output.angle,
                engine.rotation_state().current_rate,
                engine.rotation_state().phase,
                output.time,
            );
        }
    }

    log::info!(
        "session done: {completed} flights completed, {dirty_frames} color uploads, camera at {}",
        engine.camera_position()
    );
    Ok(())
}

fn gpu_cross_check(engine: &HelixEngine) -> Result<(), HelixError> {
    let context = pollster::block_on(GpuContext::headless())?;
    let mut composer = ShaderComposer::new()?;
    let field = engine.field();
    let kernel = OrbitKernel::new(&context, &mut composer, &field.gpu_points())?;

    let t = engine.time();
    let device = kernel.evaluate(&context, engine.orbit(), t)?;
    let mut max_error = 0.0_f32;
    for (rec, d) in field.records().zip(&device) {
        let host = engine.orbit().evaluate_homogeneous(&rec, t)?;
        max_error = max_error.max((host - *d).abs().max_element());
    }
    log::info!(
        "orbit kernel: {} points at t={t:.3}, max host/device difference {max_error:.2e}",
        kernel.count()
    );
    Ok(())
}

fn write_schema(path: &Path) -> Result<(), HelixError> {
    let schema = Options::json_schema_string()?;
    std::fs::write(path, schema)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut options_path = None;
    let mut schema_path = None;
    let mut gpu = false;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--gpu" => gpu = true,
            "--schema" => schema_path = args.next(),
            _ => options_path = Some(arg),
        }
    }

    if let Some(path) = schema_path {
        if let Err(e) = write_schema(Path::new(&path)) {
            log::error!("{path}: {e}");
            std::process::exit(1);
        }
        log::info!("options schema written to {path}");
    }

    let options = match options_path {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let mut engine = match HelixEngine::new(options) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_session(&mut engine) {
        log::error!("{e}");
        std::process::exit(1);
    }

    if gpu {
        if let Err(e) = gpu_cross_check(&engine) {
            log::warn!("GPU cross-check skipped: {e}");
        }
    }
}
