//! Windowless run for profiling and smoke testing
//!
//! Drives the animator through a `ManualHost` while a synthetic pointer sweeps
//! across the middle of the surface.

use anyhow::{bail, Result};
use field_simulation::{Animator, FieldParams, HostEvent, ManualHost, SurfaceSize};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// Frames for one pass of the pointer across the surface
const SWEEP_FRAMES: u64 = 600;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessReport {
    pub frames: u64,
    pub particles: usize,
    pub mean_links: f32,
    pub max_links: usize,
    pub elapsed: Duration,
}

pub fn run(params: FieldParams, size: SurfaceSize, seed: u64, frames: u64) -> Result<HeadlessReport> {
    let mut animator = Animator::new(
        ManualHost::new(Some(size)),
        params,
        StdRng::seed_from_u64(seed),
    );
    if !animator.mount() {
        bail!("particle field failed to start");
    }

    let particles = animator.field().map_or(0, |field| field.particles().len());
    let mut total_links = 0usize;
    let mut max_links = 0usize;
    let start = Instant::now();

    for frame in 0..frames {
        let t = (frame % SWEEP_FRAMES) as f32 / SWEEP_FRAMES as f32;
        animator.dispatch(HostEvent::PointerMove(Vec2::new(
            t * size.width,
            size.height * 0.5,
        )));

        let Some(handle) = animator.host_mut().tick() else {
            break;
        };
        if let Some(output) = animator.on_frame(handle) {
            total_links += output.links.len();
            max_links = max_links.max(output.links.len());
        }
    }

    let elapsed = start.elapsed();
    let stats = animator.stats();
    animator.unmount();

    let report = HeadlessReport {
        frames: stats.frames,
        particles,
        mean_links: if stats.frames > 0 {
            total_links as f32 / stats.frames as f32
        } else {
            0.0
        },
        max_links,
        elapsed,
    };

    log::info!(
        "headless: {} frames, {} particles, {:.1} links/frame (max {}), {:.2} ms/frame",
        report.frames,
        report.particles,
        report.mean_links,
        report.max_links,
        report.elapsed.as_secs_f64() * 1000.0 / report.frames.max(1) as f64
    );

    Ok(report)
}
