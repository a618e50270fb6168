use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use glam::{Mat4, Vec3};
use tempo_assets::AssetStore;
use tempo_clock::{FrameClock, FrameStats};
use tempo_common::SeedRng;
use tempo_control::TimeAction;
use tempo_kernel::{Body, RotationBlend, Simulation, SimulationConfig, colliding_pairs};
use tempo_render::{DebugTextRenderer, RenderView, Renderer};
use tempo_scene::{Coast, Fountain, FountainConfig};
use tempo_tools::SimInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tempo-cli", about = "CLI host for tempo simulations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Drive a fountain scene with synthetic or wall-clock frames
    Run {
        /// Wall-clock seconds to deliver
        #[arg(long, default_value = "5.0")]
        seconds: f64,
        /// Synthetic frame rate
        #[arg(long, default_value = "60.0")]
        fps: f64,
        /// Fixed step size in seconds
        #[arg(long, default_value = "0.05")]
        dt: f64,
        /// RNG seed for the spawner
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Population the fountain keeps alive
        #[arg(short, long, default_value = "80")]
        population: usize,
        /// Initial time scale
        #[arg(long, default_value = "1.0")]
        time_scale: f64,
        /// Frame index at which to speed time up
        #[arg(long)]
        speed_up_at: Option<u64>,
        /// Frame index at which to slow time down
        #[arg(long)]
        slow_down_at: Option<u64>,
        /// Pace frames in real time and measure deltas from the wall clock
        #[arg(long)]
        realtime: bool,
        /// Blend rotations spherically instead of linearly
        #[arg(long)]
        spherical_blend: bool,
        /// Print a debug render of the final frame
        #[arg(long)]
        render: bool,
    },
    /// Step a seeded cluster and report colliding pairs
    Collide {
        /// Number of bodies in the cluster
        #[arg(short, long, default_value = "20")]
        bodies: usize,
        /// RNG seed for placement
        #[arg(short, long, default_value = "7")]
        seed: u64,
        /// Fixed steps to take before testing
        #[arg(long, default_value = "10")]
        steps: u32,
        /// Sphere subdivision level for the sample cloud
        #[arg(long, default_value = "2")]
        subdivisions: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("tempo-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: default dt={}s", SimulationConfig::default().dt);
            println!("assets: {}", tempo_assets::crate_info());
            println!("scene: {}", tempo_scene::crate_info());
            println!("render: {}", tempo_render::crate_info());
            println!("clock: {}", tempo_clock::crate_info());
            println!("control: {}", tempo_control::crate_info());
            println!("tools: {}", tempo_tools::crate_info());
        }
        Commands::Run {
            seconds,
            fps,
            dt,
            seed,
            population,
            time_scale,
            speed_up_at,
            slow_down_at,
            realtime,
            spherical_blend,
            render,
        } => {
            println!("Fountain run: seed={seed}, {seconds}s at {fps} fps, dt={dt}");

            let mut store = AssetStore::new();
            let sphere = store.register_unit_sphere(2);
            let material = store.register_default_material();

            let config = FountainConfig {
                population,
                rotation_blend: if spherical_blend {
                    RotationBlend::Spherical
                } else {
                    RotationBlend::Linear
                },
                ..FountainConfig::default()
            };
            let mut sim = Simulation::new(
                SimulationConfig {
                    dt,
                    ..SimulationConfig::default()
                },
                Fountain::new(config, sphere, material, seed),
            )?;
            sim.set_time_scale(time_scale);

            // Synthetic frames keep runs reproducible; --realtime paces the
            // loop and feeds measured deltas instead.
            let mut clock = FrameClock::new();
            let mut stats = FrameStats::new(1024);
            let frame = 1.0 / fps;
            let frames = (seconds * fps).ceil() as u64;
            let summary_every = (fps.ceil() as u64).max(1);

            for i in 0..frames {
                if speed_up_at == Some(i) {
                    TimeAction::SpeedUpTime.apply(&mut sim, &mut clock);
                }
                if slow_down_at == Some(i) {
                    TimeAction::SlowDownTime.apply(&mut sim, &mut clock);
                }

                let delta = if realtime {
                    std::thread::sleep(Duration::from_secs_f64(frame));
                    match clock.tick() {
                        Some(d) => d,
                        // Arming tick: nothing to deliver yet.
                        None => continue,
                    }
                } else {
                    frame
                };

                let start = Instant::now();
                let steps = sim.step(delta);
                stats.record(start.elapsed(), steps);

                if (i + 1) % summary_every == 0 || i + 1 == frames {
                    println!("{}", SimInspector::summary(&sim));
                }
            }

            println!(
                "Frames: {} recorded, avg {:?}, worst {:?}, heaviest {} steps",
                stats.count(),
                stats.average_wall(),
                stats.max_wall(),
                stats.max_steps()
            );

            if render {
                let renderer = DebugTextRenderer::new();
                print!("{}", renderer.render(sim.bodies(), &RenderView::default()));
            }
        }
        Commands::Collide {
            bodies,
            seed,
            steps,
            subdivisions,
        } => {
            println!("Collision report: {bodies} bodies, seed={seed}, {steps} steps");

            let mut store = AssetStore::new();
            let sphere = store.register_unit_sphere(subdivisions);
            let material = store.register_default_material();
            let samples = store.samples(sphere)?;

            // Coasting cluster, packed tight enough to overlap.
            let mut rng = SeedRng::new(seed);
            let mut sim = Simulation::new(SimulationConfig::default(), Coast)?;
            for _ in 0..bodies {
                let center = rng.jitter_vec3(3.0);
                let velocity = rng.unit_vec3() * 0.5;
                let angular_velocity = rng.next_f32();
                let spin_axis = rng.unit_vec3();
                sim.add_body(Body::new(sphere, material, Vec3::ONE).emplace(
                    Mat4::from_translation(center),
                    velocity,
                    angular_velocity,
                    spin_axis,
                ));
            }

            let dt = sim.dt();
            for _ in 0..steps {
                sim.step(dt);
            }

            let pairs = colliding_pairs(sim.bodies(), samples);
            println!(
                "{} colliding pairs among {} bodies:",
                pairs.len(),
                sim.body_count()
            );
            for (a, b) in &pairs {
                println!("  {} <-> {}", &a.0.to_string()[..8], &b.0.to_string()[..8]);
            }
        }
    }

    Ok(())
}
