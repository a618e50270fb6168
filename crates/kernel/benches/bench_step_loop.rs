use std::hint::black_box;
use std::time::Instant;

use glam::{Mat4, Vec3};
use tempo_common::{MaterialId, SeedRng, ShapeId};
use tempo_kernel::{Body, Simulation, SimulationConfig, StepPolicy, colliding_pairs};

struct Inert;

impl StepPolicy for Inert {
    fn update(&mut self, _dt: f32, _bodies: &mut Vec<Body>) {}
}

fn make_simulation(body_count: usize, dt: f64) -> Simulation<Inert> {
    let mut rng = SeedRng::new(7);
    let mut sim = Simulation::new(
        SimulationConfig {
            dt,
            ..SimulationConfig::default()
        },
        Inert,
    )
    .expect("valid config");
    for _ in 0..body_count {
        let body = Body::new(ShapeId(1), MaterialId(1), Vec3::ONE).emplace(
            Mat4::from_translation(rng.jitter_vec3(30.0)),
            rng.unit_vec3() * 3.0,
            rng.range_f32(-2.0, 2.0),
            rng.unit_vec3(),
        );
        sim.add_body(body);
    }
    sim
}

fn make_samples(count: usize) -> Vec<Vec3> {
    let mut rng = SeedRng::new(11);
    (0..count).map(|_| rng.unit_vec3()).collect()
}

fn bench_step(body_count: usize, iterations: usize) {
    let mut sim = make_simulation(body_count, 1.0 / 60.0);

    let start = Instant::now();
    for _ in 0..iterations {
        // One fixed step plus a blend per call.
        sim.step(black_box(1.0 / 60.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  step ({body_count} bodies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_catch_up(body_count: usize, iterations: usize) {
    let mut sim = make_simulation(body_count, 1.0 / 120.0);

    let start = Instant::now();
    for _ in 0..iterations {
        // Clamped worst case: a stalled frame that converts to a full burst
        // of catch-up steps.
        sim.step(black_box(0.1));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  catch-up burst ({body_count} bodies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_colliding_pairs(body_count: usize, sample_count: usize, iterations: usize) {
    let mut sim = make_simulation(body_count, 1.0 / 60.0);
    sim.step(1.0 / 60.0);
    let samples = make_samples(sample_count);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(colliding_pairs(black_box(sim.bodies()), black_box(&samples)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  colliding_pairs ({body_count} bodies, {sample_count} samples, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Step Loop Benchmarks ===\n");

    println!("Fixed step + blend:");
    bench_step(100, 10000);
    bench_step(1000, 1000);
    bench_step(10000, 100);

    println!("\nClamped catch-up burst (12 steps/call):");
    bench_catch_up(100, 1000);
    bench_catch_up(1000, 100);

    println!("\nCollision pair sweep:");
    bench_colliding_pairs(50, 26, 1000);
    bench_colliding_pairs(200, 26, 100);
    bench_colliding_pairs(200, 258, 100);

    println!("\n=== Done ===");
}
