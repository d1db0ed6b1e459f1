// Drives the field end to end through the public API without a browser.

use particle_field::{CommandBuffer, DrawCommand, FieldConfig, Particle, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn two_particle_scenario() {
    let particles = vec![
        Particle::new([0.0, 0.0], [0.0, 0.0], 2.0),
        Particle::new([10.0, 0.0], [0.0, 0.0], 2.0),
    ];
    let mut field = ParticleField::from_particles(
        FieldConfig::default(),
        800,
        600,
        particles,
        StdRng::seed_from_u64(3),
    )
    .unwrap();
    assert_eq!(field.config().particle_count, 2);

    let mut frame = CommandBuffer::new();
    let stats = field.step(&mut frame);
    assert_eq!(stats.connections, 1);
    let alpha = frame
        .lines()
        .map(|c| match c {
            DrawCommand::Line { alpha, .. } => *alpha,
            _ => unreachable!(),
        })
        .next()
        .unwrap();
    assert!((alpha - 0.28).abs() < 1e-9);

    let mut again = CommandBuffer::new();
    field.step(&mut again);
    assert_eq!(frame.commands, again.commands);
}

#[test]
fn long_run_keeps_population_near_surface() {
    let mut field =
        ParticleField::with_rng(FieldConfig::default(), 320, 240, StdRng::seed_from_u64(9)).unwrap();
    let mut frame = CommandBuffer::new();
    for _ in 0..5_000 {
        frame.clear_commands();
        field.step(&mut frame);
    }
    assert_eq!(field.len(), 100);
    // A bounce can leave a particle at most one frame of velocity outside.
    for p in field.particles() {
        assert!(p.pos[0] >= -0.25 && p.pos[0] <= 320.25, "x out of range: {}", p.pos[0]);
        assert!(p.pos[1] >= -0.25 && p.pos[1] <= 240.25, "y out of range: {}", p.pos[1]);
    }
}

#[test]
fn resize_regenerates_for_new_surface() {
    let mut field =
        ParticleField::with_rng(FieldConfig::default(), 100, 100, StdRng::seed_from_u64(5)).unwrap();
    field.resize(2000, 50);
    assert_eq!(field.len(), 100);
    assert!(field.particles().iter().all(|p| p.pos[0] < 2000.0 && p.pos[1] < 50.0));
}
