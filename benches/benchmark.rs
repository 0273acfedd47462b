use bevy::math::Vec3;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skyhop::player::{
    AnimatorParams, Control, FrameTime, InputSnapshot, KinematicBody, LocomotionConfig, LocomotionController,
    PhysicsBody, Scheduler, StaticCollider, SurfaceKind,
};

type Controller = LocomotionController<KinematicBody, AnimatorParams, InputSnapshot>;

/// Flat floor plus a row of small platforms, roughly the size of a level.
fn level_colliders() -> Vec<StaticCollider> {
    let mut colliders = vec![StaticCollider::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(50.0, 1.0, 50.0),
        SurfaceKind::Ground,
    )];
    for i in 0..32u8 {
        let f = f32::from(i);
        colliders.push(StaticCollider::new(
            Vec3::new(f * 3.0 - 48.0, 2.0 + f * 0.5, -20.0),
            Vec3::new(1.0, 0.25, 1.0),
            SurfaceKind::Ground,
        ));
    }
    colliders
}

fn controller() -> Controller {
    let body = KinematicBody::new(Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.4, 0.9, 0.4)).with_colliders(level_colliders());
    LocomotionController::new(LocomotionConfig::default(), body, AnimatorParams::new(), InputSnapshot::new()).with_seed(7)
}

/// One variable-rate update with steady forward input and mouse turning.
fn bench_controller_update(c: &mut Criterion) {
    let mut ctl = controller();
    ctl.input_mut().set_axes(0.3, 1.0);
    ctl.input_mut().mouse_x = 0.5;
    let mut now = 0.0f32;
    c.bench_function("controller_update", |b| {
        b.iter(|| {
            now += 1.0 / 60.0;
            ctl.update(black_box(FrameTime { now, delta: 1.0 / 60.0 }));
            if ctl.body().position().y < -10.0 {
                ctl.respawn();
            }
        })
    });
}

/// Scheduler frames with jump presses every 90 frames (fixed steps, contacts, update).
fn bench_scheduler_frames(c: &mut Criterion) {
    c.bench_function("scheduler_600_frames", |b| {
        b.iter(|| {
            let mut ctl = controller();
            let mut scheduler = Scheduler::default();
            ctl.input_mut().set_axes(0.0, 1.0);
            for frame in 0..600u32 {
                ctl.input_mut().clear_edges();
                if frame % 90 == 0 {
                    ctl.input_mut().press(Control::Jump);
                }
                scheduler.advance(&mut ctl, black_box(1.0 / 60.0));
            }
            black_box(ctl.body().position());
        })
    });
}

/// Raw kinematic body integration against the level.
fn bench_kinematic_integrate(c: &mut Criterion) {
    c.bench_function("kinematic_integrate", |b| {
        let mut body = KinematicBody::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.4, 0.9, 0.4)).with_colliders(level_colliders());
        b.iter(|| {
            let events = body.integrate(black_box(0.02));
            if body.position.y < 1.0 {
                body.velocity = Vec3::new(2.0, 8.0, -1.0);
            }
            black_box(events);
        })
    });
}

fn bench_cast_ray(c: &mut Criterion) {
    let body = KinematicBody::new(Vec3::new(-48.0, 2.0, -15.0), Vec3::splat(0.4)).with_colliders(level_colliders());
    c.bench_function("kinematic_cast_ray", |b| {
        b.iter(|| black_box(body.cast_ray(black_box(Vec3::NEG_Z), 10.0)))
    });
}

#[test]
fn __bench_smoke_test() {
    // one frame through every benchmarked path
    let mut ctl = controller();
    Scheduler::default().advance(&mut ctl, 1.0 / 60.0);
    assert!(ctl.body().position().y > 0.0);
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(200);
    targets =
        bench_controller_update,
        bench_scheduler_frames,
        bench_kinematic_integrate,
        bench_cast_ray,
}

criterion_main!(benches);
