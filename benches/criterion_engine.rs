#![cfg(feature = "criterion-bench")]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use club_authz::{ClubId, Engine, Identity, Permission, ResourceKind, Role, UserId};

fn club(i: usize) -> ClubId {
    ClubId::try_from(format!("club_{i}").as_str()).unwrap()
}

fn member_of(role: Role, clubs: usize) -> Identity {
    (0..clubs).fold(
        Identity::new(UserId::try_from("bench_user").unwrap(), role),
        |identity, i| identity.member_of(club(i)),
    )
}

fn bench_permissions(c: &mut Criterion) {
    let mut group = c.benchmark_group("can");
    group.sample_size(30);
    group.throughput(Throughput::Elements(1));

    let engine = Engine::default();
    for role in [Role::Admin, Role::Trainer, Role::Parent] {
        let identity = member_of(role, 1);
        group.bench_with_input(BenchmarkId::from_parameter(role), &role, |b, _| {
            b.iter(|| black_box(engine.can(Some(&identity), Permission::EventDelete)));
        });
    }

    let identity = member_of(Role::Trainer, 1);
    group.bench_function("can_named", |b| {
        b.iter(|| black_box(engine.can_named(Some(&identity), "event:delete")));
    });

    group.finish();
}

fn bench_modify_resource(c: &mut Criterion) {
    let mut group = c.benchmark_group("can_modify_resource_memberships");
    group.sample_size(30);
    group.throughput(Throughput::Elements(1));

    let engine = Engine::default();
    let owner = UserId::try_from("bench_owner").unwrap();
    for clubs in [1usize, 8, 32, 128] {
        let trainer = member_of(Role::Trainer, clubs);
        let scope = club(clubs - 1);
        group.bench_with_input(BenchmarkId::from_parameter(clubs), &clubs, |b, _| {
            b.iter(|| {
                black_box(engine.scopes().can_modify_resource(
                    Some(&trainer),
                    ResourceKind::Event,
                    &owner,
                    Some(&scope),
                ))
            });
        });
    }

    group.finish();
}

fn bench_delegation(c: &mut Criterion) {
    let mut group = c.benchmark_group("can_manage_user_target_clubs");
    group.sample_size(30);
    group.throughput(Throughput::Elements(1));

    let engine = Engine::default();
    for clubs in [1usize, 8, 32, 128] {
        let target = member_of(Role::User, clubs);
        let actor = Identity::new(UserId::try_from("bench_actor").unwrap(), Role::ClubOwner)
            .owns_club(club(clubs - 1));
        group.bench_with_input(BenchmarkId::from_parameter(clubs), &clubs, |b, _| {
            b.iter(|| {
                black_box(
                    engine
                        .delegation()
                        .can_manage_user(Some(&actor), Some(&target)),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_permissions,
    bench_modify_resource,
    bench_delegation
);
criterion_main!(benches);
