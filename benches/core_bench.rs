use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gdml_editor::core::{Composition, LengthUnit, Material, Placement, Shape, Solid, VolumeKind};
use gdml_editor::{filter_volumes, parse_gdml, reconcile, write_gdml, Registry};
use glam::DVec3;
use std::hint::black_box;

fn bench_gdml_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/simple_world.gdml");

    c.bench_function("gdml_parse_simple_world", |b| {
        b.iter(|| {
            let registry = parse_gdml(black_box(xml_content)).expect("GDML parse failed");
            black_box(registry.volume_count())
        })
    });
}

/// World mit `width` verschiedenen Kindern, jedes mit einer Kette der Tiefe `depth`.
fn build_synthetic_registry(width: usize, depth: usize) -> Registry {
    let mut registry = Registry::new();
    let vacuum = registry
        .add_material(Material::new(
            "Vacuum",
            1e-25,
            Composition::Simple { z: 1.0, a: 1.008 },
        ))
        .expect("Material erwartet");
    registry
        .add_solid(Solid::from_shape(
            "Cell",
            &Shape::Box {
                x: 1.0,
                y: 1.0,
                z: 1.0,
            },
            LengthUnit::Mm,
        ))
        .expect("Solid erwartet");

    registry
        .add_volume("World", VolumeKind::shaped("Cell", vacuum.clone()))
        .expect("World erwartet");
    registry.set_world("World").expect("World erwartet");

    for column in 0..width {
        let mut parent = "World".to_string();
        for level in 0..depth {
            let name = format!("V{column}_{level}");
            registry
                .add_volume(name.as_str(), VolumeKind::shaped("Cell", vacuum.clone()))
                .expect("Volumen erwartet");
            // Jede Ebene zweimal platzieren, damit Zähler entstehen
            for copy in 0..2 {
                let placement = Placement::new(
                    format!("{name}_pv{copy}"),
                    registry.handle(&parent).expect("Eltern-Handle erwartet"),
                    registry.handle(&name).expect("Kind-Handle erwartet"),
                )
                .with_transform(DVec3::new(copy as f64, level as f64, 0.0), DVec3::ZERO);
                registry
                    .add_placement(placement, true)
                    .expect("Platzierung erwartet");
            }
            parent = name;
        }
    }

    registry
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");

    for &(width, depth) in &[(100usize, 10usize), (1_000, 10)] {
        let registry = build_synthetic_registry(width, depth);
        let label = format!("{width}x{depth}");

        group.bench_with_input(
            BenchmarkId::new("reconcile", &label),
            &registry,
            |b, registry| {
                b.iter(|| {
                    let tree = reconcile(black_box(registry)).expect("Baum erwartet");
                    black_box(tree.node_count())
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("filter", &label),
            &registry,
            |b, registry| {
                b.iter(|| black_box(filter_volumes(registry, black_box("_5")).len()))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("write_gdml", &label),
            &registry,
            |b, registry| {
                b.iter(|| black_box(write_gdml(registry).expect("Export erwartet").len()))
            },
        );
    }

    group.finish();
}

criterion_group!(core_benches, bench_gdml_parsing, bench_hierarchy);
criterion_main!(core_benches);
