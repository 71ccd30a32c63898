// benches/convert_bench.rs
// ============================================================================
// Conversion Benchmark
// ============================================================================

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mmum_beerxml::{convert, BeerXmlWriter, DocumentSerializer, XmlConfig};
use rand::Rng;
use serde_json::{json, Map, Value};

fn generate_v1_record(slots: usize) -> Value {
    let mut rng = rand::thread_rng();
    let mut rec = Map::new();

    rec.insert("ExportVersion".into(), json!("1.0"));
    rec.insert("Stammwuerze".into(), json!(rng.gen_range(9.0..18.0)));
    rec.insert("Endvergaerungsgrad".into(), json!("78"));
    rec.insert("Gaertemperatur".into(), json!("18-21"));
    rec.insert("Infusion_Einmaischtemperatur".into(), json!(57));
    rec.insert("Abmaischtemperatur".into(), json!("78"));

    for i in 1..=slots {
        rec.insert(format!("Malz{}", i), json!(format!("Malz &auml;{}", i)));
        rec.insert(format!("Malz{}_Menge", i), json!(rng.gen_range(100..5000)));
        rec.insert(format!("Malz{}_Einheit", i), json!("g"));
        rec.insert(format!("Hopfen_{}_Sorte", i), json!("Perle"));
        rec.insert(format!("Hopfen_{}_Menge", i), json!(rng.gen_range(5..50)));
        rec.insert(format!("Hopfen_{}_alpha", i), json!(7.5));
        rec.insert(format!("Hopfen_{}_Kochzeit", i), json!(rng.gen_range(0..90)));
        rec.insert(format!("Infusion_Rasttemperatur{}", i), json!(rng.gen_range(50..76)));
        rec.insert(format!("Infusion_Rastzeit{}", i), json!(rng.gen_range(10..60)));
    }
    Value::Object(rec)
}

fn generate_v2_record(entries: usize) -> Value {
    let mut rng = rand::thread_rng();

    let malze: Vec<Value> = (0..entries)
        .map(|i| json!({"Name": format!("Malz {}", i), "Menge": rng.gen_range(0.1..5.0), "Einheit": "kg"}))
        .collect();
    let hops: Vec<Value> = (0..entries)
        .map(|_| json!({"Sorte": "Citra", "Menge": rng.gen_range(5..80), "Alpha": 12.0, "Zeit": 10, "Typ": "Whirlpool"}))
        .collect();
    let rasten: Vec<Value> = (0..entries)
        .map(|_| json!({"Temperatur": rng.gen_range(50..76), "Zeit": rng.gen_range(10..60)}))
        .collect();

    json!({
        "ExportVersion": "2.0",
        "Stammwuerze": rng.gen_range(9.0..18.0),
        "Endvergaerungsgrad": 80,
        "Einmaischtemperatur": 57,
        "Abmaischtemperatur": 78,
        "Malze": malze,
        "Hopfenkochen": hops,
        "Rasten": rasten,
    })
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for size in [1, 6, 24].iter() {
        let v1 = generate_v1_record(*size);
        let v2 = generate_v2_record(*size);

        group.bench_with_input(BenchmarkId::new("v1", size), &v1, |b, r| {
            b.iter(|| black_box(convert(r).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("v2", size), &v2, |b, r| {
            b.iter(|| black_box(convert(r).unwrap()))
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let recipe = convert(&generate_v1_record(6)).unwrap();
    let config = XmlConfig::default();

    c.bench_function("beerxml_write", |b| {
        b.iter(|| black_box(BeerXmlWriter.serialize(&recipe, &config).unwrap()))
    });
}

criterion_group!(benches, bench_convert, bench_serialize);
criterion_main!(benches);
