use std::fs;

use moto_catalog::json::shard_file_name;
use moto_catalog::{
    Moto, SpecValue, Specs, load_catalog, make_id, partition_by_brand, slugify, write_output,
};
use tempfile::TempDir;

fn moto(brand: &str, model: &str, price: Option<f64>) -> Moto {
    let mut specs = Specs::new();
    specs.insert("moteur_cylindree".to_string(), SpecValue::Number(689.0));
    specs.insert("abs".to_string(), SpecValue::Bool(true));
    specs.insert("couleur".to_string(), SpecValue::Null);
    Moto {
        id: make_id(brand, model, None),
        brand: brand.to_string(),
        model: model.to_string(),
        brand_slug: slugify(brand),
        model_slug: slugify(model),
        year: None,
        price,
        category: None,
        image_url: None,
        specs,
        source_file: "catalogue.xlsx".to_string(),
        sheet: "Feuil1".to_string(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

fn sample() -> Vec<Moto> {
    vec![
        moto("Yamaha", "MT-07", Some(34990.0)),
        moto("Honda", "CB500F", Some(29500.0)),
        moto("Yamaha", "Tracer 9", None),
        moto("Moto Guzzi", "V7", Some(41250.5)),
    ]
}

#[test]
fn shards_partition_the_catalog() {
    let motos = sample();
    let groups = partition_by_brand(&motos);

    let total: usize = groups.values().map(Vec::len).sum();
    assert_eq!(total, motos.len());
    assert_eq!(
        groups.keys().copied().collect::<Vec<_>>(),
        vec!["honda", "moto-guzzi", "yamaha"]
    );
    for (slug, group) in &groups {
        assert!(group.iter().all(|m| m.brand_slug == *slug));
    }
    let yamaha: Vec<&str> = groups["yamaha"].iter().map(|m| m.model.as_str()).collect();
    assert_eq!(yamaha, vec!["MT-07", "Tracer 9"]);
}

#[test]
fn write_output_creates_catalog_and_shards() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("data").join("generated");
    let motos = sample();

    let summary = write_output(&out, "motos", &motos).unwrap();

    assert_eq!(summary.catalog_path, out.join("motos.json"));
    assert_eq!(summary.shards.len(), 3);
    assert_eq!(load_catalog(&summary.catalog_path).unwrap(), motos);

    let mut from_shards = Vec::new();
    for (slug, path, count) in &summary.shards {
        assert_eq!(path, &out.join(shard_file_name("motos", slug)));
        let shard = load_catalog(path).unwrap();
        assert_eq!(shard.len(), *count);
        from_shards.extend(shard);
    }
    assert_eq!(from_shards.len(), motos.len());
    for m in &motos {
        assert!(from_shards.contains(m), "{} missing from shards", m.id);
    }

    let leftovers: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn output_format() {
    let tmp = TempDir::new().unwrap();
    let summary = write_output(tmp.path(), "motos", &sample()[..1]).unwrap();
    let text = fs::read_to_string(&summary.catalog_path).unwrap();

    assert!(text.ends_with("]\n"));
    assert!(text.contains("\n  {\n    \"id\": \"yamaha-mt-07\""));
    assert!(text.contains("\"price\": 34990,"));
    assert!(text.contains("\"moteur_cylindree\": 689"));
    assert!(text.contains("\"couleur\": null"));
    assert!(text.contains("\"brandSlug\": \"yamaha\""));
    assert!(text.contains("\"imageUrl\": null"));
    assert!(text.contains("\"createdAt\": \"2026-01-01T00:00:00Z\""));
}

#[test]
fn rebuild_removes_shards_of_vanished_brands() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    write_output(out, "motos", &sample()).unwrap();
    assert!(out.join("motos-honda.json").is_file());
    fs::write(out.join("notes.json"), "{}").unwrap();
    fs::write(out.join("motos-backup.json.bak"), "[]").unwrap();
    fs::write(out.join("other-honda.json"), "[]").unwrap();

    let only_yamaha: Vec<Moto> = sample()
        .into_iter()
        .filter(|m| m.brand_slug == "yamaha")
        .collect();
    let summary = write_output(out, "motos", &only_yamaha).unwrap();

    assert_eq!(
        summary.removed,
        vec![out.join("motos-honda.json"), out.join("motos-moto-guzzi.json")]
    );
    assert!(!out.join("motos-honda.json").exists());
    assert!(!out.join("motos-moto-guzzi.json").exists());
    assert_eq!(load_catalog(&out.join("motos-yamaha.json")).unwrap().len(), 2);
    assert!(out.join("notes.json").is_file());
    assert!(out.join("motos-backup.json.bak").is_file());
    assert!(out.join("other-honda.json").is_file());
}

#[test]
fn fractional_price_keeps_decimals() {
    let json = serde_json::to_value(moto("Moto Guzzi", "V7", Some(41250.5))).unwrap();
    assert_eq!(json["price"], serde_json::json!(41250.5));
}

#[test]
fn empty_catalog_writes_empty_array() {
    let tmp = TempDir::new().unwrap();
    let summary = write_output(tmp.path(), "motos", &[]).unwrap();
    assert!(summary.shards.is_empty());
    assert_eq!(fs::read_to_string(&summary.catalog_path).unwrap(), "[]\n");
}

#[test]
fn load_catalog_reports_bad_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("motos.json");
    fs::write(&path, "{ not json").unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(err.to_string().contains("motos.json"));
}
