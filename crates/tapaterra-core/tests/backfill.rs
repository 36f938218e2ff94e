use tapaterra_core::prelude::*;

fn source() -> MemorySource {
    MemorySource::new()
        .with_json(r#"{"name": {"common": "Austria"}, "cca2": "AT", "cca3": "AUT", "borders": ["CZE", "DEU", "HUN", "ITA", "LIE", "SVK", "SVN", "CHE"]}"#)
        .unwrap()
        .with_json(r#"{"name": {"common": "Germany"}, "cca2": "DE", "cca3": "DEU", "borders": ["AUT", "BEL", "CZE", "DNK", "FRA", "LUX", "NLD", "POL", "CHE"]}"#)
        .unwrap()
        .with_json(r#"{"name": {"common": "Switzerland"}, "cca2": "CH", "cca3": "CHE", "borders": ["AUT", "FRA", "ITA", "LIE", "DEU"]}"#)
        .unwrap()
        .with_json(r#"{"name": {"common": "Iceland"}, "cca2": "IS", "cca3": "ISL", "borders": []}"#)
        .unwrap()
        .with_json(r#"{"name": {"common": "Italy"}, "cca2": "IT", "cca3": "ITA", "borders": ["AUT", "FRA", "SMR", "SVN", "CHE", "VAT"]}"#)
        .unwrap()
}

const DOC: &str = r#"{
  "AT": {"isoCode": "AT", "capital": "Vienna"},
  "DE": {"isoCode": "DE", "capital": "Berlin", "neighbours": []},
  "IS": {"isoCode": "IS", "capital": "Reykjavik"},
  "IT": {"isoCode": "IT", "capital": "Rome", "neighbours": ["France", "Vatican City"]},
  "XK": {"isoCode": "XK", "capital": "Pristina"}
}"#;

fn doc() -> DetailsDocument {
    DetailsDocument::from_json(DOC).unwrap()
}

fn details(doc: &DetailsDocument, code: &str) -> CountryDetails {
    doc.get(code).unwrap().unwrap()
}

/// Written the way `json.dump(data, f, indent=2, ensure_ascii=False)` lays it out.
const PYTHON_SHAPED: &str = r#"{
  "IT": {
    "isoCode": "IT",
    "capital": "Rome",
    "flagEmoji": "🇮🇹",
    "neighbours": [
      "France",
      "Vatican City"
    ],
    "area": 301336
  },
  "AT": {
    "isoCode": "AT",
    "capital": "Vienna",
    "area": 83871,
    "anthem": "Land der Berge"
  },
  "XK": {
    "capital": "Pristina",
    "neighbours": null
  }
}"#;

/// The pretty-printed text of one top-level record.
fn record_text<'a>(text: &'a str, code: &str) -> &'a str {
    let start = text.find(&format!("\n  \"{code}\": {{")).unwrap();
    let end = start + text[start..].find("\n  }").unwrap();
    &text[start..end]
}

fn no_checkpoint(_: &DetailsDocument) -> Result<()> {
    Ok(())
}

#[test]
fn fills_missing_and_empty_neighbours() {
    let mut doc = doc();
    let mut backfill = NeighbourBackfill::new(source(), BackfillOptions::plain().without_delays());
    let report = backfill.run_with(&mut doc, no_checkpoint).unwrap();

    assert_eq!(details(&doc, "AT").neighbours(), ["Germany", "Italy", "Switzerland"]);
    assert_eq!(details(&doc, "DE").neighbours(), ["Austria", "Switzerland"]);
    assert_eq!(report.total, 5);
    assert_eq!(report.updated, 2);
    assert_eq!(report.skipped, 1);
}

#[test]
fn borderless_entity_gets_explicit_empty_list() {
    let mut doc = doc();
    let mut backfill = NeighbourBackfill::new(source(), BackfillOptions::plain().without_delays());
    let report = backfill.run_with(&mut doc, no_checkpoint).unwrap();

    assert_eq!(doc.neighbour_status("IS"), NeighbourStatus::Empty);
    assert_eq!(report.empty, 1);

    let json = doc.to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["IS"]["neighbours"], serde_json::json!([]));
}

#[test]
fn failed_lookup_leaves_entry_untouched() {
    let mut doc = doc();
    let before = doc.record("XK").unwrap().clone();
    let mut backfill = NeighbourBackfill::new(source(), BackfillOptions::fast().without_delays());
    let report = backfill.run_with(&mut doc, no_checkpoint).unwrap();

    assert_eq!(doc.record("XK"), Some(&before));
    assert_eq!(doc.neighbour_status("XK"), NeighbourStatus::Missing);
    assert_eq!(report.failed, 1);
}

#[test]
fn known_neighbours_are_byte_for_byte_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("country_details.json");
    std::fs::write(&path, PYTHON_SHAPED).unwrap();

    let mut backfill = NeighbourBackfill::new(source(), BackfillOptions::fast().without_delays());
    let report = backfill.run_file(&path).unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(report.failed, 1);

    let after = std::fs::read_to_string(&path).unwrap();
    assert_eq!(record_text(&after, "IT"), record_text(PYTHON_SHAPED, "IT"));
    assert_eq!(record_text(&after, "XK"), record_text(PYTHON_SHAPED, "XK"));
}

#[test]
fn update_rewrites_only_the_neighbours_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("country_details.json");
    std::fs::write(&path, PYTHON_SHAPED).unwrap();

    let mut backfill = NeighbourBackfill::new(source(), BackfillOptions::plain().without_delays());
    backfill.run_file(&path).unwrap();

    let after = std::fs::read_to_string(&path).unwrap();
    let expected = r#"
  "AT": {
    "isoCode": "AT",
    "capital": "Vienna",
    "area": 83871,
    "anthem": "Land der Berge",
    "neighbours": [
      "Germany",
      "Italy",
      "Switzerland"
    ]"#;
    assert_eq!(record_text(&after, "AT"), expected);

    // a second run over a settled document rewrites the same bytes
    backfill.run_file(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), after);
}

#[test]
fn record_without_iso_code_is_backfilled_under_its_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("country_details.json");
    std::fs::write(&path, r#"{"IS": {"capital": "Reykjavik"}}"#).unwrap();

    let mut backfill = NeighbourBackfill::new(source(), BackfillOptions::fast().without_delays());
    let report = backfill.run_file(&path).unwrap();
    assert_eq!(report.empty, 1);

    let doc = DetailsDocument::load(&path).unwrap();
    assert_eq!(doc.neighbour_status("IS"), NeighbourStatus::Empty);
    assert!(doc.record("IS").unwrap().get("isoCode").is_none());
    assert_eq!(details(&doc, "IS").iso_code, "IS");
}

#[test]
fn fast_variant_memoizes_border_names() {
    let plain_source = source();
    let mut plain = NeighbourBackfill::new(&plain_source, BackfillOptions::plain().without_delays());
    plain.run_with(&mut doc(), no_checkpoint).unwrap();

    let fast_source = source();
    let mut fast = NeighbourBackfill::new(&fast_source, BackfillOptions::fast().without_delays());
    fast.run_with(&mut doc(), no_checkpoint).unwrap();

    // AT and DE both border CHE
    assert!(fast_source.calls() < plain_source.calls());
    assert!(fast.cache().hits() >= 1);
}

#[test]
fn checkpoints_every_ten_updates() {
    let mut src = MemorySource::new()
        .with_json(r#"{"name": {"common": "Hub"}, "cca2": "HB", "cca3": "HUB"}"#)
        .unwrap();
    let mut doc = DetailsDocument::new();
    for i in 0..25u8 {
        let code = format!("{}{}", (b'A' + i / 5) as char, (b'A' + i % 5) as char);
        src = src
            .with_json(&format!(
                r#"{{"name": {{"common": "C{i}"}}, "cca2": "{code}", "borders": ["HUB"]}}"#
            ))
            .unwrap();
        doc.insert(&CountryDetails::new(code)).unwrap();
    }

    let mut saves = 0;
    let mut backfill = NeighbourBackfill::new(src, BackfillOptions::fast().without_delays());
    let report = backfill
        .run_with(&mut doc, |_| {
            saves += 1;
            Ok(())
        })
        .unwrap();

    assert_eq!(report.updated, 25);
    assert_eq!(report.checkpoints, 2);
    assert_eq!(saves, 2);
    assert!(doc.codes().all(|code| details(&doc, code).neighbours() == ["Hub"]));
}

#[test]
fn plain_variant_never_checkpoints() {
    let mut saves = 0;
    let mut backfill = NeighbourBackfill::new(source(), BackfillOptions::plain().without_delays());
    let report = backfill
        .run_with(&mut doc(), |_| {
            saves += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(report.checkpoints, 0);
    assert_eq!(saves, 0);
}
