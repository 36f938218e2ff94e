use std::fs;
use std::path::Path;
use tapaterra_core::prelude::*;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"\x89PNG fake").unwrap();
}

fn source_tree(root: &Path) {
    touch(&root.join("europe/large/poland.png"));
    touch(&root.join("europe/large/czechia.png"));
    touch(&root.join("europe/small/poland.png"));
    touch(&root.join("africa/large/chad.png"));
    fs::write(root.join("africa/large/notes.txt"), "not an image").unwrap();
    // no large variant: skipped
    touch(&root.join("oceania/small/fiji.png"));
}

fn subdirs(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn manifest_count(dir: &Path) -> usize {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_name() == "Contents.json")
        .count()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn builds_one_folder_per_region_and_one_imageset_per_flag() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    source_tree(src.path());
    let dest_root = dst.path().join("Flags");

    let report = import_flags(&ImportConfig {
        source_root: src.path().to_path_buf(),
        dest_root: dest_root.clone(),
        size: SizeVariant::Large,
    })
    .unwrap();

    assert_eq!(report.regions, vec!["Africa", "Europe"]);
    assert_eq!(report.images, 3);
    assert_eq!(subdirs(&dest_root), vec!["Africa", "Europe"]);
    assert_eq!(
        subdirs(&dest_root.join("Europe")),
        vec!["czechia.imageset", "poland.imageset"]
    );

    let root = read_json(&dest_root.join("Contents.json"));
    assert_eq!(root["properties"]["provides-namespace"], true);
    let region = read_json(&dest_root.join("Europe/Contents.json"));
    assert_eq!(region["properties"]["provides-namespace"], false);

    let set = dest_root.join("Europe/poland.imageset");
    assert_eq!(fs::read(set.join("poland.png")).unwrap(), b"\x89PNG fake");
    let manifest = read_json(&set.join("Contents.json"));
    assert_eq!(manifest["images"][0]["filename"], "poland.png");
    assert!(!dest_root.join("Africa/notes.imageset").exists());

    // root + one per region + one per image
    assert_eq!(manifest_count(&dest_root), 1 + report.regions.len() + report.images);
    for set in ["Africa/chad", "Europe/czechia", "Europe/poland"] {
        let manifest = read_json(&dest_root.join(format!("{set}.imageset/Contents.json")));
        assert_eq!(manifest["images"].as_array().unwrap().len(), 1);
        assert_eq!(manifest["info"]["author"], "xcode");
    }
}

#[cfg(unix)]
#[test]
fn symlinked_regions_and_images_are_followed() {
    use std::os::unix::fs::symlink;

    let store = tempfile::tempdir().unwrap();
    touch(&store.path().join("asia/large/japan.png"));
    touch(&store.path().join("nepal.png"));

    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    symlink(store.path().join("asia"), src.path().join("asia")).unwrap();
    touch(&src.path().join("europe/large/poland.png"));
    symlink(
        store.path().join("nepal.png"),
        src.path().join("europe/large/nepal.png"),
    )
    .unwrap();

    let report = import_flags(&ImportConfig {
        source_root: src.path().to_path_buf(),
        dest_root: dst.path().join("Flags"),
        size: SizeVariant::Large,
    })
    .unwrap();

    assert_eq!(report.regions, vec!["Asia", "Europe"]);
    assert_eq!(report.images, 3);
    assert!(dst.path().join("Flags/Asia/japan.imageset/japan.png").is_file());
    assert!(dst.path().join("Flags/Europe/nepal.imageset/nepal.png").is_file());
}

#[test]
fn size_variant_selects_regions() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    source_tree(src.path());

    let report = import_flags(&ImportConfig {
        source_root: src.path().to_path_buf(),
        dest_root: dst.path().join("Flags"),
        size: SizeVariant::Small,
    })
    .unwrap();

    assert_eq!(report.regions, vec!["Europe", "Oceania"]);
    assert_eq!(report.images, 2);
}

#[test]
fn rerun_removes_stale_output() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    source_tree(src.path());
    let config = ImportConfig {
        source_root: src.path().to_path_buf(),
        dest_root: dst.path().join("Flags"),
        size: SizeVariant::Large,
    };
    import_flags(&config).unwrap();
    touch(&config.dest_root.join("Stale/leftover.imageset/leftover.png"));

    fs::remove_dir_all(src.path().join("africa")).unwrap();
    let report = import_flags(&config).unwrap();

    assert_eq!(report.regions, vec!["Europe"]);
    assert_eq!(subdirs(&config.dest_root), vec!["Europe"]);
}

#[test]
fn missing_source_root_is_an_error() {
    let dst = tempfile::tempdir().unwrap();
    let err = import_flags(&ImportConfig {
        source_root: dst.path().join("does-not-exist"),
        dest_root: dst.path().join("Flags"),
        size: SizeVariant::Large,
    });
    assert!(err.is_err());
}
