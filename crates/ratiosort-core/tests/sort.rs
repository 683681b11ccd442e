//! End-to-end sorting over a temporary directory tree.

use async_trait::async_trait;
use ratiosort_core::config::DiscoveryConfig;
use ratiosort_core::pipeline::ImageHeaderProvider;
use ratiosort_core::{
    ClassificationConfigBuilder, Config, FileDiscovery, FileOutcome, PresetBook,
    ResolutionProvider, Resolution, SortOptions, SortStats, Sorter, TransferMode,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Answers from a table keyed by file name; everything else is unresolved.
struct Table(HashMap<&'static str, (u32, u32)>);

#[async_trait]
impl ResolutionProvider for Table {
    fn name(&self) -> &str {
        "table"
    }

    async fn probe(&self, path: &Path) -> Option<Resolution> {
        let name = path.file_name()?.to_str()?;
        let (w, h) = self.0.get(name)?;
        Resolution::new(*w, *h)
    }
}

fn table() -> Table {
    Table(HashMap::from([
        ("city.jpg", (3840, 2160)),
        ("forest.png", (2560, 1440)),
        ("phone.jpg", (1080, 1920)),
        ("old.bmp", (1920, 1080)),
        ("ultra.webp", (5120, 1440)),
        ("tiny.gif", (7680, 4320)),
    ]))
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, path.to_string_lossy().as_bytes()).unwrap();
}

fn source_tree(root: &Path) {
    touch(&root.join("city.jpg"));
    touch(&root.join("nature/forest.png"));
    touch(&root.join("nature/phone.jpg"));
    touch(&root.join("archive/old.bmp"));
    touch(&root.join("archive/ultra.webp"));
    touch(&root.join("archive/tiny_thumbnail.gif"));
    touch(&root.join(".trash/city.jpg"));
    touch(&root.join("notes.txt"));
    touch(&root.join("broken.png"));
}

async fn run(source: &Path, dest: &Path, ratios: &[&str], mode: TransferMode) -> SortStats {
    let classification = ClassificationConfigBuilder::new(Config::default().classification)
        .ratios(Some(ratios.iter().map(|r| r.to_string()).collect()))
        .build()
        .unwrap();
    let sorter = Sorter::new(
        Box::new(table()),
        classification,
        SortOptions {
            destination: dest.to_path_buf(),
            mode,
            ..SortOptions::default()
        },
    );
    sorter.prepare().unwrap();

    let files = FileDiscovery::new(DiscoveryConfig::default())
        .exclude(dest)
        .discover(source);

    let mut stats = SortStats::default();
    for file in &files {
        stats.record(&sorter.process(&file.path).await);
    }
    stats
}

fn sorted_files(dest: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dest)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path().strip_prefix(dest).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn test_copy_run_sorts_tree() {
    let source = tempfile::tempdir().unwrap();
    source_tree(source.path());
    let dest = source.path().join("Sorted_Images");

    let stats = run(source.path(), &dest, &["16:9", "32:9"], TransferMode::Copy).await;

    assert_eq!(stats.sorted, 3);
    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.unresolved, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(
        sorted_files(&dest),
        vec![
            PathBuf::from("Ratio_16x9/4K_UHD/city.jpg"),
            PathBuf::from("Ratio_16x9/QHD_2K/forest.png"),
            PathBuf::from("Ratio_32x9/QHD_2K/ultra.webp"),
        ]
    );
    assert!(source.path().join("city.jpg").exists());
}

#[tokio::test]
async fn test_second_run_skips_destination_and_suffixes() {
    let source = tempfile::tempdir().unwrap();
    source_tree(source.path());
    let dest = source.path().join("Sorted_Images");

    run(source.path(), &dest, &["16:9"], TransferMode::Copy).await;
    let stats = run(source.path(), &dest, &["16:9"], TransferMode::Copy).await;

    // Already sorted copies are not rediscovered as sources.
    assert_eq!(stats.total(), 6);
    assert!(dest.join("Ratio_16x9/4K_UHD/city_1.jpg").exists());
    assert!(dest.join("Ratio_16x9/QHD_2K/forest_1.png").exists());
}

#[tokio::test]
async fn test_move_run_empties_matches_from_source() {
    let source = tempfile::tempdir().unwrap();
    source_tree(source.path());
    let dest = tempfile::tempdir().unwrap();

    let stats = run(source.path(), dest.path(), &["16:9"], TransferMode::Move).await;

    assert_eq!(stats.sorted, 2);
    assert!(!source.path().join("city.jpg").exists());
    assert!(!source.path().join("nature/forest.png").exists());
    assert!(source.path().join("nature/phone.jpg").exists());
    assert!(source.path().join(".trash/city.jpg").exists());

    let moved = fs::read_to_string(dest.path().join("Ratio_16x9/4K_UHD/city.jpg")).unwrap();
    assert!(moved.ends_with("city.jpg"));
}

#[tokio::test]
async fn test_header_probe_on_real_images() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    image::RgbImage::new(320, 180)
        .save(source.path().join("wide.png"))
        .unwrap();
    image::RgbImage::new(200, 200)
        .save(source.path().join("square.png"))
        .unwrap();
    // Extension lies about the content; the header still decides.
    image::RgbImage::new(480, 270)
        .save_with_format(source.path().join("renamed.jpg"), image::ImageFormat::Png)
        .unwrap();

    let classification = ClassificationConfigBuilder::default()
        .min_width(Some(300))
        .min_height(Some(150))
        .ratios(Some(vec!["16:9".into()]))
        .tolerance(Some(0.1))
        .build()
        .unwrap();
    let sorter = Sorter::new(
        Box::new(ImageHeaderProvider::new()),
        classification,
        SortOptions {
            destination: dest.path().to_path_buf(),
            ..SortOptions::default()
        },
    );

    let files = FileDiscovery::new(DiscoveryConfig::default()).discover(source.path());
    assert_eq!(files.len(), 3);

    let mut labels = Vec::new();
    for file in &files {
        labels.push((file.file_name(), sorter.process(&file.path).await.label()));
    }
    assert_eq!(
        labels,
        vec![
            ("renamed.jpg".to_string(), "sorted"),
            ("square.png".to_string(), "rejected"),
            ("wide.png".to_string(), "sorted"),
        ]
    );
    assert!(dest.path().join("Ratio_16x9/Standard_Res/wide.png").exists());
}

#[tokio::test]
async fn test_preset_selects_criteria() {
    let book = PresetBook::parse(
        r#"
        [ultrawide]
        height = 1440
        ratios = ["32:9"]
        "#,
    )
    .unwrap();
    let preset = book.get("UltraWide").unwrap().clone();

    let classification = ClassificationConfigBuilder::new(Config::default().classification)
        .preset(preset)
        .build()
        .unwrap();
    let sorter = Sorter::new(
        Box::new(table()),
        classification,
        SortOptions {
            dry_run: true,
            destination: PathBuf::from("/unused"),
            ..SortOptions::default()
        },
    );

    match sorter.process(Path::new("/photos/ultra.webp")).await {
        FileOutcome::DryRun(placement) => {
            assert_eq!(placement.directory(), PathBuf::from("/unused/Ratio_32x9/QHD_2K"));
        }
        other => panic!("expected dry run, got {other:?}"),
    }
    assert_eq!(
        sorter.process(Path::new("/photos/city.jpg")).await.label(),
        "rejected"
    );
}
