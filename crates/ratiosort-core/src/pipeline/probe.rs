//! Resolution discovery.
//!
//! A [`ResolutionProvider`] turns a path into pixel dimensions, or `None`
//! when it cannot. Providers never return errors: an unreadable file, a
//! missing inspector binary and a non-image file all look the same to the
//! caller, which counts the file as unresolved.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::{ProbeBackend, ProbeConfig};
use crate::types::Resolution;

static DIMENSIONS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)").expect("invalid dimensions regex"));

/// Trait that all resolution probes implement.
///
/// Uses `async_trait` so probes can be boxed as `Box<dyn ResolutionProvider>`.
#[async_trait]
pub trait ResolutionProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Dimensions of the image at `path`, if they can be determined.
    async fn probe(&self, path: &Path) -> Option<Resolution>;
}

/// Reads dimensions from the image header with the `image` crate.
///
/// Only the header is parsed; pixel data is never decoded.
#[derive(Debug, Default, Clone)]
pub struct ImageHeaderProvider;

impl ImageHeaderProvider {
    pub fn new() -> Self {
        Self
    }

    fn read_dimensions(path: &Path) -> Option<(u32, u32)> {
        image::ImageReader::open(path)
            .ok()?
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

#[async_trait]
impl ResolutionProvider for ImageHeaderProvider {
    fn name(&self) -> &str {
        "image"
    }

    async fn probe(&self, path: &Path) -> Option<Resolution> {
        let owned = path.to_path_buf();
        let dims = tokio::task::spawn_blocking(move || Self::read_dimensions(&owned))
            .await
            .ok()
            .flatten();
        let (width, height) = dims?;
        Resolution::new(width, height)
    }
}

/// Shells out to a file-type inspector (`file` by default) and scans its
/// description for a `WIDTH x HEIGHT` pair.
#[derive(Debug, Clone)]
pub struct FileCommandProvider {
    program: String,
    timeout: Duration,
}

impl FileCommandProvider {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Extract dimensions from inspector output of the form `<path>: <description>`.
    ///
    /// Everything up to the first colon is dropped. The first `<digits> x <digits>`
    /// pair with both sides positive wins, even if a later pair is the real
    /// image size (e.g. a JPEG density of `72x72` listed before the dimensions).
    pub fn parse_output(output: &str) -> Option<Resolution> {
        let description = output
            .split_once(':')
            .map(|(_, rest)| rest)
            .unwrap_or(output);

        DIMENSIONS_PATTERN
            .captures_iter(description)
            .find_map(|caps| {
                let width = caps[1].parse::<u32>().ok()?;
                let height = caps[2].parse::<u32>().ok()?;
                Resolution::new(width, height)
            })
    }
}

#[async_trait]
impl ResolutionProvider for FileCommandProvider {
    fn name(&self) -> &str {
        &self.program
    }

    async fn probe(&self, path: &Path) -> Option<Resolution> {
        let mut command = Command::new(&self.program);
        command
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::debug!("Failed to run {} on {:?}: {}", self.program, path, e);
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    "{} timed out after {}ms on {:?}",
                    self.program,
                    self.timeout.as_millis(),
                    path
                );
                return None;
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_output(&stdout)
    }
}

/// Tries each provider in order and returns the first answer.
pub struct ChainProvider {
    providers: Vec<Box<dyn ResolutionProvider>>,
}

impl ChainProvider {
    pub fn new(providers: Vec<Box<dyn ResolutionProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl ResolutionProvider for ChainProvider {
    fn name(&self) -> &str {
        "chain"
    }

    async fn probe(&self, path: &Path) -> Option<Resolution> {
        for provider in &self.providers {
            if let Some(res) = provider.probe(path).await {
                return Some(res);
            }
            tracing::trace!("{} found no resolution for {:?}", provider.name(), path);
        }
        None
    }
}

/// Builds the provider selected by the probe configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider for `backend`, using `config` for the inspector settings.
    pub fn create(backend: ProbeBackend, config: &ProbeConfig) -> Box<dyn ResolutionProvider> {
        let timeout = Duration::from_millis(config.timeout_ms);
        match backend {
            ProbeBackend::Image => Box::new(ImageHeaderProvider::new()),
            ProbeBackend::File => Box::new(FileCommandProvider::new(&config.command, timeout)),
            ProbeBackend::Auto => Box::new(ChainProvider::new(vec![
                Box::new(ImageHeaderProvider::new()),
                Box::new(FileCommandProvider::new(&config.command, timeout)),
            ])),
        }
    }
}

/// Probe every path in order, pairing each with its result.
pub async fn probe_all(
    provider: &dyn ResolutionProvider,
    paths: &[PathBuf],
) -> Vec<(PathBuf, Option<Resolution>)> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        results.push((path.clone(), provider.probe(path).await));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(w: u32, h: u32) -> Option<Resolution> {
        Resolution::new(w, h)
    }

    #[test]
    fn test_parse_png_description() {
        let out = "shot.png: PNG image data, 5120 x 1440, 8-bit/color RGBA, non-interlaced\n";
        assert_eq!(FileCommandProvider::parse_output(out), res(5120, 1440));
    }

    #[test]
    fn test_parse_first_pair_wins() {
        let out = "a.jpg: JPEG image data, JFIF standard 1.01, density 72x72, \
                   baseline, precision 8, 3840x2160, components 3";
        assert_eq!(FileCommandProvider::parse_output(out), res(72, 72));
    }

    #[test]
    fn test_parse_skips_zero_pairs() {
        let out = "a.gif: GIF image data, version 89a, 0 x 0, 640 x 480";
        assert_eq!(FileCommandProvider::parse_output(out), res(640, 480));
    }

    #[test]
    fn test_parse_drops_path_prefix() {
        let out = "/pics/100x100/a.webp: RIFF (little-endian) data, Web/P image, 1920x1080";
        assert_eq!(FileCommandProvider::parse_output(out), res(1920, 1080));
    }

    #[test]
    fn test_parse_case_and_whitespace() {
        assert_eq!(
            FileCommandProvider::parse_output("x.bmp: PC bitmap, 1280 X 720"),
            res(1280, 720)
        );
        assert_eq!(
            FileCommandProvider::parse_output("x.bmp: 800x   600"),
            res(800, 600)
        );
    }

    #[test]
    fn test_parse_without_colon_uses_whole_output() {
        assert_eq!(FileCommandProvider::parse_output("2560x1440"), res(2560, 1440));
    }

    #[test]
    fn test_parse_no_dimensions() {
        assert_eq!(FileCommandProvider::parse_output("notes.txt: ASCII text"), None);
        assert_eq!(FileCommandProvider::parse_output(""), None);
    }

    #[test]
    fn test_parse_overflowing_pair_is_skipped() {
        let out = "a.png: 99999999999 x 10, 300 x 200";
        assert_eq!(FileCommandProvider::parse_output(out), res(300, 200));
    }

    #[tokio::test]
    async fn test_image_header_provider_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        image::RgbImage::new(64, 36).save(&path).unwrap();

        let provider = ImageHeaderProvider::new();
        assert_eq!(provider.probe(&path).await, res(64, 36));
    }

    #[tokio::test]
    async fn test_image_header_provider_ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("real.png");
        image::RgbImage::new(30, 20).save(&png).unwrap();
        let misnamed = dir.path().join("real.jpg");
        std::fs::copy(&png, &misnamed).unwrap();

        assert_eq!(ImageHeaderProvider::new().probe(&misnamed).await, res(30, 20));
    }

    #[tokio::test]
    async fn test_image_header_provider_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let provider = ImageHeaderProvider::new();
        assert_eq!(provider.probe(&path).await, None);
        assert_eq!(provider.probe(Path::new("/nonexistent/a.png")).await, None);
    }

    #[tokio::test]
    async fn test_file_command_missing_binary() {
        let provider =
            FileCommandProvider::new("ratiosort-no-such-binary", Duration::from_secs(1));
        assert_eq!(provider.probe(Path::new("a.png")).await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_command_parses_stdout() {
        // `echo` repeats its argument, standing in for an inspector.
        let provider = FileCommandProvider::new("echo", Duration::from_secs(5));
        let got = provider.probe(Path::new("img.png: PNG image data, 3840 x 2160")).await;
        assert_eq!(got, res(3840, 2160));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_command_times_out() {
        let provider = FileCommandProvider::new("sleep", Duration::from_millis(50));
        let start = std::time::Instant::now();
        assert_eq!(provider.probe(Path::new("5")).await, None);
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    struct Fixed(Option<Resolution>);

    #[async_trait]
    impl ResolutionProvider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn probe(&self, _path: &Path) -> Option<Resolution> {
            self.0
        }
    }

    #[tokio::test]
    async fn test_chain_returns_first_answer() {
        let chain = ChainProvider::new(vec![
            Box::new(Fixed(None)),
            Box::new(Fixed(res(100, 50))),
            Box::new(Fixed(res(1, 1))),
        ]);
        assert_eq!(chain.probe(Path::new("x")).await, res(100, 50));

        let empty = ChainProvider::new(vec![Box::new(Fixed(None))]);
        assert_eq!(empty.probe(Path::new("x")).await, None);
    }

    #[tokio::test]
    async fn test_probe_all_keeps_order() {
        let provider = Fixed(res(10, 20));
        let paths = vec![PathBuf::from("b.png"), PathBuf::from("a.png")];
        let results = probe_all(&provider, &paths).await;
        assert_eq!(results[0].0, PathBuf::from("b.png"));
        assert_eq!(results[1].1, res(10, 20));
    }

    #[test]
    fn test_factory_names() {
        let config = ProbeConfig::default();
        assert_eq!(ProviderFactory::create(ProbeBackend::Image, &config).name(), "image");
        assert_eq!(ProviderFactory::create(ProbeBackend::File, &config).name(), "file");
        assert_eq!(ProviderFactory::create(ProbeBackend::Auto, &config).name(), "chain");
    }
}
