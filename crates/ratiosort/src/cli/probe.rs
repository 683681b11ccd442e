//! The `ratiosort probe` command: inspect individual files.

use clap::Args;
use ratiosort_core::config::ProbeBackend;
use ratiosort_core::pipeline::probe_all;
use ratiosort_core::{
    classify, ClassificationConfigBuilder, ClassificationResult, Config, ProviderFactory,
    Resolution, ResolutionProvider, ResolutionTier,
};
use serde::Serialize;
use std::path::PathBuf;

use super::sort::ProbeArg;

/// Arguments for the `probe` command.
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Image files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Resolution probe backend [default: `probe.backend` from config]
    #[arg(long, value_enum)]
    pub probe: Option<ProbeArg>,

    /// Print one JSON object per file
    #[arg(long)]
    pub json: bool,
}

/// What `probe` reports for one file.
#[derive(Debug, Serialize)]
struct ProbeReport {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<ResolutionTier>,
    /// Ratio label under the configured criteria, if the file would be sorted
    #[serde(skip_serializing_if = "Option::is_none")]
    matched: Option<String>,
}

impl ProbeReport {
    fn new(
        path: PathBuf,
        resolution: Option<Resolution>,
        result: Option<ClassificationResult>,
    ) -> Self {
        let matched = match result {
            Some(ClassificationResult::Matched { ratio_label, .. }) => Some(ratio_label),
            _ => None,
        };
        Self {
            path,
            width: resolution.map(|r| r.width()),
            height: resolution.map(|r| r.height()),
            ratio: resolution.map(|r| (r.aspect_ratio() * 1000.0).round() / 1000.0),
            tier: resolution.map(ResolutionTier::from),
            matched,
        }
    }

    fn to_line(&self) -> String {
        match (self.width, self.height, self.ratio, self.tier) {
            (Some(w), Some(h), Some(ratio), Some(tier)) => {
                let verdict = match &self.matched {
                    Some(label) => format!("-> Ratio_{label}/{tier}"),
                    None => "(rejected)".to_string(),
                };
                format!("{}: {w}x{h}  ratio {ratio:.3}  {tier}  {verdict}", self.path.display())
            }
            _ => format!("{}: resolution unknown", self.path.display()),
        }
    }
}

/// Execute the probe command.
pub async fn execute(args: ProbeArgs, config: &Config) -> anyhow::Result<()> {
    let classification = ClassificationConfigBuilder::new(config.classification.clone()).build()?;
    let backend = args.probe.map(ProbeBackend::from).unwrap_or(config.probe.backend);
    let provider = ProviderFactory::create(backend, &config.probe);
    tracing::debug!("Probing {} file(s) with {}", args.files.len(), provider.name());

    for (path, resolution) in probe_all(provider.as_ref(), &args.files).await {
        let result = resolution.map(|res| classify(res, &classification));
        let report = ProbeReport::new(path, resolution, result);
        if args.json {
            println!("{}", ratiosort_core::output::to_json(&report, false)?);
        } else {
            println!("{}", report.to_line());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_for_matched_file() {
        let res = Resolution::new(3840, 2160);
        let report = ProbeReport::new(
            PathBuf::from("city.jpg"),
            res,
            Some(ClassificationResult::Matched {
                ratio_label: "16x9".into(),
                tier: ResolutionTier::Uhd4k,
            }),
        );
        assert_eq!(
            report.to_line(),
            "city.jpg: 3840x2160  ratio 1.778  4K_UHD  -> Ratio_16x9/4K_UHD"
        );
    }

    #[test]
    fn test_line_for_unknown_file() {
        let report = ProbeReport::new(PathBuf::from("notes.png"), None, None);
        assert_eq!(report.to_line(), "notes.png: resolution unknown");
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"path":"notes.png"}"#);
    }

    #[test]
    fn test_json_uses_tier_label() {
        let report = ProbeReport::new(
            PathBuf::from("small.png"),
            Resolution::new(1280, 720),
            Some(ClassificationResult::Rejected),
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""tier":"HD_720p""#));
        assert!(!json.contains("matched"));
    }
}
