use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use pharmguard_core::utils::read_to_buffer;
use pharmguard_report::{
    AnalysisOptions, AnalysisResult, Analyzer, ExplainConfig, HttpExplainer, Report, enrich,
    failure_report,
};

use crate::common::load_config;

pub fn run_analyze(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let input = matches
        .get_one::<String>("input")
        .expect("A path to a VCF file is required.");
    let output = matches.get_one::<String>("output");
    let options = AnalysisOptions {
        drug_filter: matches
            .get_one::<String>("drug")
            .filter(|drug| !drug.trim().is_empty())
            .cloned(),
    };

    let config = load_config(matches)?;
    let explain = matches.get_flag("explain") || config.explain.enabled;

    let start = Instant::now();

    let reference = config
        .load_reference()
        .context("Failed to load reference tables")?;
    let analyzer = Analyzer::new(reference);

    let buffer = read_to_buffer(Path::new(input))
        .with_context(|| format!("Failed to read VCF file: {}", input))?;

    let result = match analyzer.analyze(&buffer, &options) {
        Ok(result) => result,
        Err(e) => {
            let body = failure_report("VCF parsing failed", &e.to_string());
            write_output(output, &serde_json::to_string_pretty(&body)?)?;
            return Err(e).with_context(|| format!("Could not analyze {}", input));
        }
    };

    if result.recommendations.is_empty() {
        warn!("No drug recommendations found for the detected variants");
    }

    let explanations = if explain {
        explain_result(&config.explain, &result)
    } else {
        HashMap::new()
    };

    let report = Report::new(result, &explanations, start.elapsed());
    write_output(output, &report.to_json_pretty()?)?;

    Ok(())
}

///
/// Best-effort enrichment. Any failure to set up the explainer only costs
/// the explanations.
///
fn explain_result(config: &ExplainConfig, result: &AnalysisResult) -> HashMap<String, String> {
    let explainer = match HttpExplainer::from_config(config) {
        Ok(explainer) => explainer,
        Err(e) => {
            warn!("Explanations disabled: {}", e);
            return HashMap::new();
        }
    };

    let requests = result.explain_requests();
    info!(
        "Requesting {} explanation(s) from {} ({})",
        requests.len(),
        config.endpoint,
        config.model
    );

    let explanations = enrich(Arc::new(explainer), &requests, config.budget(), None);
    info!(
        "Received {} of {} explanation(s)",
        explanations.len(),
        requests.len()
    );

    explanations
}

fn write_output(output: Option<&String>, body: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, body).with_context(|| format!("Failed to write report: {}", path))?;
            info!("Report written to {}", path);
        }
        None => println!("{}", body),
    }
    Ok(())
}
