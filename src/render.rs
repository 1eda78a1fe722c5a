use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::charts;
use crate::cli::RenderArgs;
use crate::page;
use crate::pipeline;
use crate::storage::DatasetPaths;
use crate::transform::RegionFilter;

/// One-shot render: run the pipeline once and write the dashboard page.
pub fn run(opts: RenderArgs) -> Result<()> {
    let paths = DatasetPaths::new(&opts.data_dir);
    let region = RegionFilter::from(opts.region);

    let t0 = std::time::Instant::now();
    let output = pipeline::run(&paths, &region)?;
    let data = charts::build_dashboard(&output)?;
    let html = page::render_page(&data)?;

    let out_path = Path::new(&opts.output);
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating {}", parent.display()))?;
    }
    fs::write(out_path, html)
        .with_context(|| format!("Failed writing {}", out_path.display()))?;

    tracing::info!(
        "Wrote dashboard page {} in {:.1}s (joined rows={} facilities={})",
        out_path.display(),
        t0.elapsed().as_secs_f64(),
        output.joined.len(),
        output.facilities.len()
    );
    Ok(())
}
