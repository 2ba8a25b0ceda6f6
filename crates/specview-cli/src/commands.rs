use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use specview_cli::pipeline::{RenderRequest, parse_filter, render_view};
use specview_config::{ConfigHandle, DoctorReport, default_config_path};
use specview_ingest::{read_catalog_csv, select_rows, spec_columns};
use specview_transform::facets;

use crate::cli::{ColumnsArgs, ConfigArgs, DoctorArgs, OutputFormatArg, RenderArgs};
use crate::summary::{print_categories, print_columns, print_view};

fn config_path(args: &ConfigArgs) -> PathBuf {
    args.config.clone().unwrap_or_else(default_config_path)
}

fn load_config(args: &ConfigArgs) -> Result<ConfigHandle> {
    let path = config_path(args);
    ConfigHandle::from_path(&path)
        .with_context(|| format!("load spec view config: {}", path.display()))
}

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let handle = load_config(&args.config)?;
    let catalog = read_catalog_csv(&args.catalog)
        .with_context(|| format!("read catalog: {}", args.catalog.display()))?;
    let filters = args
        .filters
        .iter()
        .map(|arg| parse_filter(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let request = RenderRequest::new(&args.category, args.series.clone())
        .with_group_header(&args.group_column)
        .with_filters(filters);

    let snapshot = handle.current();
    let rendered = render_view(snapshot.store(), &request, &catalog, None)?;
    match args.format {
        OutputFormatArg::Table => print_view(&rendered),
        OutputFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }
    Ok(())
}

pub fn run_categories(args: &ConfigArgs) -> Result<()> {
    let handle = load_config(args)?;
    print_categories(handle.current().store());
    Ok(())
}

/// Returns whether the document is clean.
pub fn run_doctor(args: &DoctorArgs) -> Result<bool> {
    let handle = load_config(&args.config)?;
    let snapshot = handle.current();
    let report = DoctorReport::from_store(snapshot.store());
    info!(fingerprint = snapshot.fingerprint(), "checked config");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(report.is_clean())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let catalog = read_catalog_csv(&args.catalog)
        .with_context(|| format!("read catalog: {}", args.catalog.display()))?;
    let columns = spec_columns(&catalog);
    let rows = match &args.category {
        Some(category) => select_rows(&catalog, &args.group_column, category, None),
        None => catalog.rows.iter().collect(),
    };
    print_columns(&columns, &facets(&rows, &columns));
    Ok(())
}
