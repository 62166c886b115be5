pub mod cli;
pub mod client;
pub mod compound;
pub mod config;
pub mod display;
pub mod filter;

use crate::client::ApiClient;
use crate::compound::Compound;
use crate::filter::{FilterConfig, FilterEvent, matches_compound, to_search_query};
use anyhow::{Context, Result};
use indicatif::ProgressBar;

pub use cli::{Cli, ColorMode, Commands, Model, OutputFormat, cli_parse};
pub use filter::extract;

fn write_output_file(path: &std::path::Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

pub fn run() -> Result<()> {
    let cli = cli_parse();
    let config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;

    // Set up color handling based on user preference
    match cli.color {
        ColorMode::Always => unsafe {
            std::env::set_var("CLICOLOR_FORCE", "1");
        },
        ColorMode::Never => unsafe {
            std::env::set_var("NO_COLOR", "1");
        },
        ColorMode::Auto => {
            // Default behavior - let the terminal decide
        }
    }

    if cli.verbose > 0 && !cli.quiet {
        eprintln!("Verbosity level: {}", cli.verbose);
        eprintln!("Color mode: {:?}", cli.color);
        eprintln!("Backend: {}", config.api.base_url);
        eprintln!("Config profile: {}", config.profile_name);
        if let Some(path) = &cli.config {
            eprintln!("Config file: {}", path.display());
        }
        if let Some(path) = &cli.output {
            eprintln!("Output will be written to: {}", path.display());
        }
    }

    let client = ApiClient::from_settings(&config.api).context("Failed to build backend client")?;

    let rendered = match &cli.command {
        Commands::Search {
            query,
            mol_weight,
            log_p,
            tpsa,
            target,
            activity,
            predicted,
            limit,
            no_predict,
        } => {
            let mut filters = FilterConfig::default();

            // The natural-language query replaces the whole config first;
            // manual flags are applied on top of it.
            if let Some(query) = query {
                filters = filters.apply(FilterEvent::NaturalQuery(query.clone()))?;
            }

            let mut events = Vec::new();
            if let Some([min, max]) = mol_weight.as_deref() {
                events.push(FilterEvent::SetMolWeight(*min, *max));
            }
            if let Some([min, max]) = log_p.as_deref() {
                events.push(FilterEvent::SetLogP(*min, *max));
            }
            if let Some([min, max]) = tpsa.as_deref() {
                events.push(FilterEvent::SetTpsa(*min, *max));
            }
            if let Some(target) = target {
                events.push(FilterEvent::SetTarget(Some(target.clone())));
            }
            if let Some(flag) = activity {
                events.push(FilterEvent::SetShowActive(flag.as_bool()));
                events.push(FilterEvent::SetShowInactive(!flag.as_bool()));
            }
            if let Some(flag) = predicted {
                events.push(FilterEvent::SetPredictedActive(Some(flag.as_bool())));
            }
            for event in events {
                filters = filters.apply(event)?;
            }

            if cli.verbose > 1 && !cli.quiet {
                eprintln!("Filter state: {filters:?}");
            }

            let rows = client
                .search(&to_search_query(&filters))
                .context("Search request failed")?;

            let limit = (*limit).unwrap_or(config.api.result_limit);
            let mut compounds: Vec<Compound> =
                rows.into_iter().take(limit).map(Compound::from).collect();

            if !no_predict {
                enrich_predictions(&client, &mut compounds, &config.api, &cli)?;
            }

            let visible: Vec<Compound> = compounds
                .into_iter()
                .filter(|compound| matches_compound(&filters, compound))
                .collect();

            match cli.format {
                OutputFormat::Text => display::format_search_text(&visible, &filters),
                OutputFormat::Json => display::format_search_json(&visible, &filters) + "\n",
            }
        }
        Commands::Info => {
            let rows = client
                .bioactivity()
                .context("Bioactivity request failed")?;
            let summary = display::build_summary(&rows);

            match cli.format {
                OutputFormat::Text => display::format_info_text(&summary),
                OutputFormat::Json => display::format_info_json(&summary) + "\n",
            }
        }
        Commands::Predict { descriptors, model } => {
            let response = client
                .predict(model.endpoint_path(), &descriptors.to_descriptors())
                .context("Prediction request failed")?;

            match cli.format {
                OutputFormat::Text => display::format_prediction_text(&response),
                OutputFormat::Json => display::format_prediction_json(&response) + "\n",
            }
        }
        Commands::Explain { descriptors } => {
            let response = client
                .explain(&descriptors.to_descriptors())
                .context("Explainability request failed")?;

            match cli.format {
                OutputFormat::Text => display::format_explain_text(&response),
                OutputFormat::Json => display::format_explain_json(&response) + "\n",
            }
        }
    };

    print!("{rendered}");
    if let Some(path) = &cli.output {
        write_output_file(path, &rendered)?;
    }

    Ok(())
}

/// Ask the backend's best model for a prediction on the leading rows
///
/// A failed prediction keeps the row's placeholder flag, matching how the
/// dashboard degrades when the model endpoint is unavailable.
fn enrich_predictions(
    client: &ApiClient,
    compounds: &mut [Compound],
    settings: &config::ApiSettings,
    cli: &Cli,
) -> Result<()> {
    let enrich = compounds.len().min(settings.predict_limit);
    if enrich == 0 {
        return Ok(());
    }

    let bar = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(enrich as u64)
    };

    for compound in compounds.iter_mut().take(enrich) {
        match client.predict(Model::Best.endpoint_path(), &compound.descriptors()) {
            Ok(prediction) => compound.apply_prediction(&prediction),
            Err(error) => {
                if cli.verbose > 0 && !cli.quiet {
                    eprintln!("Prediction failed for '{}': {error}", compound.compound_id);
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(())
}
