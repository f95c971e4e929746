use std::fs;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use raster_nest::io::export::export_outcome;
use raster_nest::io::import::Importer;
use raster_nest::io::svg::outcome_to_svg;
use raster_nest::nest::nest;
use raster_nest_cli::config::CliConfig;
use raster_nest_cli::io::cli::Cli;
use raster_nest_cli::io::output::NestOutput;
use raster_nest_cli::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    config.nest_config.validate()?;

    info!("Successfully parsed CliConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {:?}",
                args.solution_folder
            )
        })?;
    }

    let ext_instance = io::read_instance(args.input_file.as_path())?;
    let importer = Importer::new(config.nest_config.shape_modify);
    let (nesting, design_parts) = importer.import_instance(&ext_instance)?;

    let outcome = nest(&nesting, &design_parts, &config.nest_config)?;

    {
        let output = NestOutput {
            solution: export_outcome(&outcome, EPOCH.elapsed()),
            instance: ext_instance,
            config,
        };
        let solution_path = args.solution_folder.join(format!("sol_{input_file_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    {
        let svg_path = args.solution_folder.join(format!("sol_{input_file_stem}.svg"));
        let svg = outcome_to_svg(&outcome, config.svg_draw_options, &input_file_stem);
        io::write_svg(&svg, &svg_path)?;
    }

    Ok(())
}
