use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use crate::client::{Connection, load_server};
use crate::crop::StackPolicy;
use crate::model::ImageId;
use crate::runtime::AppContext;

use super::types::{Cli, Commands, ImageInfo, RegionsInfo};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let app = AppContext::new();

    match cli.command {
        Commands::Images { server } => {
            let server = load_server(&server).map_err(|error| error.to_string())?;
            let rows = server.images().iter().map(ImageInfo::from).collect::<Vec<_>>();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).map_err(|error| error.to_string())?
            );
        }
        Commands::Regions {
            server,
            image,
            entire_stack,
            no_z_stack,
            no_t_stack,
        } => {
            let conn = connect(&server)?;
            let policy = StackPolicy {
                entire_stack,
                z_stack: !no_z_stack,
                t_stack: !no_t_stack,
            };
            let (source, regions) = app
                .crop_service()
                .resolve(&conn, ImageId(image), &policy)
                .map_err(|error| error.to_string())?;
            let info = RegionsInfo {
                image: source.id,
                name: source.name,
                regions,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
        }
        Commands::Run {
            server,
            spec,
            report,
        } => {
            let conn = connect(&server)?;
            let spec = app
                .batch_service()
                .load_spec(&spec)
                .map_err(|error| error.to_string())?;
            let batch_report = app
                .batch_service()
                .run(&conn, &spec)
                .map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                app.batch_service()
                    .save_report(report_path, &batch_report)
                    .map_err(|error| error.to_string())?;
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&batch_report).map_err(|error| error.to_string())?
            );
        }
    }

    Ok(())
}

fn connect(path: &Path) -> Result<Connection, String> {
    let backend = load_server(path).map_err(|error| error.to_string())?;
    Ok(Connection::from_backend(Arc::new(backend)))
}
