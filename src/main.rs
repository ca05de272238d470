use log::{error, LevelFilter};
use pollution_weather::{run, FileSink, PipelineConfig};
use simple_logger::SimpleLogger;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = PipelineConfig::default();
    let mut sink = FileSink::new(".");

    match run(&config, &mut sink) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
