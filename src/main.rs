use std::process::ExitCode;

use neighbors_engine::error::EngineError;
use neighbors_engine::shared_memory::SharedSegment;
use tracing_subscriber::EnvFilter;

fn parse_args() -> Result<(i32, usize), EngineError> {
    let mut args = std::env::args().skip(1);
    let key = args.next().ok_or(EngineError::Args)?;
    let size = args.next().ok_or(EngineError::Args)?;
    if args.next().is_some() {
        return Err(EngineError::Args);
    }
    let key: i32 = key.parse().map_err(|_| EngineError::Args)?;
    let size: usize = size.parse().map_err(|_| EngineError::Args)?;
    Ok((key, size))
}

fn run() -> Result<(), EngineError> {
    let (key, size) = parse_args()?;
    tracing::info!(key, size, "attaching shared segment");

    let mut segment = SharedSegment::attach(key, size)?;
    tracing::info!(id = segment.id(), "segment attached");

    neighbors_engine::run(segment.as_mut_ptr(), segment.size())?;

    segment.detach()?;
    tracing::info!("segment detached");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
