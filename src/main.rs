use anyhow::Result;
use screentime::{cli::run_cli, utils::runtime::block_on};
use tracing::error;

fn main() -> Result<()> {
    block_on(run_cli())?.inspect_err(|e| {
        error!("Error running cli {e:?}");
    })?;
    Ok(())
}
