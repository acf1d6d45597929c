use std::future::Future;

use anyhow::Result;

/// Drives `future` to completion on a current-thread runtime. Loading the log is the only async
/// work, so a single thread is enough.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
