//! Interactive prompts

use std::io::{BufRead, Write};

use crate::Result;

/// Print `message` and wait for one line on `input`.
///
/// The read happens on a blocking thread so the runtime's workers stay free.
/// End of input counts as confirmation. Returns the reader for reuse.
pub async fn wait_for_enter<R>(message: &str, mut input: R) -> Result<R>
where
    R: BufRead + Send + 'static,
{
    print!("{}", message);
    std::io::stdout().flush()?;

    let input = tokio::task::spawn_blocking(move || {
        let mut line = String::new();
        input.read_line(&mut line).map(|_| input)
    })
    .await??;

    Ok(input)
}
