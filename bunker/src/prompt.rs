use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{BunkerError, Result};

const LINE_ENDINGS: &[char] = &['\n', '\r'];

/// Prints `label` to stdout and reads one line from stdin.
///
/// Returns `None` when stdin is already at end of file.
pub async fn prompt_line(label: &str) -> Result<Option<String>> {
    let mut stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    read_answer(&mut stdin, &mut stdout, label).await
}

async fn read_answer<R, W>(reader: &mut R, writer: &mut W, label: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let prompt_error = |source| BunkerError::Prompt {
        label: label.trim_end_matches([':', ' ']).to_lowercase(),
        source,
    };

    writer
        .write_all(label.as_bytes())
        .await
        .map_err(prompt_error)?;
    writer.flush().await.map_err(prompt_error)?;

    let mut line = String::new();
    let bytes = reader.read_line(&mut line).await.map_err(prompt_error)?;
    if bytes == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(LINE_ENDINGS).to_string()))
}
