// src/store/tail.rs

//! Bounded reads from the end of a file.

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Bytes read per step when walking backwards.
const CHUNK_SIZE: u64 = 8 * 1024;

/// Split raw log bytes into lines.
///
/// Splits on `\n` and strips a trailing `\r`; a final terminator does not
/// start an extra empty line. Invalid UTF-8 is replaced.
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Return the last `n` lines of the file at `path`, in file order.
///
/// The file is read backwards in [`CHUNK_SIZE`] steps and reading stops as
/// soon as `n` complete lines are buffered, so memory use follows the size
/// of the tail rather than the size of the file.
pub async fn tail_lines(path: &Path, n: usize) -> std::io::Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut file = File::open(path).await?;
    let len = file.metadata().await?.len();

    let mut pos = len;
    let mut buf: Vec<u8> = Vec::new();
    let mut breaks = 0usize;
    let mut needed = n;

    while pos > 0 {
        let step = CHUNK_SIZE.min(pos);
        pos -= step;

        file.seek(SeekFrom::Start(pos)).await?;
        let mut chunk = vec![0u8; step as usize];
        file.read_exact(&mut chunk).await?;

        if buf.is_empty() && chunk.last() == Some(&b'\n') {
            // The terminator of the final line does not open a new one.
            needed = needed.saturating_add(1);
        }
        breaks += chunk.iter().filter(|&&b| b == b'\n').count();

        chunk.extend_from_slice(&buf);
        buf = chunk;

        // `needed` breaks guarantee `n` whole lines after the first one.
        if breaks >= needed {
            break;
        }
    }

    let mut lines = split_lines(&buf);
    let start = lines.len().saturating_sub(n);
    Ok(lines.split_off(start))
}
