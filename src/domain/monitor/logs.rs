use super::error::LogError;
use serde::{Deserialize, Serialize};
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Which of a service's two log files to read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    #[default]
    Output,
    Error,
}

/// Severity guessed from a raw log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Plain,
}

impl LogLevel {
    pub fn classify(line: &str) -> Self {
        if line.contains("ERROR") || line.contains("error") {
            LogLevel::Error
        } else if line.contains("WARN") || line.contains("warning") {
            LogLevel::Warn
        } else if line.contains("INFO") || line.contains("info") {
            LogLevel::Info
        } else {
            LogLevel::Plain
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            LogLevel::Error => "🔴",
            LogLevel::Warn => "🟡",
            LogLevel::Info => "🔵",
            LogLevel::Plain => "  ",
        }
    }
}

/// Prefix a line with the marker of its level
pub fn decorate(line: &str) -> String {
    format!("{} {}", LogLevel::classify(line).marker(), line)
}

const TAIL_CHUNK: usize = 8 * 1024;

/// Last `lines` lines of the file at `path`. The file is read backwards in
/// fixed-size chunks, so only the tail is ever held in memory.
pub async fn tail_lines(path: &Path, lines: usize) -> Result<Vec<String>, LogError> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LogError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(LogError::Io(e)),
    };
    if lines == 0 {
        return Ok(Vec::new());
    }

    let mut pos = file.seek(SeekFrom::End(0)).await?;
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; TAIL_CHUNK];

    // `lines` newlines before the final one delimit the wanted lines;
    // a trailing newline at end of file does not open a new line.
    while pos > 0 {
        let size = TAIL_CHUNK.min(pos as usize);
        pos -= size as u64;
        file.seek(SeekFrom::Start(pos)).await?;
        file.read_exact(&mut chunk[..size]).await?;
        let mut joined = chunk[..size].to_vec();
        joined.extend_from_slice(&buf);
        buf = joined;

        let body = buf.strip_suffix(b"\n").unwrap_or(&buf);
        if body.iter().filter(|&&b| b == b'\n').count() >= lines {
            break;
        }
    }

    let content = String::from_utf8_lossy(&buf);
    let mut tail: Vec<String> = content
        .lines()
        .rev()
        .take(lines)
        .map(str::to_string)
        .collect();
    tail.reverse();
    Ok(tail)
}
