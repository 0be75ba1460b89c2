use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Destination for a command's JSON artifact: a file when a path was
/// given, the locked stdout otherwise.
#[derive(Debug)]
enum Output {
    Stdout(StdoutLock<'static>),
    File { writer: BufWriter<File>, path: PathBuf },
}

impl Output {
    fn display_path(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Write a value as pretty JSON to `output_path`, or to stdout when no
/// path was given
///
/// # Errors
///
/// Returns error if the destination cannot be created or written
pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut output = match output_path {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Output::File {
                writer: BufWriter::new(file),
                path,
            }
        }
        None => Output::Stdout(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut output, value)
        .with_context(|| format!("Failed to write JSON to {}", output.display_path()))?;
    writeln!(&mut output)
        .with_context(|| format!("Failed to write newline after JSON to {}", output.display_path()))?;
    output
        .flush()
        .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
    Ok(())
}

/// Read a report file into memory
///
/// # Errors
///
/// Returns error if the file cannot be read
pub fn read_text_file<P>(file_kind: &str, path: P) -> anyhow::Result<String>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", file_kind, path.display()))
}
