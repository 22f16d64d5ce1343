/// Verdict report driver
///
/// Streams one result file through the verdict decoder. Any error aborts
/// the whole run; output already written for earlier records stands.
use crate::config::types::{Result, UnknownCodePolicy};
use crate::verdict::decoder::{decode_stream, OutputFormat};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Decode the result file at `path`, writing one report line per slot.
pub fn write_report<W: Write>(
    path: &Path,
    writer: &mut W,
    policy: UnknownCodePolicy,
    format: OutputFormat,
) -> Result<()> {
    log::debug!("decoding verdict file {}", path.display());
    let file = File::open(path)?;
    decode_stream(BufReader::new(file), writer, policy, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_report_over_real_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Model-PT-01 T??????????????F x1 x2 x3 x4 x5 x6 x7 x8 x9 x10 x11 x12 x13 x14 x15 x16"
        )
        .unwrap();

        let mut out = Vec::new();
        write_report(
            file.path(),
            &mut out,
            UnknownCodePolicy::Ignore,
            OutputFormat::Text,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "Model-PT-01-00 TRUE x1");
        assert_eq!(lines[15], "Model-PT-01-15 FALSE x16");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut out = Vec::new();
        let result = write_report(
            Path::new("/nonexistent/results.txt"),
            &mut out,
            UnknownCodePolicy::Ignore,
            OutputFormat::Text,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
