use crate::domain::ports::TextExtractor;
use crate::utils::error::{LbasiError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Pipes the image bytes into an external OCR program (for example
/// `tesseract stdin stdout -l kor`) and reads the recognized text from stdout.
#[derive(Debug, Clone)]
pub struct CommandTextExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandTextExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a whitespace-separated command line. Quoting is not supported.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| LbasiError::MissingConfigError {
            field: "ocr_command".to_string(),
        })?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn io_failure(&self, action: &str, e: std::io::Error) -> LbasiError {
        LbasiError::ExtractionError {
            message: format!("failed to {} '{}': {}", action, self.program, e),
        }
    }
}

impl TextExtractor for CommandTextExtractor {
    fn extract_text(&self, payload: &[u8]) -> Result<String> {
        tracing::debug!("Running '{}' on {} byte payload", self.program, payload.len());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.io_failure("start", e))?;

        let mut stdin = child.stdin.take().ok_or_else(|| LbasiError::ExtractionError {
            message: "stdin of the OCR process is unavailable".to_string(),
        })?;

        // Feed stdin on a separate thread so a chatty child cannot fill its
        // stdout pipe while we are still writing.
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(payload));
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|_| {
                Err(std::io::Error::other("stdin writer panicked"))
            });
            (output, written)
        });

        let (output, written) = output;
        let output = output.map_err(|e| self.io_failure("wait for", e))?;
        if let Err(e) = written {
            // A program that exits without reading all input closes the pipe early.
            tracing::debug!("OCR process did not consume full payload: {}", e);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LbasiError::ExtractionError {
                message: format!("'{}' exited with {}: {}", self.program, output.status, stderr.trim()),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| LbasiError::ExtractionError {
            message: "OCR output is not valid UTF-8".to_string(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line() {
        let extractor = CommandTextExtractor::from_command_line("tesseract stdin stdout -l kor").unwrap();
        assert_eq!(extractor.program(), "tesseract");
        assert_eq!(extractor.args, vec!["stdin", "stdout", "-l", "kor"]);
        assert!(CommandTextExtractor::from_command_line("   ").is_err());
    }

    #[test]
    fn test_extract_text_passthrough() {
        let extractor = CommandTextExtractor::new("cat", vec![]);
        let text = extractor.extract_text("레티놀 앰플\n".as_bytes()).unwrap();
        assert_eq!(text, "레티놀 앰플\n");
    }

    #[test]
    fn test_process_io_failures_are_extraction_errors() {
        let extractor = CommandTextExtractor::new("tesseract", vec![]);
        let err = extractor.io_failure("wait for", std::io::Error::other("interrupted"));
        assert!(matches!(err, LbasiError::ExtractionError { .. }));
        assert!(err.to_string().contains("failed to wait for 'tesseract'"));
        assert!(err.user_friendly_message().contains("이미지"));
    }

    #[test]
    fn test_extract_text_failures() {
        let missing = CommandTextExtractor::new("definitely-not-an-ocr-binary", vec![]);
        assert!(matches!(
            missing.extract_text(b"img"),
            Err(LbasiError::ExtractionError { .. })
        ));

        let failing = CommandTextExtractor::new("false", vec![]);
        assert!(matches!(
            failing.extract_text(b"img"),
            Err(LbasiError::ExtractionError { .. })
        ));
    }
}
