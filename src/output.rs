//! CLI output formatting.
//!
//! Every function here is pure and returns the lines to print; the `print_*`
//! wrappers are the only place that writes to stdout.
//!
//! # Output Format
//!
//! ## compress
//!
//! ```text
//! photo.PNG: 5.00MB -> 0.41MB (photo.jpg)
//! icon.png: 0.02MB -> 0.01MB (icon.jpg)
//!
//! Done! All images compressed.
//! ```
//!
//! With `--keep-going`, a broken file shows up in place and the last line
//! changes:
//!
//! ```text
//! broken.png: FAILED (Processing failed: Failed to decode ...)
//!
//! Done with 1 failed image(s).
//! ```
//!
//! ## check
//!
//! ```text
//! photo.PNG 2000x1000 -> 1400x700 (photo.jpg)
//! icon.png 300x300 (icon.jpg)
//!
//! 2 image(s) to compress
//! ```

use crate::compress::{CompressEvent, CompressSummary, PlannedFile};

pub const DONE_LINE: &str = "Done! All images compressed.";

const MIB: f64 = 1024.0 * 1024.0;

/// Format a byte count as mebibytes with two decimals (no unit).
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / MIB)
}

fn format_dims((w, h): (u32, u32)) -> String {
    format!("{}x{}", w, h)
}

/// Format a single progress event as display lines.
pub fn format_compress_event(event: &CompressEvent) -> Vec<String> {
    match event {
        CompressEvent::FileCompressed(file) => vec![format!(
            "{}: {}MB -> {}MB ({})",
            file.file_name,
            format_mib(file.original_bytes),
            format_mib(file.output_bytes),
            file.output_name
        )],
        CompressEvent::FileFailed { file_name, error } => {
            vec![format!("{}: FAILED ({})", file_name, error)]
        }
    }
}

/// Closing lines printed once the directory listing is exhausted.
pub fn format_completion(summary: &CompressSummary) -> Vec<String> {
    let last = if summary.is_clean() {
        DONE_LINE.to_string()
    } else {
        format!("Done with {} failed image(s).", summary.failed.len())
    };
    vec![String::new(), last]
}

/// Format the dry-run listing for the `check` command.
pub fn format_plan(planned: &[PlannedFile]) -> Vec<String> {
    let mut lines: Vec<String> = planned
        .iter()
        .map(|p| {
            if p.resized() {
                format!(
                    "{} {} -> {} ({})",
                    p.file_name,
                    format_dims(p.original_dims),
                    format_dims(p.output_dims),
                    p.output_name
                )
            } else {
                format!(
                    "{} {} ({})",
                    p.file_name,
                    format_dims(p.original_dims),
                    p.output_name
                )
            }
        })
        .collect();
    lines.push(String::new());
    lines.push(format!("{} image(s) to compress", planned.len()));
    lines
}

pub fn print_completion(summary: &CompressSummary) {
    for line in format_completion(summary) {
        println!("{}", line);
    }
}

pub fn print_plan(planned: &[PlannedFile]) {
    for line in format_plan(planned) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::{CompressedFile, FailedFile};

    fn compressed(name: &str, output: &str, orig: u64, out: u64) -> CompressedFile {
        CompressedFile {
            file_name: name.to_string(),
            output_name: output.to_string(),
            original_bytes: orig,
            output_bytes: out,
            original_dims: (2000, 1000),
            output_dims: (1400, 700),
            alpha_dropped: true,
        }
    }

    #[test]
    fn format_mib_two_decimals() {
        assert_eq!(format_mib(0), "0.00");
        assert_eq!(format_mib(5 * 1024 * 1024), "5.00");
        assert_eq!(format_mib(1024 * 1024 / 2), "0.50");
        // 1.234 MiB rounds to 1.23
        assert_eq!(format_mib(1_293_942), "1.23");
    }

    #[test]
    fn format_compressed_line() {
        let event = CompressEvent::FileCompressed(compressed(
            "photo.PNG",
            "photo.jpg",
            5 * 1024 * 1024,
            430_000,
        ));
        assert_eq!(
            format_compress_event(&event),
            vec!["photo.PNG: 5.00MB -> 0.41MB (photo.jpg)"]
        );
    }

    #[test]
    fn format_failed_line() {
        let event = CompressEvent::FileFailed {
            file_name: "broken.png".to_string(),
            error: "Processing failed: bad header".to_string(),
        };
        assert_eq!(
            format_compress_event(&event),
            vec!["broken.png: FAILED (Processing failed: bad header)"]
        );
    }

    #[test]
    fn completion_clean() {
        let summary = CompressSummary::default();
        assert_eq!(
            format_completion(&summary),
            vec!["".to_string(), "Done! All images compressed.".to_string()]
        );
    }

    #[test]
    fn completion_with_failures() {
        let summary = CompressSummary {
            compressed: vec![],
            failed: vec![FailedFile {
                file_name: "x.png".into(),
                error: "boom".into(),
            }],
        };
        assert_eq!(
            format_completion(&summary).last().unwrap(),
            "Done with 1 failed image(s)."
        );
    }

    #[test]
    fn plan_lines() {
        let planned = vec![
            PlannedFile {
                file_name: "photo.PNG".into(),
                output_name: "photo.jpg".into(),
                original_dims: (2000, 1000),
                output_dims: (1400, 700),
            },
            PlannedFile {
                file_name: "icon.png".into(),
                output_name: "icon.jpg".into(),
                original_dims: (300, 300),
                output_dims: (300, 300),
            },
        ];
        assert_eq!(
            format_plan(&planned),
            vec![
                "photo.PNG 2000x1000 -> 1400x700 (photo.jpg)",
                "icon.png 300x300 (icon.jpg)",
                "",
                "2 image(s) to compress",
            ]
        );
    }
}
