//! Text ingestion shared by the suffix trie and the similarity analyser.
//!
//! Plain files are read as whitespace-separated tokens that are concatenated
//! with no separator. FASTA/FASTQ files (recognised by extension) contribute
//! the concatenation of their record sequences. A trailing `.gz`/`.bgz` is
//! decompressed transparently.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bio::io::{fasta, fastq};
use flate2::read::MultiGzDecoder;

/// Errors returned while loading a text.
#[derive(thiserror::Error, Debug)]
pub enum TextSourceError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed {format} record in {}: {reason}", .path.display())]
    Parse {
        format: &'static str,
        path: PathBuf,
        reason: String,
    },
}

/// Layout of an input file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFormat {
    Fastq,
    Fasta,
    /// Whitespace-delimited tokens, concatenated in order.
    Tokens,
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("bgz"))
        .unwrap_or(false)
}

/// Infer the format from the extension, looking through a compression suffix.
pub fn infer_format(path: &Path) -> SequenceFormat {
    let extension_of = |p: &Path| {
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default()
    };

    let mut ext = extension_of(path);
    if ext == "gz" || ext == "bgz" {
        ext = path
            .file_stem()
            .map(|stem| extension_of(Path::new(stem)))
            .unwrap_or_default();
    }

    match ext.as_str() {
        "fastq" | "fq" => SequenceFormat::Fastq,
        "fasta" | "fa" | "fna" => SequenceFormat::Fasta,
        _ => SequenceFormat::Tokens,
    }
}

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>, TextSourceError> {
    let file = File::open(path).map_err(|error| match error.kind() {
        std::io::ErrorKind::NotFound => TextSourceError::NotFound(path.to_path_buf()),
        _ => TextSourceError::Io(error),
    })?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Concatenate every whitespace-delimited token of `reader`.
pub fn concat_tokens<R: BufRead>(mut reader: R) -> Result<String, std::io::Error> {
    let mut text = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        for token in line.split_whitespace() {
            text.push_str(token);
        }
    }
    Ok(text)
}

fn push_uppercase(text: &mut String, sequence: &[u8]) {
    text.extend(sequence.iter().map(|b| b.to_ascii_uppercase() as char));
}

/// Load the text stored at `path`.
///
/// A file containing only whitespace (or no records) yields the empty string.
pub fn load<P: AsRef<Path>>(path: P) -> Result<String, TextSourceError> {
    let path = path.as_ref();
    let reader = open_reader(path)?;

    match infer_format(path) {
        SequenceFormat::Tokens => Ok(concat_tokens(reader)?),
        SequenceFormat::Fasta => {
            let mut text = String::new();
            for record in fasta::Reader::new(reader).records() {
                let record = record.map_err(|error| TextSourceError::Parse {
                    format: "FASTA",
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                })?;
                push_uppercase(&mut text, record.seq());
            }
            Ok(text)
        }
        SequenceFormat::Fastq => {
            let mut text = String::new();
            for record in fastq::Reader::new(reader).records() {
                let record = record.map_err(|error| TextSourceError::Parse {
                    format: "FASTQ",
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                })?;
                record.check().map_err(|reason| TextSourceError::Parse {
                    format: "FASTQ",
                    path: path.to_path_buf(),
                    reason: format!("record {}: {reason}", record.id()),
                })?;
                push_uppercase(&mut text, record.seq());
            }
            Ok(text)
        }
    }
}

/// Load `path`, reporting failures on the diagnostics stream.
///
/// Returns `None` when the file is missing or unreadable; never fails.
pub fn load_or_report<P: AsRef<Path>>(path: P) -> Option<String> {
    match load(path.as_ref()) {
        Ok(text) => Some(text),
        Err(error) => {
            log::warn!("{error}");
            None
        }
    }
}
