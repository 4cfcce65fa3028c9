use chrono::{DateTime, Utc};
use codeprompt_types::FileRecord;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Bytes read from the start of a file to decide text vs. binary
pub const SNIFF_LEN: usize = 512;

/// Build the record for one file, or `None` for a binary file when binaries
/// are not wanted.
pub(crate) fn inspect_file(
    path: &Path,
    relative_path: String,
    include_binary: bool,
) -> io::Result<Option<FileRecord>> {
    let mut file = File::open(path)?;
    let metadata = file.metadata()?;

    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    (&mut file).take(SNIFF_LEN as u64).read_to_end(&mut prefix)?;
    let is_text = !prefix.contains(&0);
    if !is_text && !include_binary {
        return Ok(None);
    }

    file.seek(SeekFrom::Start(0))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    let content_hash = format!("{:x}", hasher.finalize());

    let line_count = if is_text {
        file.seek(SeekFrom::Start(0))?;
        count_lines(BufReader::new(&mut file))?
    } else {
        0
    };

    let last_mod_time: DateTime<Utc> = metadata.modified()?.into();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = extension_of(&filename).to_string();

    Ok(Some(FileRecord {
        relative_path,
        filename,
        extension,
        size_bytes: metadata.len(),
        line_count,
        is_text,
        last_mod_time,
        content_hash,
    }))
}

/// Whether the first `SNIFF_LEN` bytes of the file contain a NUL.
pub fn is_binary_file(path: &Path) -> io::Result<bool> {
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)?;
    Ok(prefix.contains(&0))
}

/// Count newline-delimited lines; a trailing line without `\n` still counts.
pub fn count_lines<R: BufRead>(mut reader: R) -> io::Result<u64> {
    let mut lines = 0u64;
    let mut last = None;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        lines += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        last = buf.last().copied();
        let len = buf.len();
        reader.consume(len);
    }
    if matches!(last, Some(b) if b != b'\n') {
        lines += 1;
    }
    Ok(lines)
}

/// Text after the last `.` of a filename, without the dot.
///
/// `.gitignore` yields `gitignore`; `Makefile` yields an empty string.
pub fn extension_of(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[idx + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(Cursor::new("")).unwrap(), 0);
        assert_eq!(count_lines(Cursor::new("a")).unwrap(), 1);
        assert_eq!(count_lines(Cursor::new("a\n")).unwrap(), 1);
        assert_eq!(count_lines(Cursor::new("a\nb")).unwrap(), 2);
        assert_eq!(count_lines(Cursor::new("a\n\n")).unwrap(), 2);
    }

    #[test]
    fn test_count_lines_across_buffer_boundaries() {
        let text = "line\n".repeat(5000);
        let reader = BufReader::with_capacity(7, Cursor::new(text));
        assert_eq!(count_lines(reader).unwrap(), 5000);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("main.go"), "go");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of(".gitignore"), "gitignore");
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn test_inspect_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "hello\nworld\n").unwrap();

        let record = inspect_file(&path, "hello.txt".to_string(), false)
            .unwrap()
            .unwrap();
        assert!(record.is_text);
        assert_eq!(record.line_count, 2);
        assert_eq!(record.size_bytes, 12);
        assert_eq!(record.extension, "txt");
        assert_eq!(
            record.content_hash,
            "4a1e67f2fe1d1cc7b31d0ca2ec441da4778203a036a77da10344c85e24ff0f92"
        );
    }

    #[test]
    fn test_inspect_binary_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x00, 0x01, b'\n']).unwrap();

        assert!(
            inspect_file(&path, "image.png".to_string(), false)
                .unwrap()
                .is_none()
        );

        let record = inspect_file(&path, "image.png".to_string(), true)
            .unwrap()
            .unwrap();
        assert!(!record.is_text);
        assert_eq!(record.line_count, 0);
        assert_eq!(record.size_bytes, 7);
    }

    #[test]
    fn test_nul_after_prefix_is_still_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("late.txt");
        let mut bytes = vec![b'a'; SNIFF_LEN];
        bytes.push(0);
        std::fs::write(&path, &bytes).unwrap();

        let record = inspect_file(&path, "late.txt".to_string(), false)
            .unwrap()
            .unwrap();
        assert!(record.is_text);
    }

    #[test]
    fn test_is_binary_file() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("a.txt");
        let bin = dir.path().join("b.bin");
        std::fs::write(&text, "plain\n").unwrap();
        std::fs::write(&bin, [1, 0, 2]).unwrap();

        assert!(!is_binary_file(&text).unwrap());
        assert!(is_binary_file(&bin).unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");
        assert!(inspect_file(&path, "gone.txt".to_string(), false).is_err());
    }
}
