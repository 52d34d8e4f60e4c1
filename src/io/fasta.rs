use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    /// 大写残基，已去除空白
    pub seq: Vec<u8>,
}

/// 逐条读取 FASTA 记录。
///
/// 序列行中的空白被丢弃，字母统一转为大写；首个 `>` 之前的内容被忽略。
pub struct FastaReader<R: BufRead> {
    lines: std::io::Lines<R>,
    pending: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        let header = match self.pending.take() {
            Some(h) => h,
            None => loop {
                match self.lines.next() {
                    None => return Ok(None),
                    Some(line) => {
                        let line = line?;
                        if let Some(h) = line.strip_prefix('>') {
                            break h.trim().to_string();
                        }
                    }
                }
            },
        };

        let (id, desc) = match header.split_once(char::is_whitespace) {
            Some((id, rest)) => {
                let rest = rest.trim();
                (id.to_string(), (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (header, None),
        };

        let mut seq = Vec::new();
        for line in self.lines.by_ref() {
            let line = line?;
            if let Some(h) = line.strip_prefix('>') {
                self.pending = Some(h.trim().to_string());
                break;
            }
            seq.extend(
                line.bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// 读取文件中的第一条记录，每个输入文件只贡献一条序列
pub fn read_first_record(path: &Path) -> Result<FastaRecord> {
    let fh = std::fs::File::open(path)
        .with_context(|| format!("cannot open FASTA '{}'", path.display()))?;
    let mut reader = FastaReader::new(std::io::BufReader::new(fh));
    match reader
        .next_record()
        .with_context(|| format!("cannot read FASTA '{}'", path.display()))?
    {
        Some(rec) => Ok(rec),
        None => bail!("FASTA file '{}' contains no sequences", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_protein_records() {
        let data = b">sp|P1 first protein\nMKV\nlla\n>sp|P2\nGG\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "sp|P1");
        assert_eq!(r1.desc.as_deref(), Some("first protein"));
        assert_eq!(r1.seq, b"MKVLLA");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "sp|P2");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"GG");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn crlf_and_inner_whitespace() {
        let data = b"\n>p1 desc\r\nAR N\r\n d\t\r\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, "p1");
        assert_eq!(rec.desc.as_deref(), Some("desc"));
        assert_eq!(rec.seq, b"ARND");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn empty_record_is_allowed() {
        let data = b">empty\n>next\nW\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        assert!(r.next_record().unwrap().unwrap().seq.is_empty());
        assert_eq!(r.next_record().unwrap().unwrap().seq, b"W");
    }

    #[test]
    fn read_first_record_from_file() {
        let path = std::env::temp_dir().join(format!("wdag_fasta_{}.fa", std::process::id()));
        std::fs::write(&path, ">a\nAC\n>b\nGG\n").unwrap();
        let rec = read_first_record(&path).unwrap();
        assert_eq!(rec.id, "a");
        assert_eq!(rec.seq, b"AC");
        std::fs::remove_file(&path).unwrap();

        assert!(read_first_record(&path).is_err());
    }
}
