//! Plain (ASCII) PGM images of sinograms.
//!
//! One image row per distance bin, one column per angle bin. Cell counts are
//! written as they are: the declared maximum grey value is always 255, even
//! when some counts exceed it.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::sinogram::{Count, Sinogram};

const MAGIC: &str = "P2";
pub const MAX_GREY: Count = 255;

pub fn write(sinogram: &Sinogram, mut out: impl Write) -> std::io::Result<()> {
    writeln!(out, "{MAGIC}")?;
    writeln!(out, "{} {}", sinogram.n_theta(), sinogram.n_distance())?;
    writeln!(out, "{MAX_GREY}")?;
    for row in sinogram.rows() {
        writeln!(out, "{}", row.iter().join(" "))?;
    }
    Ok(())
}

pub fn write_to_file(sinogram: &Sinogram, path: &Path) -> std::io::Result<()> {
    let mut buf = BufWriter::new(File::create(path)?);
    write(sinogram, &mut buf)?;
    buf.flush()
}

/// Read a plain PGM image, such as those produced by [`write`], back into a
/// sinogram. `#` comments are ignored.
pub fn read(input: impl BufRead) -> Result<Sinogram> {
    let mut tokens = Tokens::new(input)?;
    let magic: String = tokens.next("magic number")?;
    if magic != MAGIC {
        return Err(tokens.error(format!("expected `{MAGIC}`, found `{magic}`")));
    }
    let n_theta   : usize = tokens.next("width")?;
    let n_distance: usize = tokens.next("height")?;
    let _max_grey : Count = tokens.next("maximum grey value")?;
    let rows = (0..n_distance)
        .map(|_| (0..n_theta).map(|_| tokens.next::<Count>("pixel value")).collect::<Result<Vec<_>>>())
        .collect::<Result<Vec<_>>>()?;
    Sinogram::from_rows(rows).ok_or_else(|| tokens.error("inconsistent image dimensions".into()))
}

/// Whitespace-separated tokens, remembering the line each came from
struct Tokens {
    tokens: std::vec::IntoIter<(usize, String)>,
    line: usize,
}

impl Tokens {
    fn new(input: impl BufRead) -> Result<Self> {
        let mut tokens = vec![];
        for (n, line) in input.lines().enumerate() {
            let line = line?;
            let content = line.split('#').next().unwrap_or_default();
            tokens.extend(content.split_whitespace().map(|t| (n + 1, t.to_owned())));
        }
        Ok(Self { tokens: tokens.into_iter(), line: 0 })
    }

    fn next<T: std::str::FromStr>(&mut self, what: &str) -> Result<T>
    where
        <T as std::str::FromStr>::Err: std::fmt::Display,
    {
        let Some((line, token)) = self.tokens.next() else {
            return Err(self.error(format!("unexpected end of image while reading {what}")));
        };
        self.line = line;
        token.parse().map_err(|e| self.error(format!("bad {what} `{token}`: {e}")))
    }

    fn error(&self, reason: String) -> Error { Error::Parse { line: self.line, reason } }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    fn to_string(sinogram: &Sinogram) -> String {
        let mut out = vec![];
        write(sinogram, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn three_distances_two_angles() {
        let s = Sinogram::from_rows(vec![vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap();
        assert_eq!(to_string(&s), "P2\n2 3\n255\n0 1\n2 3\n4 5\n");
    }

    #[test]
    fn counts_above_max_grey_are_not_clamped() {
        let s = Sinogram::from_rows(vec![vec![1000, 256, 7]]).unwrap();
        assert_eq!(to_string(&s), "P2\n3 1\n255\n1000 256 7\n");
    }

    #[test]
    fn file_roundtrip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sinogram.ppm");
        let original = Sinogram::from_rows(vec![vec![9, 0, 3], vec![1, 1, 4000]]).unwrap();
        write_to_file(&original, &path)?;
        let reloaded = read(std::io::BufReader::new(File::open(&path)?))?;
        assert_eq!(original, reloaded);
        Ok(())
    }

    #[test]
    fn read_ignores_comments_and_layout() -> Result<()> {
        let text = "P2 # sinogram\n# angles distances\n2\n2 255\n1 2 3\n4\n";
        let s = read(text.as_bytes())?;
        assert_eq!(s, Sinogram::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap());
        Ok(())
    }

    #[test]
    fn read_rejects_other_formats() {
        let err = read("P5\n2 2\n255\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }), "{err}");
    }

    #[test]
    fn read_rejects_truncated_image() {
        let err = read("P2\n2 2\n255\n1 2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 5, .. }), "{err}");
    }

    #[test]
    fn read_rejects_garbage_pixels() {
        let err = read("P2\n2 1\n255\n1 x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 4, ref reason } if reason.contains("`x`")), "{err}");
    }
}
