use std::io::{self, BufReader, Chain, Cursor, Read};

use flate2::bufread::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const GZIP_DEFLATE: u8 = 8;
const GZIP_RESERVED_FLAGS: u8 = 0xe0;
const GZIP_HEADER_LEN: usize = 10;

type GzipHeader = Cursor<[u8; GZIP_HEADER_LEN]>;

/// Response body as handed to the chunk loop, decompressed when needed.
pub enum BodyReader<R: Read> {
    Plain(R),
    Gzip(MultiGzDecoder<BufReader<Chain<GzipHeader, R>>>),
}

impl<R: Read> BodyReader<R> {
    /// Picks the reader for a body given its `Content-Encoding`. Only an
    /// exact `gzip` is decoded; everything else passes through untouched.
    pub fn select(body: R, content_encoding: Option<&[u8]>) -> io::Result<Self> {
        match content_encoding {
            Some(b"gzip") => Self::gzip(body),
            _ => Ok(Self::Plain(body)),
        }
    }

    /// Reads and checks the fixed gzip header, then hands it back to the
    /// decoder together with the rest of `body`.
    pub fn gzip(mut body: R) -> io::Result<Self> {
        let mut header = [0; GZIP_HEADER_LEN];
        body.read_exact(&mut header)?;

        if header[..2] != GZIP_MAGIC
            || header[2] != GZIP_DEFLATE
            || header[3] & GZIP_RESERVED_FLAGS != 0
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid gzip header",
            ));
        }

        let body = Cursor::new(header).chain(body);
        Ok(Self::Gzip(MultiGzDecoder::new(BufReader::new(body))))
    }

    pub fn is_gzip(&self) -> bool {
        matches!(self, Self::Gzip(_))
    }
}

impl<R: Read> Read for BodyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
        }
    }
}
