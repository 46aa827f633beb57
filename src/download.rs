use std::io::{self, Read, Write};

use anyhow::{bail, Context};
use log::{debug, trace};
use reqwest::{
    blocking::{Client, Request},
    header::{HeaderValue, ACCEPT_ENCODING, CONNECTION, CONTENT_ENCODING},
    Url,
};

use crate::{cli::Options, decoder::BodyReader, presenter::Presenter, reporter::Reporter};

/// Upper bound on the bytes pulled from the body per read.
pub const CHUNK_SIZE: usize = 16 * 1024;

/// Body bytes in the order they were read, one read per item.
///
/// Ends at end-of-stream or after the first error.
pub struct Chunks<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: Read> Chunks<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; CHUNK_SIZE],
            done: false,
        }
    }
}

impl<R: Read> Iterator for Chunks<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => return Some(Ok(self.buf[..n].to_vec())),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// One GET request whose response is rendered to `out` while it streams in.
pub struct Download {
    client: Client,
    options: Options,
    presenter: Presenter,
}

impl Download {
    pub fn new(client: Client, options: Options) -> Self {
        let presenter = Presenter::new(options.color);
        Self {
            client,
            options,
            presenter,
        }
    }

    fn request(&self) -> anyhow::Result<Request> {
        if self.options.url.is_empty() {
            bail!("missing URL argument");
        }
        let url = Url::parse(&self.options.url).context("invalid URL")?;

        let mut builder = self
            .client
            .get(url)
            .header(CONNECTION, HeaderValue::from_static("keep-alive"));
        if self.options.compress {
            builder = builder.header(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        }

        builder.build().context("failed to create request")
    }

    /// Sends the request, writes status line and headers, then copies the
    /// body chunk by chunk. Timings go to `diag` when verbose.
    pub fn run<O: Write, D: Write>(&self, out: &mut O, diag: D) -> anyhow::Result<()> {
        let request = self.request()?;
        debug!("GET {}", request.url());

        let mut reporter = self
            .options
            .verbose
            .then(|| Reporter::start(self.presenter.clone(), diag));

        // dropping the response closes the body on every return path
        let response = self
            .client
            .execute(request)
            .context("failed to send request")?;
        debug!("{:?} {}", response.version(), response.status());

        self.presenter
            .write_head(out, response.version(), response.status(), response.headers())
            .and_then(|_| out.flush())
            .context("failed to write response headers")?;

        if let Some(reporter) = reporter.as_mut() {
            reporter.report("HEADERS");
        }

        let encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .map(|v| v.as_bytes().to_vec());
        let body = BodyReader::select(response, encoding.as_deref())
            .context("failed to create gzip reader")?;
        debug!("gzip decoding: {}", body.is_gzip());

        for chunk in Chunks::new(body) {
            let chunk = chunk.context("failed to read response body")?;
            trace!("chunk of {} bytes", chunk.len());

            out.write_all(&chunk)
                .and_then(|_| out.flush())
                .context("failed to write response body")?;

            if let Some(reporter) = reporter.as_mut() {
                reporter.reportf(format_args!("CHUNK: bytes={}", chunk.len()));
            }
        }

        if let Some(reporter) = reporter.as_mut() {
            reporter.report("END");
        }

        Ok(())
    }
}
