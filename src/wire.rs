//! Wire-side collaborator for response serialization.

use std::fmt;
use std::io::Write;

use log::warn;

use crate::response::StatusCode;

/// Sink for one serialized response, bound to a live connection.
///
/// Each call appends synchronously to the outgoing stream in call order.
/// Partial-write failures stay on this side of the seam; the response model
/// never observes them.
pub trait Responder {
    fn is_connected(&self) -> bool;
    fn write_status_line(&mut self, status: StatusCode);
    fn write_header(&mut self, name: &str, value: &str);
    fn write_body(&mut self, body: &[u8]);
}

/// HTTP/1.1 framing over any byte sink.
///
/// The first write error logs a warning and flips the writer to the
/// disconnected state; every later call is a no-op. The peer is gone, there
/// is nobody left to report to.
pub struct WireWriter<W> {
    sink: W,
    connected: bool,
}

impl<W: Write> WireWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            connected: true,
        }
    }

    /// Marks the connection as gone. Queued-up calls after this emit nothing.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self, bytes: &[u8]) {
        if !self.connected {
            return;
        }
        if let Err(err) = self.sink.write_all(bytes) {
            warn!("connection write failed, dropping response tail: {err}");
            self.connected = false;
        }
    }
}

impl<W: Write> Responder for WireWriter<W> {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn write_status_line(&mut self, status: StatusCode) {
        let line = format!("HTTP/1.1 {} {}\r\n", status.code(), status.reason());
        self.emit(line.as_bytes());
    }

    fn write_header(&mut self, name: &str, value: &str) {
        let line = format!("{name}: {value}\r\n");
        self.emit(line.as_bytes());
    }

    fn write_body(&mut self, body: &[u8]) {
        self.emit(b"\r\n");
        self.emit(body);
        if self.connected {
            if let Err(err) = self.sink.flush() {
                warn!("connection flush failed: {err}");
                self.connected = false;
            }
        }
    }
}

impl<W> fmt::Debug for WireWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireWriter")
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_status_headers_and_body() {
        let mut writer = WireWriter::new(Vec::new());
        writer.write_status_line(StatusCode::Ok);
        writer.write_header("X-A", "1");
        writer.write_header("Content-Length", "5");
        writer.write_body(b"hello");

        let wire = writer.into_inner();
        assert_eq!(
            wire,
            b"HTTP/1.1 200 OK\r\nX-A: 1\r\nContent-Length: 5\r\n\r\nhello"
        );
    }

    #[test]
    fn disconnected_writer_emits_nothing() {
        let mut writer = WireWriter::new(Vec::new());
        writer.disconnect();
        writer.write_status_line(StatusCode::Ok);
        writer.write_header("X-A", "1");
        writer.write_body(b"hello");

        assert!(!writer.is_connected());
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn write_error_flips_to_disconnected() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = WireWriter::new(Broken);
        writer.write_status_line(StatusCode::Ok);
        assert!(!writer.is_connected());
    }
}
