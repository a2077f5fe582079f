use std::io::{self, Write};

/// Receives every value printed by PRN.
pub trait Sink {
    fn emit(&mut self, value: u8) -> io::Result<()>;
}

impl Sink for Vec<u8> {
    fn emit(&mut self, value: u8) -> io::Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Writes each value as a decimal line.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> LineSink<W> {
        LineSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for LineSink<W> {
    fn emit(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.writer, "{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_sink_prints_decimal_lines() {
        let mut sink = LineSink::new(Vec::new());
        sink.emit(8).unwrap();
        sink.emit(255).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "8\n255\n");
    }
}
