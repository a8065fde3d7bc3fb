use std::io::{self, Write};

use crate::prober::Classification;

/// Writes the `GOOD:` and `BAD:` lines of a round.
pub fn write_report<W: Write>(writer: &mut W, classification: &Classification) -> io::Result<()> {
    writeln!(writer, "GOOD: {}", classification.good.join(" "))?;
    writeln!(writer, "BAD: {}", classification.bad.join(" "))
}
