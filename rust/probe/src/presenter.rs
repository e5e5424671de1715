use colored::Colorize;
use common::TransportAddress;
use std::io::{self, Write};

pub fn render<W: Write>(mut output: W, addresses: &[TransportAddress]) -> io::Result<()> {
    if addresses.is_empty() {
        writeln!(output, "No ONVIF devices found.")?;
        return Ok(());
    }

    writeln!(output, "Discovered ONVIF streaming URLs:")?;
    for address in addresses {
        writeln!(output, "{}", address.as_str().yellow())?;
    }
    Ok(())
}
