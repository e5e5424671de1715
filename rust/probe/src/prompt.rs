use colored::Colorize;
use common::{DiscoveryError, NetworkInterface, Result};
use std::io::{BufRead, Write};

/// Prints the interface menu to `output`, reads one index from `input`, and
/// returns the chosen interface.
pub fn select_interface<'a, R, W>(
    interfaces: &'a [NetworkInterface],
    mut input: R,
    mut output: W,
) -> Result<&'a NetworkInterface>
where
    R: BufRead,
    W: Write,
{
    let io_err = |e: std::io::Error| DiscoveryError::InvalidSelection(e.to_string());

    writeln!(output, "{}", "Available network interfaces:".cyan()).map_err(io_err)?;
    for (i, iface) in interfaces.iter().enumerate() {
        writeln!(output, "[{}] {} ({})", i, iface.name.green(), iface.families()).map_err(io_err)?;
    }
    write!(output, "{}", "Select an interface (enter the number): ".cyan()).map_err(io_err)?;
    output.flush().map_err(io_err)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(io_err)?;
    let selection = line.trim();

    let iface = selection
        .parse::<usize>()
        .ok()
        .and_then(|index| interfaces.get(index))
        .ok_or_else(|| DiscoveryError::InvalidSelection(format!("{:?}", selection)))?;

    writeln!(output, "Selected interface: {}", iface.name).map_err(io_err)?;
    Ok(iface)
}
