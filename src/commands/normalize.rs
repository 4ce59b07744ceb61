//! `dwellmap normalize` command.

use crate::address::normalize;

/// Prints the canonical form of each address, one per line.
pub fn run(addresses: &[String]) {
    for line in render(addresses) {
        println!("{line}");
    }
}

fn render(addresses: &[String]) -> Vec<String> {
    addresses.iter().map(|a| normalize(a)).collect()
}
