use crate::error::Result;
use magtrace::core::scan::presets::{self, DEFAULT_PRESET};

pub fn run() -> Result<()> {
    println!("{:<18} {:<20} {:>6}  DESCRIPTION", "NAME", "MARKER", "SKIP");
    for preset in presets::all() {
        let name = if preset.name == DEFAULT_PRESET {
            format!("{} *", preset.name)
        } else {
            preset.name.to_string()
        };
        println!(
            "{:<18} {:<20} {:>6}  {}",
            name,
            format!("\"{}\"", preset.marker),
            preset.header_skip,
            preset.description
        );
    }
    println!("\n* default preset");
    Ok(())
}
