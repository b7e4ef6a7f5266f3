//! List the built-in layouts

use crate::config::BuildConfig;
use crate::templates::Layout;

/// Print every layout name, marking the configured one
pub fn run(config: &BuildConfig) {
    println!("Layouts ({}):", Layout::ALL.len());
    for layout in Layout::ALL {
        let marker = if layout == config.layout { "*" } else { " " };
        println!("{} {}", marker, layout);
    }
}
