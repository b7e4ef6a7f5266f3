//! List the sources a build would render

use crate::config::BuildConfig;
use crate::content;
use crate::error::Result;

/// Print each source with the page it renders to, without writing anything
pub fn run(config: &BuildConfig) -> Result<()> {
    config.validate()?;

    let sources = content::discover(&config.input_dir, &config.output_dir)?;
    println!("Sources ({}):", sources.len());
    for source in sources {
        println!(
            "  {} -> {}",
            source.relative.display(),
            config.output_dir.join(source.output_relative()).display()
        );
    }

    Ok(())
}
