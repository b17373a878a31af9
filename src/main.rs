use std::collections::HashSet;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;
use svgrab::{
    BulkQueue, Config, ProcessingOptions, ProcessingResult, Stats, generate_component, process,
    stats,
};

#[derive(Parser)]
#[command(name = "svgrab", version)]
#[command(about = "Grab, sanitize and re-encode SVG markup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sanitize and optimize one SVG
    Process {
        /// Input file (use - for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Config file (svgrab.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        stages: StageArgs,

        /// Print size comparison
        #[arg(short, long)]
        stats: bool,

        /// Print the full result as JSON instead of the markup
        #[arg(long)]
        json: bool,
    },

    /// Print size and structure statistics for one SVG
    Stats {
        /// Input file (use - for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Process many SVGs in order, isolating failures
    Batch {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write each processed SVG into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Config file (only `[naming]` applies)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output the batch result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate UI-component source from one SVG
    Component {
        /// Input file (use - for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Component name (default: derived from --index)
        #[arg(short, long)]
        name: Option<String>,

        /// Position of the SVG on its page, used for the default name
        #[arg(short, long, default_value = "0")]
        index: usize,

        /// Config file (only `[naming]` applies)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Stage switches; each overrides the config file when given.
#[derive(Args)]
struct StageArgs {
    /// Skip the final markup optimization
    #[arg(long)]
    no_optimize: bool,

    /// Keep comments
    #[arg(long)]
    keep_comments: bool,

    /// Keep the root's metadata element
    #[arg(long)]
    keep_metadata: bool,

    /// Remove the root's defs element
    #[arg(long)]
    remove_defs: bool,

    /// Remove attributes with empty values
    #[arg(long)]
    remove_empty_attrs: bool,

    /// Rewrite fill/stroke colors to canonical form
    #[arg(long)]
    convert_colors: bool,

    /// Resize so the larger dimension equals SIZE
    #[arg(long, value_name = "SIZE")]
    size: Option<f64>,
}

impl StageArgs {
    fn apply(&self, mut options: ProcessingOptions) -> ProcessingOptions {
        if self.no_optimize {
            options.optimize = false;
        }
        if self.keep_comments {
            options.remove_comments = false;
        }
        if self.keep_metadata {
            options.remove_metadata = false;
        }
        if self.remove_defs {
            options.remove_defs = true;
        }
        if self.remove_empty_attrs {
            options.remove_empty_attrs = true;
        }
        if self.convert_colors {
            options.convert_colors = true;
        }
        if self.size.is_some() {
            options.target_size = self.size;
        }
        options
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Process {
            input,
            output,
            config,
            stages,
            stats,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let options = stages.apply(config.processing);
            let input = read_input(&input)?;

            let result = process(&input, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                if !result.is_success() {
                    std::process::exit(1);
                }
                return Ok(());
            }

            match result {
                ProcessingResult::Success { svg, stats: report } => {
                    write_output(&output, &svg)?;
                    if stats {
                        let sizes = Stats {
                            original_size: input.len(),
                            optimized_size: svg.len(),
                            ..report
                        };
                        eprintln!(
                            "{} -> {} bytes ({:.1}% smaller)",
                            sizes.original_size,
                            sizes.optimized_size,
                            sizes.savings_percent()
                        );
                        eprintln!(
                            "{} elements, {} paths, {} groups",
                            report.elements, report.paths, report.groups
                        );
                    }
                }
                ProcessingResult::Failure { error, .. } => {
                    eprintln!("error: {error}");
                    std::process::exit(1);
                }
            }
        }

        Command::Stats { input, json } => {
            let input = read_input(&input)?;
            let report = stats(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("original size:  {} bytes", report.original_size);
                println!(
                    "optimized size: {} bytes ({:.1}% smaller)",
                    report.optimized_size,
                    report.savings_percent()
                );
                println!("elements:       {}", report.elements);
                println!("paths:          {}", report.paths);
                println!("groups:         {}", report.groups);
            }
        }

        Command::Batch {
            files,
            out_dir,
            config,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let inputs = files
                .iter()
                .map(|path| {
                    fs::read_to_string(path)
                        .map_err(|e| format!("failed to read {}: {}", path.display(), e))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let mut queue = BulkQueue::new();
            let result = queue.enqueue(inputs).unwrap_or_default();

            if let Some(dir) = out_dir {
                fs::create_dir_all(&dir)?;
                let mut used = HashSet::new();
                for (index, svg) in result.successful.iter().filter_map(|r| r.svg()).enumerate() {
                    let name = unique_name(config.naming.file_name(svg, index), &mut used);
                    fs::write(dir.join(&name), svg)?;
                    info!("wrote {}", dir.join(&name).display());
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for failed in &result.failed {
                    eprintln!("failed: {}", failed.error);
                }
                println!(
                    "{} succeeded, {} failed",
                    result.successful.len(),
                    result.failed.len()
                );
            }
            info!("batch of {} svg(s) done", result.len());

            if !result.failed.is_empty() {
                std::process::exit(1);
            }
        }

        Command::Component {
            input,
            name,
            index,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let input = read_input(&input)?;
            let name = name.unwrap_or_else(|| config.naming.component_name(index));
            println!("{}", generate_component(&input, &name)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn write_output(path: &Path, content: &str) -> io::Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())
    } else {
        fs::write(path, content)
    }
}

/// `name`, or `name` with the first free `-N` suffix, recorded in `used`.
fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let stem = name.trim_end_matches(".svg");
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}.svg");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_skips_taken_suffixes() {
        let mut used = HashSet::new();
        let names: Vec<_> = ["a.svg", "a-2.svg", "a.svg", "a.svg"]
            .into_iter()
            .map(|name| unique_name(name.to_string(), &mut used))
            .collect();
        assert_eq!(names, ["a.svg", "a-2.svg", "a-3.svg", "a-4.svg"]);
    }
}
