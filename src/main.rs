use clap::Parser;
use docx_inspect::{report_outcome, AnalyzeOptions, DEFAULT_OUTPUT};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docx-inspect", version)]
#[command(about = "Print the paragraph, run and table structure of a DOCX file and dump it as JSON")]
struct Cli {
    /// Word document to inspect
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Where to write the JSON dump
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = AnalyzeOptions::new(cli.input).with_output(cli.output);

    let mut stdout = io::stdout().lock();
    let result = writeln!(stdout, "Starting Word document analysis...")
        .map_err(docx_inspect::Error::from)
        .and_then(|_| docx_inspect::run(&options, &mut stdout));

    if let Err(e) = &result {
        log::debug!("analysis failed: {e:?}");
    }
    if let Err(e) = report_outcome(&result, &mut stdout) {
        eprintln!("failed to write to stdout: {e}");
    }
}
