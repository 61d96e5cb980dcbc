use argh::FromArgs;
use core::error::Error;
use dxtconv::convert_file;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(FromArgs, Debug)]
/// Convert 24-bit .bmp images to DXT1 .dds textures and back.
/// Without files, reads file names from standard input.
struct Args {
    /// directory to write converted files to [default: next to the input]
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// log debug details
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// files to convert; the extension selects the direction
    #[argh(positional)]
    files: Vec<PathBuf>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Converts one file and reports the outcome. Returns whether it succeeded.
fn process(path: &Path, output: Option<&Path>) -> bool {
    match convert_file(path, output) {
        Ok(written) => {
            println!("Saved {}", written.display());
            true
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            false
        }
    }
}

/// Prompts for file names until end of input.
fn interactive(output: Option<&Path>) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut all_ok = true;
    let mut line = String::new();
    loop {
        print!("Load file - write name: ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(all_ok);
        }

        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        all_ok &= process(Path::new(name), output);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Args = argh::from_env();
    init_logging(args.verbose);

    let output = args.output.as_deref();
    if let Some(dir) = output {
        std::fs::create_dir_all(dir)?;
    }

    let all_ok = if args.files.is_empty() {
        interactive(output)?
    } else {
        let mut all_ok = true;
        for file in &args.files {
            all_ok &= process(file, output);
        }
        all_ok
    };

    if !all_ok {
        std::process::exit(1);
    }
    Ok(())
}
