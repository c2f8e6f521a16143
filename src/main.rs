use clap::{crate_version, App, Arg};
use png2ico::{is_png_file, IconDir, PngImage};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::process;

//===========================================================================//

const USAGE: &str = "png2ico [FLAGS] <PNG>... <ICO>";

fn app() -> App<'static, 'static> {
    App::new("png2ico")
        .version(crate_version!())
        .about("Builds a Windows ICO file from PNG images")
        .usage(USAGE)
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Enables debug logging"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Prints each file as it is added"),
        )
        .arg(
            Arg::with_name("file")
                .multiple(true)
                .value_name("FILE")
                .help("One or more PNG files, then the output ICO file"),
        )
}

//===========================================================================//

fn main() {
    let matches = app().get_matches();
    init_logger(matches.is_present("debug"));
    let files: Vec<&str> = match matches.values_of("file") {
        Some(values) => values.collect(),
        None => {
            let _ = app().print_long_help();
            println!();
            return;
        }
    };
    if files.len() < 2 {
        eprintln!("png2ico: input/output file missing");
        eprintln!("Usage: {}", USAGE);
        process::exit(1);
    }
    let verbose = matches.is_present("verbose");
    let ico_path = files[files.len() - 1];
    let png_paths = &files[..files.len() - 1];
    // Refuse to clobber a PNG with the output; a destination that doesn't
    // exist yet reads as "not a PNG" and passes.
    if is_png_file(ico_path) {
        eprintln!("png2ico: {}: is a PNG file", ico_path);
        process::exit(1);
    }
    let mut icondir = IconDir::new();
    let mut failures = 0;
    for path in png_paths {
        match PngImage::read_file(path) {
            Ok(image) => {
                if verbose {
                    println!("Adding {}", path);
                }
                log::debug!(
                    "{}: {}x{} px, bit depth {}, {} bytes",
                    path,
                    image.width(),
                    image.height(),
                    image.bit_depth(),
                    image.size()
                );
                icondir.add_image(image);
            }
            Err(error) => {
                eprintln!("png2ico: {}: {}", path, error);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        eprintln!(
            "png2ico: rejected {} of {} input file(s); {} not written",
            failures,
            png_paths.len(),
            ico_path
        );
        process::exit(1);
    }
    if let Err(error) = write_ico(&icondir, ico_path) {
        eprintln!("png2ico: {}: {}", ico_path, error);
        process::exit(1);
    }
    if verbose {
        println!("Wrote {} ({} images)", ico_path, icondir.images().len());
    }
}

//===========================================================================//

fn init_logger(debug: bool) {
    let default_level = if debug { "debug" } else { "error" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .init();
}

fn write_ico(icondir: &IconDir, path: &str) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    icondir.write(&mut writer)?;
    writer.flush()
}

//===========================================================================//
