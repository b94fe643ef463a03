use super::pipeline::{D_LOAD_FILE, J_LOAD_FILE};
use super::VERSION;
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

/// Takes the CLI arguments that control the static plot of the forecasts:
/// (D archive, J archive, output svg, verbose).
pub fn parse_cli() -> (PathBuf, PathBuf, PathBuf, bool) {
    parse_cli_from(std::env::args_os())
}

pub fn parse_cli_from<I, T>(args: I) -> (PathBuf, PathBuf, PathBuf, bool)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_dfile = Arg::with_name("dfile")
        .help("csv archive of the D load forecast")
        .long("dfile")
        .takes_value(true)
        .default_value(D_LOAD_FILE);
    let arg_jfile = Arg::with_name("jfile")
        .help("csv archive of the J load forecast")
        .long("jfile")
        .takes_value(true)
        .default_value(J_LOAD_FILE);
    let arg_svgout = Arg::with_name("output_svgfile")
        .help("name of the output svg file")
        .short("o")
        .long("svgfile")
        .takes_value(true)
        .default_value("load_fcst.svg");
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("fcst_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the hourly load forecasts")
        .arg(arg_dfile)
        .arg(arg_jfile)
        .arg(arg_svgout)
        .arg(arg_verbose)
        .get_matches_from(args);
    let dfile = PathBuf::from(cli_args.value_of("dfile").unwrap_or(D_LOAD_FILE));
    let jfile = PathBuf::from(cli_args.value_of("jfile").unwrap_or(J_LOAD_FILE));
    let svgout = PathBuf::from(cli_args.value_of("output_svgfile").unwrap_or("load_fcst.svg"));
    let verbose = cli_args.is_present("verbose");
    (dfile, jfile, svgout, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let (d, j, svg, verbose) = parse_cli_from(vec!["fcst_plot"]);
        assert_eq!(d, PathBuf::from(D_LOAD_FILE));
        assert_eq!(j, PathBuf::from(J_LOAD_FILE));
        assert_eq!(svg, PathBuf::from("load_fcst.svg"));
        assert!(!verbose);
    }

    #[test]
    fn output_file() {
        let (_, _, svg, _) = parse_cli_from(vec!["fcst_plot", "-o", "panels.svg"]);
        assert_eq!(svg, PathBuf::from("panels.svg"));
    }
}
