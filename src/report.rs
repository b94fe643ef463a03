use super::pipeline::{D_LOAD_FILE, J_LOAD_FILE};
use super::VERSION;
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportArgs {
    pub dfile: PathBuf,
    pub jfile: PathBuf,
    pub htmlout: PathBuf,
    pub svgout: Option<PathBuf>,
    pub shared_x: bool,
    /// show the html in the default browser once written
    pub open: bool,
    pub verbose: bool,
}

/// Takes the CLI arguments that control the interactive report.
pub fn parse_cli() -> ReportArgs {
    parse_cli_from(std::env::args_os())
}

pub fn parse_cli_from<I, T>(args: I) -> ReportArgs
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
    let arg_htmlout = Arg::with_name("output_htmlfile")
        .help("name of the output html file")
        .short("o")
        .long("htmlfile")
        .takes_value(true)
        .default_value("load_fcst.html");
    let arg_svgout = Arg::with_name("output_svgfile")
        .help("also plot a static svg to this file")
        .long("svgfile")
        .takes_value(true);
    let arg_independent = Arg::with_name("independent_x")
        .help("zoom each panel on its own, instead of sharing the x axis")
        .long("independent_x")
        .takes_value(false);
    let arg_no_open = Arg::with_name("no_open")
        .help("only write the html, do not open it in the browser")
        .long("no_open")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false);

    let cli_args = App::new("fcst_report")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to resample the load forecast archives and chart them as interactive html")
        .arg(arg_dfile)
        .arg(arg_jfile)
        .arg(arg_htmlout)
        .arg(arg_svgout)
        .arg(arg_independent)
        .arg(arg_no_open)
        .arg(arg_verbose)
        .get_matches_from(args);

    ReportArgs {
        dfile: PathBuf::from(cli_args.value_of("dfile").unwrap_or(D_LOAD_FILE)),
        jfile: PathBuf::from(cli_args.value_of("jfile").unwrap_or(J_LOAD_FILE)),
        htmlout: PathBuf::from(cli_args.value_of("output_htmlfile").unwrap_or("load_fcst.html")),
        svgout: cli_args.value_of("output_svgfile").map(PathBuf::from),
        shared_x: !cli_args.is_present("independent_x"),
        open: !cli_args.is_present("no_open"),
        verbose: cli_args.is_present("verbose"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_open_only_writes_the_html() {
        assert!(parse_cli_from(vec!["fcst_report"]).open);
        let args = parse_cli_from(vec!["fcst_report", "--no_open"]);
        assert!(!args.open);
        assert!(args.shared_x);
        assert_eq!(args.htmlout, PathBuf::from("load_fcst.html"));
    }

    #[test]
    fn defaults_reproduce_the_fixed_report() {
        let args = parse_cli_from(vec!["fcst_report"]);
        assert_eq!(
            args,
            ReportArgs {
                dfile: PathBuf::from("D_load_fcst_archive.csv"),
                jfile: PathBuf::from("J_load_fcst_archive.csv"),
                htmlout: PathBuf::from("load_fcst.html"),
                svgout: None,
                shared_x: true,
                open: true,
                verbose: false,
            }
        );
    }

    #[test]
    fn options_are_read() {
        let args = parse_cli_from(vec![
            "fcst_report",
            "--dfile",
            "d.csv",
            "--jfile",
            "j.csv",
            "-o",
            "out.html",
            "--svgfile",
            "out.svg",
            "--independent_x",
            "--no_open",
            "-v",
        ]);
        assert_eq!(args.dfile, PathBuf::from("d.csv"));
        assert_eq!(args.jfile, PathBuf::from("j.csv"));
        assert_eq!(args.htmlout, PathBuf::from("out.html"));
        assert_eq!(args.svgout, Some(PathBuf::from("out.svg")));
        assert!(!args.shared_x);
        assert!(!args.open);
        assert!(args.verbose);
    }
}
