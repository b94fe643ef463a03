use fcst_lpp::html::{write_html, ChartOptions};
use fcst_lpp::pipeline::{run_report, SeriesSpec};
use fcst_lpp::report::{parse_cli, ReportArgs};
use fcst_lpp::svg::plot_panels;
use tracing::{error, info, warn};

fn run(args: ReportArgs) -> fcst_lpp::Result<()> {
    let specs = [SeriesSpec::d_load(args.dfile), SeriesSpec::j_load(args.jfile)];
    let panels = run_report(&specs)?;

    let opts = ChartOptions {
        shared_x: args.shared_x,
        ..ChartOptions::default()
    };
    write_html(&panels, &opts, &args.htmlout)?;
    info!(path = %args.htmlout.display(), "wrote interactive chart");
    if args.open {
        // the chart is on disk either way, a missing browser is not fatal
        if let Err(e) = opener::open(&args.htmlout) {
            warn!(path = %args.htmlout.display(), "could not open the browser: {}", e);
        }
    }

    if let Some(svgout) = args.svgout {
        plot_panels(&panels, &svgout)?;
        info!(path = %svgout.display(), "wrote static chart");
    }
    Ok(())
}

fn main() {
    let args = parse_cli();
    fcst_lpp::logging::init(args.verbose);
    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
