use fcst_lpp::pipeline::{run_report, SeriesSpec};
use fcst_lpp::plot::parse_cli;
use fcst_lpp::svg::plot_panels;
use tracing::{error, info};

fn main() {
    let (dfile, jfile, svgout, verbose) = parse_cli();
    fcst_lpp::logging::init(verbose);
    info!(
        "read data from {} and {} and plot to {}",
        dfile.display(),
        jfile.display(),
        svgout.display()
    );
    let specs = [SeriesSpec::d_load(dfile), SeriesSpec::j_load(jfile)];
    let result = run_report(&specs).and_then(|panels| plot_panels(&panels, &svgout));
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
