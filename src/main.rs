use placemark::{
    cli::{get_args, get_log_level_from_verbose, run},
    error::default_error_handler,
};

fn main() {
    let args = get_args();
    let lvl = get_log_level_from_verbose(args.verbose);
    env_logger::Builder::new().filter_level(lvl).init();

    match run(args) {
        Ok(output) => print!("{output}"),
        Err(err) => default_error_handler(err),
    }
}
