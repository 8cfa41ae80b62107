use anyhow::Context;
use clap::Parser;
use cvqkd_iq_synth::cli::Args;
use cvqkd_iq_synth::{driver, io, DspParameters};
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &args.log_level);
    }
    env_logger::init();

    let params: DspParameters = (&args).into();
    params
        .validate()
        .with_context(|| "invalid DSP parameters")?;

    info!(
        "synthesizing frame: sample_rate={} symbol_rate={} zc_rate={} num_symbols={}",
        params.sample_rate, params.symbol_rate, params.zc_rate, params.num_symbols
    );
    let frame = driver::synthesize(&params).with_context(|| "frame synthesis failed")?;

    if let Err(e) = io::write_iq_bin(&args.output, &frame.samples) {
        warn!("could not write {}: {e}", args.output.display());
    }
    if let Err(e) = io::write_symbols_tsv(&args.output_symbols, &frame.symbols) {
        warn!("could not write {}: {e}", args.output_symbols.display());
    }

    info!("wrote {} samples", frame.samples.len());
    Ok(())
}
