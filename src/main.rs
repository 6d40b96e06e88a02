//! Cymatica driver: analyze a frequency or render a composition.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use cymatica::cli::Args;
use cymatica::coupling::CouplingAnalyzer;
use cymatica::effects;
use cymatica::harmonics::HarmonicSeriesGenerator;
use cymatica::metrics::MetricsEngine;
use cymatica::music::Composer;
use cymatica::params::{MixWeights, PatternConfig, SAMPLE_RATE};
use cymatica::pattern::PatternEngine;
use cymatica::synth::{mix, EnvelopeSynthesizer};
use cymatica::writer;

fn main() {
    let args = Args::parse();

    if let Some(path) = args.render.clone() {
        render(&args, &path);
    } else {
        analyze(&args);
    }
}

/// Analysis path: ladder → per-harmonic patterns → aggregated metrics
/// → coupling classification.
fn analyze(args: &Args) {
    println!("Analyzing {} Hz (order {})\n", args.frequency, args.order);

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let generator = HarmonicSeriesGenerator::new();
    let ladder = generator.generate(args.frequency, args.layers, &mut rng);
    println!("Harmonic ladder: {:?}", ladder.display_values());

    let engine = PatternEngine::new(PatternConfig::default());
    let metrics_engine = MetricsEngine::new();
    let per_harmonic: Vec<_> = ladder
        .frequencies()
        .iter()
        .map(|&freq| metrics_engine.compute(&engine.generate(freq, args.order)))
        .collect();
    let aggregated = metrics_engine.aggregate(&per_harmonic);

    println!("Pattern metrics (averaged over ladder):");
    println!("  symmetry:   {:.3}", aggregated.symmetry);
    println!("  complexity: {:.3}", aggregated.complexity);
    println!("  coherence:  {:.3}", aggregated.coherence);

    let analyzer = CouplingAnalyzer::new();
    let coupling = analyzer.analyze(&ladder);
    println!("\nCoupling: {:?} (strength {:.3})", coupling.kind, coupling.strength);
    println!(
        "  ratio mean {:.4}, ratio std {:.4}",
        coupling.ratio_mean, coupling.ratio_std
    );

    if ladder.len() >= 2 {
        let freqs = ladder.frequencies();
        let pac = analyzer.analyze_pac(freqs[0], freqs[freqs.len() - 1]);
        println!(
            "Phase-amplitude estimate: strength {:.3}, likely {}, ratio {:.2}",
            pac.strength, pac.likely, pac.ratio
        );
    }
}

/// Render path: compose → synthesize three tracks → mix → effects →
/// normalize → write.
fn render(args: &Args, path: &str) {
    let scale = args.parse_scale();
    let instrument = args.parse_instrument();
    let progression = args.parse_progression();

    println!(
        "Rendering {:.1} s at {} bpm ({:?}, {:?})",
        args.duration, args.tempo, scale, instrument
    );

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let composition = Composer::new().compose(
        args.base_note,
        scale,
        &progression,
        args.tempo,
        args.duration,
        instrument,
        &mut rng,
    );
    println!("Composed {} beats per track", composition.beat_count());

    let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
    let envelope = composition.instrument.envelope();
    let beat = composition.beat_duration_s();
    let melody = synth.synthesize(&composition.melody, beat, &envelope, 1.0, 0);
    let harmony = synth.synthesize(&composition.harmony, beat, &envelope, 1.0, 0);
    let bass = synth.synthesize(&composition.bass, beat, &envelope, 1.0, 0);

    let mut buffer = mix(&melody, &harmony, &bass, &MixWeights::default());

    if let Some(cutoff) = args.lowpass {
        buffer = effects::lowpass(&buffer, cutoff, SAMPLE_RATE);
    }
    if let Some(cutoff) = args.highpass {
        buffer = effects::highpass(&buffer, cutoff, SAMPLE_RATE);
    }
    if args.reverb > 0.0 {
        buffer = effects::reverb(&buffer, args.reverb, 0.08, SAMPLE_RATE);
    }

    let buffer = writer::normalize(&buffer);
    match writer::write_wav(path, &buffer, SAMPLE_RATE) {
        Ok(()) => println!("Wrote {} samples to {}", buffer.len(), path),
        Err(e) => {
            eprintln!("Failed to write {}: {}", path, e);
            std::process::exit(1);
        }
    }
}
