use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use gifweave::{
    codec,
    compositor::{self, Align, Axis, Layer},
    config::Config,
    looping, timeline, FrameSequence,
};

#[derive(Parser)]
#[command(
    name = "gifweave",
    version,
    about = "Edit, retime, and composite animated GIF frame sequences",
    long_about = "Gifweave edits animated GIFs as in-memory frame timelines: reorder, \
duplicate and remove frames, change playback speed and loop behavior, and combine \
several animations by concatenation, stacking, or free layer placement."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print frame, timing and loop information
    Info { input: PathBuf },

    /// Reorder frames by a comma-separated permutation of original indices
    Reorder {
        input: PathBuf,
        output: PathBuf,
        /// e.g. "2,1,0"
        #[arg(long)]
        order: String,
    },

    /// Move one frame to a new position
    Move {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },

    /// Duplicate a frame one or more times
    Duplicate {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },

    /// Remove the given frames
    Remove {
        input: PathBuf,
        output: PathBuf,
        /// Comma-separated frame indices, e.g. "0,3,4"
        #[arg(long)]
        indices: String,
    },

    /// Keep only the inclusive frame range [start, end]
    Extract {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        start: usize,
        #[arg(long)]
        end: usize,
    },

    /// Drop the inclusive frame range [start, end]
    RemoveRange {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        start: usize,
        #[arg(long)]
        end: usize,
    },

    /// Split into two files at a frame index
    Split {
        input: PathBuf,
        head: PathBuf,
        tail: PathBuf,
        #[arg(long)]
        index: usize,
    },

    /// Change playback speed (multiplier > 1 speeds up)
    Speed {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        multiplier: f64,
        #[arg(long, default_value_t = 20)]
        min_duration_ms: u32,
        #[arg(long, default_value_t = 10_000)]
        max_duration_ms: u32,
    },

    /// Reverse playback order
    Reverse { input: PathBuf, output: PathBuf },

    /// Keep every n-th frame
    Thin {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        every: usize,
    },

    /// Set the loop count (0 = infinite)
    SetLoop {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        count: u16,
    },

    /// Play several animations one after another
    Concat {
        /// Input files in playback order
        inputs: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 0)]
        loop_count: u16,
    },

    /// Place animations side by side
    Stack {
        /// Input files in placement order
        inputs: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
        /// "horizontal" or "vertical"
        #[arg(long, default_value = "horizontal")]
        axis: String,
        /// "start", "center" or "end"
        #[arg(long)]
        align: Option<String>,
        #[arg(long)]
        spacing: Option<u32>,
    },

    /// Layer animations at free canvas positions
    Layer {
        /// Layers in paint order as FILE@X,Y (e.g. "star.gif@15,15")
        layers: Vec<String>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    config.validate()?;

    run(cli.command, &config)
}

fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let encode_options = config.encode_options();

    match command {
        Command::Info { input } => {
            let seq = codec::decode_file(&input)?;
            println!("file:        {}", input.display());
            println!("frames:      {}", seq.frame_count());
            println!("canvas:      {}x{}", seq.width(), seq.height());
            println!("duration:    {} ms per loop", seq.total_duration_ms());
            println!("loop:        {:?}", looping::classify(&seq));
        }
        Command::Reorder { input, output, order } => {
            let seq = codec::decode_file(&input)?;
            let permutation = parse_indices(&order)?;
            let out = timeline::reorder(&seq, &permutation)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Move { input, output, from, to } => {
            let seq = codec::decode_file(&input)?;
            let out = timeline::move_frame(&seq, from, to)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Duplicate { input, output, index, count } => {
            let seq = codec::decode_file(&input)?;
            let out = timeline::duplicate(&seq, index, count)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Remove { input, output, indices } => {
            let seq = codec::decode_file(&input)?;
            let indices = parse_indices(&indices)?;
            let out = timeline::remove(&seq, &indices)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Extract { input, output, start, end } => {
            let seq = codec::decode_file(&input)?;
            let out = timeline::extract_range(&seq, start, end)?;
            write(&out, &encode_options, &output)?;
        }
        Command::RemoveRange { input, output, start, end } => {
            let seq = codec::decode_file(&input)?;
            let out = timeline::remove_range(&seq, start, end)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Split { input, head, tail, index } => {
            let seq = codec::decode_file(&input)?;
            let (first, second) = timeline::split_at(&seq, index)?;
            write(&first, &encode_options, &head)?;
            write(&second, &encode_options, &tail)?;
        }
        Command::Speed { input, output, multiplier, min_duration_ms, max_duration_ms } => {
            let seq = codec::decode_file(&input)?;
            let out = timeline::retime(&seq, multiplier, min_duration_ms, max_duration_ms)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Reverse { input, output } => {
            let seq = codec::decode_file(&input)?;
            let out = timeline::reverse(&seq)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Thin { input, output, every } => {
            let seq = codec::decode_file(&input)?;
            let out = timeline::keep_every_nth(&seq, every)?;
            write(&out, &encode_options, &output)?;
        }
        Command::SetLoop { input, output, count } => {
            let seq = codec::decode_file(&input)?;
            let out = looping::set_loop_count(&seq, count)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Concat { inputs, output, loop_count } => {
            let sequences = decode_all(&inputs)?;
            let out = compositor::concatenate(&sequences, loop_count)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Stack { inputs, output, axis, align, spacing } => {
            let sequences = decode_all(&inputs)?;
            let axis = parse_axis(&axis)?;
            let mut options = config.stack_options();
            if let Some(align) = align {
                options.align = parse_align(&align)?;
            }
            if let Some(spacing) = spacing {
                options.spacing = spacing;
            }
            let out = compositor::stack(&sequences, axis, &options)?;
            write(&out, &encode_options, &output)?;
        }
        Command::Layer { layers, output } => {
            let layers = layers
                .iter()
                .map(|spec| parse_layer(spec))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let out = compositor::compose_layers(&layers)?;
            write(&out, &encode_options, &output)?;
        }
    }

    Ok(())
}

fn write(
    sequence: &FrameSequence,
    options: &codec::EncodeOptions,
    path: &PathBuf,
) -> anyhow::Result<()> {
    codec::encode_file(sequence, options, path)?;
    info!(
        "Wrote {} ({} frames, {}x{})",
        path.display(),
        sequence.frame_count(),
        sequence.width(),
        sequence.height()
    );
    Ok(())
}

fn decode_all(paths: &[PathBuf]) -> anyhow::Result<Vec<FrameSequence>> {
    paths
        .iter()
        .map(|p| codec::decode_file(p).with_context(|| format!("decoding {}", p.display())))
        .collect()
}

fn parse_indices(text: &str) -> anyhow::Result<Vec<usize>> {
    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid frame index '{}'", part.trim()))
        })
        .collect()
}

fn parse_axis(text: &str) -> anyhow::Result<Axis> {
    match text {
        "horizontal" => Ok(Axis::Horizontal),
        "vertical" => Ok(Axis::Vertical),
        other => bail!("unknown axis '{other}' (expected horizontal or vertical)"),
    }
}

fn parse_align(text: &str) -> anyhow::Result<Align> {
    match text {
        "start" => Ok(Align::Start),
        "center" => Ok(Align::Center),
        "end" => Ok(Align::End),
        other => bail!("unknown alignment '{other}' (expected start, center or end)"),
    }
}

/// Parse a layer spec of the form FILE@X,Y
fn parse_layer(spec: &str) -> anyhow::Result<Layer> {
    let (path, position) = spec
        .rsplit_once('@')
        .with_context(|| format!("layer spec '{spec}' missing '@X,Y' position"))?;
    let (x, y) = position
        .split_once(',')
        .with_context(|| format!("layer position '{position}' is not 'X,Y'"))?;

    let x: i64 = x.trim().parse().with_context(|| format!("bad x coordinate '{x}'"))?;
    let y: i64 = y.trim().parse().with_context(|| format!("bad y coordinate '{y}'"))?;

    let sequence = codec::decode_file(path).with_context(|| format!("decoding {path}"))?;
    Ok(Layer::new(sequence, (x, y)))
}
