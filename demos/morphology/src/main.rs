use argh::FromArgs;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use morphcv::{
    image::{Image, ImageSize},
    imgproc::{
        morphology::{self, BorderType, MorphConfig, StructuringElement},
        parallel::ExecutionStrategy,
    },
};

#[derive(FromArgs)]
/// Dilate and erode a synthetic image and report timings
struct Args {
    /// image width (default: 1920)
    #[argh(option, default = "1920")]
    width: usize,

    /// image height (default: 1080)
    #[argh(option, default = "1080")]
    height: usize,

    /// kernel size (default: 5)
    #[argh(option, short = 's', default = "5")]
    kernel_size: usize,

    /// kernel shape: box, cross, ellipse (default: box)
    #[argh(option, short = 'k', default = "String::from(\"box\")")]
    kernel_shape: String,

    /// border: replicate, constant (default: replicate)
    #[argh(option, short = 'b', default = "String::from(\"replicate\")")]
    border: String,

    /// number of threads, 0 uses the global pool (default: 0)
    #[argh(option, short = 't', default = "0")]
    threads: usize,

    /// seed for the synthetic image (default: 42)
    #[argh(option, default = "42")]
    seed: u64,
}

fn cross_mask(ksize: usize) -> Vec<bool> {
    let r = ksize / 2;
    (0..ksize * ksize)
        .map(|i| i / ksize == r || i % ksize == r)
        .collect()
}

/// Elliptic structuring element laid out the way OpenCV's `getStructuringElement` does.
fn ellipse_mask(ksize: usize) -> Vec<bool> {
    let r = (ksize / 2) as f64;
    let c = (ksize / 2) as f64;
    let inv_r2 = if r > 0.0 { 1.0 / (r * r) } else { 0.0 };

    let mut mask = vec![false; ksize * ksize];
    for i in 0..ksize {
        let dy = i as f64 - r;
        if dy.abs() > r {
            continue;
        }
        let dx = (c * ((r * r - dy * dy) * inv_r2).sqrt()).round();
        let j1 = (c - dx).max(0.0) as usize;
        let j2 = ((c + dx + 1.0) as usize).min(ksize);
        for j in j1..j2 {
            mask[i * ksize + j] = true;
        }
    }
    mask
}

fn mean(image: &Image<u8, 3>) -> f64 {
    let sum = image.as_slice().iter().map(|&v| v as u64).sum::<u64>();
    sum as f64 / image.as_slice().len().max(1) as f64
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };

    // sparse bright blobs on a dark background
    let mut rng = StdRng::seed_from_u64(args.seed);
    let src = Image::<u8, 3>::from_size_fn(size, |_, _, _| {
        if rng.random_bool(0.02) {
            rng.random_range(128..=255)
        } else {
            rng.random_range(0..32)
        }
    })?;

    let ksize = args.kernel_size;
    let element = match args.kernel_shape.as_str() {
        "cross" => StructuringElement::from_mask(ksize, ksize, &cross_mask(ksize))?,
        "ellipse" => StructuringElement::from_mask(ksize, ksize, &ellipse_mask(ksize))?,
        _ => StructuringElement::rect(ksize, ksize)?,
    };

    let strategy = match args.threads {
        0 => ExecutionStrategy::ParallelRows,
        1 => ExecutionStrategy::Serial,
        n => ExecutionStrategy::Fixed(n),
    };
    let config = MorphConfig {
        row_range: None,
        strategy,
    };

    let (dilate_border, erode_border) = match args.border.as_str() {
        "constant" => (BorderType::Constant(253), BorderType::Constant(1)),
        _ => (BorderType::Replicate, BorderType::Replicate),
    };

    log::info!(
        "image {}, kernel {} {}x{} ({} active), {:?}",
        size,
        args.kernel_shape,
        ksize,
        ksize,
        element.num_active(),
        strategy,
    );

    let mut dilated = Image::<u8, 3>::from_size_val(size, 0)?;
    let now = Instant::now();
    morphology::dilate_view(
        src.view(),
        &mut dilated.view_mut(),
        &element,
        dilate_border,
        &config,
    )?;
    log::info!("dilate took {:?}", now.elapsed());

    let mut eroded = Image::<u8, 3>::from_size_val(size, 0)?;
    let now = Instant::now();
    morphology::erode_view(
        src.view(),
        &mut eroded.view_mut(),
        &element,
        erode_border,
        &config,
    )?;
    log::info!("erode took {:?}", now.elapsed());

    log::info!(
        "mean intensity: source {:.2}, dilated {:.2}, eroded {:.2}",
        mean(&src),
        mean(&dilated),
        mean(&eroded),
    );

    Ok(())
}
