use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use morphcv_image::Image;
use morphcv_imgproc::morphology::{
    dilate, dilate_view, erode, BorderType, MorphConfig, StructuringElement,
};
use morphcv_imgproc::parallel::ExecutionStrategy;

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

fn bench_morphology(c: &mut Criterion) {
    let mut group = c.benchmark_group("Morphology");
    let mut rng = StdRng::seed_from_u64(0);

    for (width, height) in [(321, 240), (640, 480), (1920, 1080)].iter() {
        for kernel_size in [3, 5, 7, 11, 15].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            let image_size = [*width, *height].into();
            let image_u8 =
                Image::<u8, 3>::from_size_fn(image_size, |_, _, _| rng.random()).unwrap();
            let image_f32 = image_u8.cast::<f32>().unwrap();

            let output_u8 = Image::<u8, 3>::from_size_val(image_size, 0).unwrap();
            let output_f32 = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();

            let rect = StructuringElement::rect(*kernel_size, *kernel_size).unwrap();
            let ellipse =
                StructuringElement::from_mask(*kernel_size, *kernel_size, &ellipse_mask(*kernel_size))
                    .unwrap();

            group.bench_with_input(
                BenchmarkId::new("dilate_rect_u8", &parameter_string),
                &(&image_u8, &output_u8),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(dilate(src, &mut dst, &rect, BorderType::Replicate)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("erode_ellipse_u8", &parameter_string),
                &(&image_u8, &output_u8),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(erode(src, &mut dst, &ellipse, BorderType::Constant(1))))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("dilate_ellipse_f32", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(dilate(src, &mut dst, &ellipse, BorderType::Constant(253.0)))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("dilate_rect_u8_serial", &parameter_string),
                &(&image_u8, &output_u8),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    let config = MorphConfig {
                        row_range: None,
                        strategy: ExecutionStrategy::Serial,
                    };
                    b.iter(|| {
                        black_box(dilate_view(
                            src.view(),
                            &mut dst.view_mut(),
                            &rect,
                            BorderType::Replicate,
                            &config,
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_morphology);
criterion_main!(benches);
